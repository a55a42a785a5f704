//! Values handed to the presentation layer.
//! The card computes them, the widgets only display them.

use card_helpers::time::Timestamp;
use farm_card_trait::{
    Balance,
    PoolId,
};

use crate::{
    lock_state::LockState,
    selector::ViewKind,
};

/// Display options supplied by the page hosting the card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardOptions {
    pub lp_label: Option<String>,
    pub add_liquidity_url: Option<String>,
    /// Price of the reward token, used by the stake widget to value the APR.
    pub reward_token_price: Option<f64>,
}

/// Everything the card renders.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub harvest: HarvestProps,
    /// Shown only while locked and when the countdown is enabled.
    pub countdown: Option<CountdownProps>,
    pub action: ActionView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestProps {
    pub earnings: Balance,
    pub pool_id: PoolId,
    pub can_harvest: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownProps {
    pub seconds_remaining: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionView {
    ConnectPrompt,
    /// `disabled` while an enable request is in flight.
    EnableAction { disabled: bool },
    StakeHarvestWidget(StakeActionProps),
}

impl ActionView {
    pub fn kind(&self) -> ViewKind {
        match self {
            ActionView::ConnectPrompt => ViewKind::ConnectPrompt,
            ActionView::EnableAction { .. } => ViewKind::EnableAction,
            ActionView::StakeHarvestWidget(_) => ViewKind::StakeHarvestWidget,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StakeActionProps {
    pub staked_balance: Balance,
    pub token_balance: Balance,
    pub token_name: String,
    pub pool_id: PoolId,
    pub apr: Option<f64>,
    pub lp_label: Option<String>,
    pub add_liquidity_url: Option<String>,
    pub reward_token_price: Option<f64>,
    /// Withdrawals must be refused while set.
    pub withdraw_locked: bool,
    pub lock: LockState,
}
