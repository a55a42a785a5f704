use std::sync::Arc;

use card_helpers::time::Clock;
use farm_card_trait::{
    AccountId,
    AllowanceApprover,
    FarmPosition,
    Notifier,
    UserDataStore,
};
use log::{
    debug,
    warn,
};

use crate::{
    authorization::{
        is_approved,
        ApprovalOutcome,
        AuthorizationFlow,
    },
    config::CardConfig,
    countdown::LockCountdown,
    lock_state::LockState,
    selector::{
        select,
        ViewKind,
    },
    views::{
        ActionView,
        CardOptions,
        CardView,
        CountdownProps,
        HarvestProps,
        StakeActionProps,
    },
};

/// External services the card talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub approver: Arc<dyn AllowanceApprover>,
    pub store: Arc<dyn UserDataStore>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
}

/// Action area of a single farm card.
///
/// Owns the authorization and lock state derived from the latest farm snapshot.
/// Must be created inside a tokio runtime for the withdrawal countdown to tick.
pub struct FarmActionController {
    position: FarmPosition,
    account: Option<AccountId>,
    options: CardOptions,
    show_countdown: bool,
    authorization: Arc<AuthorizationFlow>,
    countdown: LockCountdown,
    collaborators: Collaborators,
}

impl FarmActionController {
    pub fn new(
        config: CardConfig,
        position: FarmPosition,
        collaborators: Collaborators,
        options: CardOptions,
    ) -> Self {
        let authorization = Arc::new(Self::authorization_for(&position, &collaborators));
        let tick_interval = config.tick_interval();
        let mut countdown = LockCountdown::new(config.lock_schedule, tick_interval);
        countdown.refresh(
            position.last_deposit_time(),
            position.pool_id,
            collaborators.clock.now(),
        );

        Self {
            position,
            account: None,
            options,
            show_countdown: config.show_countdown,
            authorization,
            countdown,
            collaborators,
        }
    }

    fn authorization_for(position: &FarmPosition, collaborators: &Collaborators) -> AuthorizationFlow {
        AuthorizationFlow::new(
            position.pool_id,
            position.liquidity_token,
            collaborators.approver.clone(),
            collaborators.store.clone(),
            collaborators.notifier.clone(),
        )
    }

    pub fn account(&self) -> Option<AccountId> {
        self.account
    }

    pub fn set_account(&mut self, account: Option<AccountId>) {
        self.account = account;
    }

    pub fn position(&self) -> &FarmPosition {
        &self.position
    }

    /// Replaces the farm snapshot and re-evaluates the withdrawal lock.
    pub fn update_position(&mut self, position: FarmPosition) -> LockState {
        if position.pool_id != self.position.pool_id
            || position.liquidity_token != self.position.liquidity_token
        {
            if self.authorization.is_request_in_flight() {
                warn!(
                    "card switched from pool {} to {} while an approval is in flight",
                    self.position.pool_id, position.pool_id
                );
            }
            debug!("card now shows pool {}", position.pool_id);
            self.authorization = Arc::new(Self::authorization_for(&position, &self.collaborators));
        }
        self.position = position;
        self.countdown.refresh(
            self.position.last_deposit_time(),
            self.position.pool_id,
            self.collaborators.clock.now(),
        )
    }

    pub fn is_approved(&self) -> bool {
        is_approved(&self.position)
    }

    pub fn is_request_in_flight(&self) -> bool {
        self.authorization.is_request_in_flight()
    }

    pub fn lock_state(&self) -> LockState {
        self.countdown.state()
    }

    /// Shared handle to the authorization flow, e.g. to run an approval on a separate task.
    pub fn authorization(&self) -> Arc<AuthorizationFlow> {
        self.authorization.clone()
    }

    pub fn render(&self) -> CardView {
        let user_data = self.position.user_data.unwrap_or_default();
        let lock = self.countdown.state();

        let harvest = HarvestProps {
            earnings: user_data.earnings,
            pool_id: self.position.pool_id,
            can_harvest: user_data.can_harvest,
        };

        let countdown = (self.show_countdown && lock.is_locked).then_some(CountdownProps {
            seconds_remaining: lock.seconds_remaining,
        });

        let action = match select(self.account.as_ref(), self.is_approved()) {
            ViewKind::ConnectPrompt => ActionView::ConnectPrompt,
            ViewKind::EnableAction => ActionView::EnableAction {
                disabled: self.authorization.is_request_in_flight(),
            },
            ViewKind::StakeHarvestWidget => ActionView::StakeHarvestWidget(StakeActionProps {
                staked_balance: user_data.staked_balance,
                token_balance: user_data.token_balance,
                token_name: self.position.lp_symbol.clone(),
                pool_id: self.position.pool_id,
                apr: self.position.display_apr,
                lp_label: self.options.lp_label.clone(),
                add_liquidity_url: self.options.add_liquidity_url.clone(),
                reward_token_price: self.options.reward_token_price,
                withdraw_locked: lock.is_locked,
                lock,
            }),
        };

        CardView {
            harvest,
            countdown,
            action,
        }
    }

    /// Handler of the enable button.
    pub async fn enable(&self) -> ApprovalOutcome {
        match self.account {
            Some(account) => self.authorization.request_approval(account).await,
            None => {
                warn!("pool {}: enable requested without a wallet", self.position.pool_id);
                ApprovalOutcome::NotConnected
            }
        }
    }

    /// Handler of the stake widget's "staked" callback: reloads the pool to pick up the new deposit.
    pub fn on_staked(&self) {
        if let Some(account) = self.account {
            self.collaborators
                .store
                .refresh(account, &[self.position.pool_id]);
        }
    }

    /// Waits for the next countdown tick and applies it.
    /// Returns `None` when the pool is not locked.
    pub async fn next_tick(&mut self) -> Option<LockState> {
        self.countdown.next_tick().await
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_running()
    }

    /// Stops the countdown. Called when the card is removed.
    pub fn teardown(&mut self) {
        self.countdown.cancel();
    }
}
