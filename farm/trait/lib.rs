use std::fmt;

use async_trait::async_trait;
use card_helpers::time::Timestamp;
use scale::{
    Decode,
    Encode,
};

pub use ink_primitives::AccountId;
pub use psp22::PSP22Error;

pub type PoolId = u32;
pub type Balance = u128;

/// Failure of the call granting the farm an allowance on the LP token.
#[derive(Debug, PartialEq, Eq, Encode, Decode)]
pub enum ApprovalError {
    /// The wallet owner declined to sign the transaction.
    UserRejected,
    /// The transaction never reached the chain.
    Network(String),
    /// The token contract rejected the call.
    ContractReverted(PSP22Error),
    Other(String),
}

impl From<PSP22Error> for ApprovalError {
    fn from(e: PSP22Error) -> Self {
        ApprovalError::ContractReverted(e)
    }
}

impl fmt::Display for ApprovalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalError::UserRejected => write!(f, "transaction rejected by the user"),
            ApprovalError::Network(reason) => write!(f, "network failure: {}", reason),
            ApprovalError::ContractReverted(e) => write!(f, "token contract reverted: {:?}", e),
            ApprovalError::Other(reason) => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for ApprovalError {}

/// User's position in a farm, as read from the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Encode, Decode)]
pub struct UserData {
    /// How many LP tokens the farm may spend on behalf of the user.
    pub allowance: Balance,
    /// LP tokens held in the user's wallet.
    pub token_balance: Balance,
    /// LP tokens deposited in the farm.
    pub staked_balance: Balance,
    /// Rewards earned and not yet harvested.
    pub earnings: Balance,
    /// Timestamp (in seconds) of the user's latest deposit, `0` if there was none.
    pub last_deposit_time: Timestamp,
    pub can_harvest: bool,
}

/// Snapshot of a single farm, handed to the card on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmPosition {
    pub pool_id: PoolId,
    /// Address of the LP token staked in this farm.
    pub liquidity_token: AccountId,
    pub lp_symbol: String,
    /// Missing while no wallet is connected.
    pub user_data: Option<UserData>,
    /// Estimated annual yield, in percent.
    pub display_apr: Option<f64>,
}

impl FarmPosition {
    pub fn new(pool_id: PoolId, liquidity_token: AccountId, lp_symbol: impl Into<String>) -> Self {
        Self {
            pool_id,
            liquidity_token,
            lp_symbol: lp_symbol.into(),
            user_data: None,
            display_apr: None,
        }
    }

    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = Some(user_data);
        self
    }

    pub fn with_apr(mut self, apr: f64) -> Self {
        self.display_apr = Some(apr);
        self
    }

    /// Timestamp of the latest deposit, `0` if unknown or none.
    pub fn last_deposit_time(&self) -> Timestamp {
        self.user_data.map_or(0, |data| data.last_deposit_time)
    }
}

/// Contract-call collaborator granting allowances on PSP22 tokens.
#[async_trait]
pub trait AllowanceApprover: Send + Sync {
    /// Lets the farm contract spend `token` on behalf of `owner`.
    async fn approve(&self, owner: AccountId, token: AccountId) -> Result<(), ApprovalError>;
}

/// Store holding users' on-chain farm data.
pub trait UserDataStore: Send + Sync {
    /// Requests a reload of `account`'s data for the given pools.
    /// Returns immediately, the store updates the positions on its own.
    fn refresh(&self, account: AccountId, pool_ids: &[PoolId]);
}

/// User-facing notifications (toasts).
pub trait Notifier: Send + Sync {
    fn notify_error(&self, title: &str, message: &str);
}
