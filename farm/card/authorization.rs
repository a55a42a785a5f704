use std::sync::Arc;

use card_helpers::constants::{
    APPROVAL_FAILED_MESSAGE,
    ERROR_TITLE,
};
use farm_card_trait::{
    AccountId,
    AllowanceApprover,
    ApprovalError,
    FarmPosition,
    Notifier,
    PoolId,
    UserDataStore,
};
use log::{
    debug,
    error,
    info,
};

use crate::{
    error::InFlightError,
    in_flight::InFlight,
};

/// Result of an enable request. Failures are reported here, never as `Err`.
#[derive(Debug, PartialEq, Eq)]
pub enum ApprovalOutcome {
    Approved,
    Failed(ApprovalError),
    /// Another request has not settled yet, nothing was sent.
    AlreadyInFlight,
    /// No wallet connected, nothing was sent.
    NotConnected,
}

/// Whether the farm may spend the user's LP tokens.
pub fn is_approved(position: &FarmPosition) -> bool {
    position.user_data.map_or(false, |data| data.allowance > 0)
}

/// Grants the farm contract an allowance on the pool's LP token.
pub struct AuthorizationFlow {
    pool_id: PoolId,
    liquidity_token: AccountId,
    approver: Arc<dyn AllowanceApprover>,
    store: Arc<dyn UserDataStore>,
    notifier: Arc<dyn Notifier>,
    in_flight: InFlight,
}

impl AuthorizationFlow {
    pub fn new(
        pool_id: PoolId,
        liquidity_token: AccountId,
        approver: Arc<dyn AllowanceApprover>,
        store: Arc<dyn UserDataStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pool_id,
            liquidity_token,
            approver,
            store,
            notifier,
            in_flight: InFlight::default(),
        }
    }

    pub fn pool_id(&self) -> PoolId {
        self.pool_id
    }

    pub fn is_request_in_flight(&self) -> bool {
        self.in_flight.is_set()
    }

    /// Sends the approval for `account` and asks the store to reload the pool on success.
    ///
    /// Failures are shown to the user through the notifier.
    /// The in-flight flag is cleared once the request settles, whatever the outcome.
    pub async fn request_approval(&self, account: AccountId) -> ApprovalOutcome {
        let _guard = match self.in_flight.lock() {
            Ok(guard) => guard,
            Err(InFlightError::AlreadyInFlight) => {
                debug!("pool {}: approval already in flight", self.pool_id);
                return ApprovalOutcome::AlreadyInFlight
            }
        };

        info!("pool {}: requesting approval for {:?}", self.pool_id, account);
        match self.approver.approve(account, self.liquidity_token).await {
            Ok(()) => {
                info!("pool {}: approval confirmed", self.pool_id);
                self.store.refresh(account, &[self.pool_id]);
                ApprovalOutcome::Approved
            }
            Err(e) => {
                error!("pool {}: approval failed: {}", self.pool_id, e);
                self.notifier
                    .notify_error(ERROR_TITLE, APPROVAL_FAILED_MESSAGE);
                ApprovalOutcome::Failed(e)
            }
        }
    }
}
