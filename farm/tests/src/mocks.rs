use std::{
    collections::VecDeque,
    sync::{
        Arc,
        Mutex,
    },
};

use async_trait::async_trait;
use farm_card_trait::{
    AccountId,
    AllowanceApprover,
    ApprovalError,
    Notifier,
    PoolId,
    UserDataStore,
};
use tokio::sync::Notify;

/// Approver replaying queued results, `Ok(())` once the queue is empty.
///
/// A gated approver waits for `release()` before answering.
#[derive(Default)]
pub struct MockApprover {
    results: Mutex<VecDeque<Result<(), ApprovalError>>>,
    calls: Mutex<Vec<(AccountId, AccountId)>>,
    entered: Notify,
    gate: Option<Notify>,
}

impl MockApprover {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(error: ApprovalError) -> Arc<Self> {
        let approver = Self::default();
        approver.results.lock().unwrap().push_back(Err(error));
        Arc::new(approver)
    }

    pub fn gated(result: Result<(), ApprovalError>) -> Arc<Self> {
        let approver = Self {
            gate: Some(Notify::new()),
            ..Default::default()
        };
        approver.results.lock().unwrap().push_back(result);
        Arc::new(approver)
    }

    /// Resolves until `approve` has been entered.
    pub async fn entered(&self) {
        self.entered.notified().await
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// `(owner, token)` of every call so far.
    pub fn calls(&self) -> Vec<(AccountId, AccountId)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AllowanceApprover for MockApprover {
    async fn approve(&self, owner: AccountId, token: AccountId) -> Result<(), ApprovalError> {
        self.calls.lock().unwrap().push((owner, token));
        self.entered.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

#[derive(Default)]
pub struct MockStore {
    refreshes: Mutex<Vec<(AccountId, Vec<PoolId>)>>,
}

impl MockStore {
    pub fn refreshes(&self) -> Vec<(AccountId, Vec<PoolId>)> {
        self.refreshes.lock().unwrap().clone()
    }
}

impl UserDataStore for MockStore {
    fn refresh(&self, account: AccountId, pool_ids: &[PoolId]) {
        self.refreshes
            .lock()
            .unwrap()
            .push((account, pool_ids.to_vec()));
    }
}

#[derive(Default)]
pub struct MockNotifier {
    errors: Mutex<Vec<(String, String)>>,
}

impl MockNotifier {
    /// `(title, message)` of every error shown so far.
    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for MockNotifier {
    fn notify_error(&self, title: &str, message: &str) {
        self.errors
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}
