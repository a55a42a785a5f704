use std::collections::BTreeMap;

use card_helpers::{
    constants::{
        DEFAULT_LOCK_DURATION,
        DEFAULT_POOL_LOCK_DURATIONS,
    },
    time::Timestamp,
};
use farm_card_trait::PoolId;

/// Withdrawal lock durations (in seconds) per pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockSchedule {
    /// Lock of the pools without an entry in `pools`.
    pub default: Timestamp,
    pub pools: BTreeMap<PoolId, Timestamp>,
}

impl Default for LockSchedule {
    fn default() -> Self {
        Self {
            default: DEFAULT_LOCK_DURATION,
            pools: DEFAULT_POOL_LOCK_DURATIONS.into_iter().collect(),
        }
    }
}

impl LockSchedule {
    /// Schedule locking every pool for `default` seconds.
    pub fn uniform(default: Timestamp) -> Self {
        Self {
            default,
            pools: BTreeMap::new(),
        }
    }

    pub fn with_pool(mut self, pool_id: PoolId, lock_duration: Timestamp) -> Self {
        self.pools.insert(pool_id, lock_duration);
        self
    }

    pub fn lock_duration(&self, pool_id: PoolId) -> Timestamp {
        self.pools.get(&pool_id).copied().unwrap_or(self.default)
    }
}

/// Withdrawal lock following the user's latest deposit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockState {
    /// Length of the lock, in seconds.
    pub lock_duration: Timestamp,
    /// Timestamp at which withdrawals are allowed again.
    pub unlock_at: Timestamp,
    pub is_locked: bool,
    /// Seconds until `unlock_at`. Always `0` when not locked.
    pub seconds_remaining: Timestamp,
}

impl LockState {
    /// Lock state at `now` for a deposit made at `last_deposit_time`.
    ///
    /// `last_deposit_time == 0` means no deposit, so nothing is locked.
    /// Deposits timestamped in the future are not locked either.
    pub fn evaluate(last_deposit_time: Timestamp, lock_duration: Timestamp, now: Timestamp) -> Self {
        let unlock_at = last_deposit_time.saturating_add(lock_duration);
        let is_locked = last_deposit_time != 0 && last_deposit_time <= now && now < unlock_at;
        let seconds_remaining = if is_locked { unlock_at - now } else { 0 };
        Self {
            lock_duration,
            unlock_at,
            is_locked,
            seconds_remaining,
        }
    }

    /// State one second later. The lock clears when `seconds_remaining` reaches zero.
    pub fn tick(self) -> Self {
        if !self.is_locked {
            return self
        }
        let seconds_remaining = self.seconds_remaining.saturating_sub(1);
        Self {
            is_locked: seconds_remaining > 0,
            seconds_remaining,
            ..self
        }
    }
}
