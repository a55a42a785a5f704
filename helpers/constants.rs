use crate::time::Timestamp;

/// Title of the notification shown when enabling a farm fails.
pub const ERROR_TITLE: &str = "Error";

/// Message of the notification shown when enabling a farm fails.
/// NOTE: All failure causes share this text, the cause itself only goes to the log.
pub const APPROVAL_FAILED_MESSAGE: &str = "Sorry! Transaction is failed!";

/// Period of the withdrawal countdown tick, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

/// Withdrawal lock (in seconds) of pools that have no entry in the lock schedule.
pub const DEFAULT_LOCK_DURATION: Timestamp = 50;

/// Withdrawal locks (in seconds) of the pools listed in the default lock schedule.
pub const DEFAULT_POOL_LOCK_DURATIONS: [(u32, Timestamp); 2] = [(0, 30), (1, 45)];
