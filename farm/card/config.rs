use std::{
    collections::BTreeMap,
    fs,
    path::Path,
    time::Duration,
};

use card_helpers::{
    constants::DEFAULT_TICK_INTERVAL_MS,
    ensure,
    time::Timestamp,
};
use farm_card_trait::PoolId;
use log::info;
use serde::Deserialize;

use crate::{
    error::ConfigError,
    lock_state::LockSchedule,
};

/// Settings of a farm card.
///
/// ```toml
/// show_countdown = true
/// tick_interval_ms = 1000
///
/// [lock_schedule]
/// default = 50
///
/// [lock_schedule.pools]
/// 0 = 30
/// 1 = 45
/// ```
///
/// Missing keys take their default values. A `[lock_schedule]` table without
/// `pools` keeps the built-in entries (30s for pool 0, 45s for pool 1); set
/// `pools = {}` for a uniform lock of `default` seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardConfig {
    /// Whether the withdrawal countdown is displayed.
    pub show_countdown: bool,
    pub tick_interval_ms: u64,
    pub lock_schedule: LockSchedule,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            show_countdown: false,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            lock_schedule: LockSchedule::default(),
        }
    }
}

impl CardConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: RawCardConfig = toml::from_str(input)?;
        raw.try_into()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        info!("loaded card config from {}", path.display());
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

// TOML table keys are strings, pool ids are parsed after deserialization.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawCardConfig {
    show_countdown: bool,
    tick_interval_ms: u64,
    lock_schedule: RawLockSchedule,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawLockSchedule {
    default: Timestamp,
    pools: BTreeMap<String, Timestamp>,
}

impl Default for RawCardConfig {
    fn default() -> Self {
        let config = CardConfig::default();
        Self {
            show_countdown: config.show_countdown,
            tick_interval_ms: config.tick_interval_ms,
            lock_schedule: RawLockSchedule::default(),
        }
    }
}

impl Default for RawLockSchedule {
    fn default() -> Self {
        let schedule = LockSchedule::default();
        Self {
            default: schedule.default,
            pools: schedule
                .pools
                .into_iter()
                .map(|(pool_id, duration)| (pool_id.to_string(), duration))
                .collect(),
        }
    }
}

impl TryFrom<RawCardConfig> for CardConfig {
    type Error = ConfigError;

    fn try_from(raw: RawCardConfig) -> Result<Self, Self::Error> {
        ensure!(raw.tick_interval_ms > 0, ConfigError::ZeroTickInterval);

        let mut pools = BTreeMap::new();
        for (key, duration) in raw.lock_schedule.pools {
            match key.trim().parse::<PoolId>() {
                Ok(pool_id) => {
                    pools.insert(pool_id, duration);
                }
                Err(_) => return Err(ConfigError::InvalidPoolId(key)),
            }
        }

        Ok(Self {
            show_countdown: raw.show_countdown,
            tick_interval_ms: raw.tick_interval_ms,
            lock_schedule: LockSchedule {
                default: raw.lock_schedule.default,
                pools,
            },
        })
    }
}
