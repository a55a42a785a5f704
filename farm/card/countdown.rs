use std::time::Duration;

use card_helpers::{
    constants::DEFAULT_TICK_INTERVAL_MS,
    time::Timestamp,
};
use farm_card_trait::PoolId;
use log::{
    debug,
    info,
    warn,
};
use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::{
        self,
        Instant,
        MissedTickBehavior,
    },
};

use crate::lock_state::{
    LockSchedule,
    LockState,
};

/// Repeating countdown tick. The tick task is aborted when the timer is cancelled or dropped.
///
/// The task publishes the number of periods elapsed since it started, so a slow
/// consumer sees one pending value instead of a backlog.
#[derive(Debug)]
pub struct CountdownTimer {
    handle: JoinHandle<()>,
    ticks: watch::Receiver<u64>,
    seen: u64,
}

impl CountdownTimer {
    /// Starts ticking every `period`, the first tick one period from now.
    /// Returns `None` outside of a tokio runtime.
    pub fn start(period: Duration) -> Option<Self> {
        let runtime = Handle::try_current().ok()?;
        let (tx, ticks) = watch::channel(0u64);
        let handle = runtime.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut elapsed = 0u64;
            loop {
                interval.tick().await;
                elapsed = elapsed.saturating_add(1);
                if tx.send(elapsed).is_err() {
                    break
                }
            }
        });
        Some(Self {
            handle,
            ticks,
            seen: 0,
        })
    }

    /// Waits for the next tick and returns how many periods passed since the previous call.
    /// Returns `None` once the tick task is gone.
    pub async fn elapsed(&mut self) -> Option<u64> {
        self.ticks.changed().await.ok()?;
        let total = *self.ticks.borrow_and_update();
        let elapsed = total.saturating_sub(self.seen);
        self.seen = total;
        Some(elapsed)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    #[cfg(test)]
    pub(crate) fn subscribe(&self) -> watch::Receiver<u64> {
        self.ticks.clone()
    }

    pub fn cancel(self) {
        drop(self)
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Withdrawal lock of one farm, kept up to date by a one-second tick while locked.
#[derive(Debug)]
pub struct LockCountdown {
    schedule: LockSchedule,
    period: Duration,
    state: LockState,
    last_deposit_time: Timestamp,
    pool_id: Option<PoolId>,
    timer: Option<CountdownTimer>,
}

impl LockCountdown {
    pub fn new(schedule: LockSchedule, period: Duration) -> Self {
        let period = if period.is_zero() {
            warn!("zero countdown period, using {}ms", DEFAULT_TICK_INTERVAL_MS);
            Duration::from_millis(DEFAULT_TICK_INTERVAL_MS)
        } else {
            period
        };
        Self {
            schedule,
            period,
            state: LockState::default(),
            last_deposit_time: 0,
            pool_id: None,
            timer: None,
        }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn schedule(&self) -> &LockSchedule {
        &self.schedule
    }

    /// Whether a tick is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Re-evaluates the lock at `now` for a (possibly new) deposit.
    ///
    /// A running timer for the same deposit keeps ticking while the deposit stays locked.
    /// Otherwise the old timer is cancelled and a new one started if the deposit is locked.
    pub fn refresh(&mut self, last_deposit_time: Timestamp, pool_id: PoolId, now: Timestamp) -> LockState {
        let state = LockState::evaluate(last_deposit_time, self.schedule.lock_duration(pool_id), now);
        let same_deposit =
            self.last_deposit_time == last_deposit_time && self.pool_id == Some(pool_id);

        if same_deposit && self.is_running() && state.is_locked {
            self.state = state;
            return self.state
        }

        self.cancel();
        self.last_deposit_time = last_deposit_time;
        self.pool_id = Some(pool_id);
        self.state = state;

        if self.state.is_locked {
            self.start_timer();
            info!(
                "pool {}: withdrawals locked for {}s",
                pool_id, self.state.seconds_remaining
            );
        }
        self.state
    }

    /// Advances the countdown by one tick. Stops the timer once the lock clears.
    pub fn on_tick(&mut self) -> LockState {
        self.advance(1)
    }

    /// Waits for the next tick of the running countdown and applies every period elapsed since
    /// the last call. Returns `None` if no countdown is running.
    pub async fn next_tick(&mut self) -> Option<LockState> {
        let elapsed = match self.timer.as_mut() {
            Some(timer) => timer.elapsed().await,
            None => return None,
        };
        match elapsed {
            Some(ticks) => Some(self.advance(ticks)),
            None => {
                self.timer = None;
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!("cancelling countdown of pool {:?}", self.pool_id);
            timer.cancel();
        }
    }

    fn advance(&mut self, ticks: u64) -> LockState {
        for _ in 0..ticks.min(self.state.seconds_remaining) {
            self.state = self.state.tick();
        }
        if !self.state.is_locked && self.is_running() {
            info!("pool {:?}: withdrawal lock released", self.pool_id);
            self.cancel();
        }
        self.state
    }

    fn start_timer(&mut self) {
        self.timer = CountdownTimer::start(self.period);
        if self.timer.is_none() {
            warn!("no tokio runtime, withdrawal countdown will not tick");
        }
    }

    #[cfg(test)]
    pub(crate) fn timer(&self) -> Option<&CountdownTimer> {
        self.timer.as_ref()
    }
}
