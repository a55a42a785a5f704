//! Action area of a farm card.
//!
//! Decides which action widget to show (connect, enable or stake/harvest),
//! runs the "enable" approval and keeps the withdrawal lock countdown.

mod authorization;
mod config;
mod controller;
mod countdown;
mod error;
mod in_flight;
mod lock_state;
mod selector;
mod views;


pub use authorization::{
    is_approved,
    ApprovalOutcome,
    AuthorizationFlow,
};
pub use config::CardConfig;
pub use controller::{
    Collaborators,
    FarmActionController,
};
pub use countdown::{
    CountdownTimer,
    LockCountdown,
};
pub use error::{
    ConfigError,
    InFlightError,
};
pub use in_flight::{
    InFlight,
    InFlightGuard,
};
pub use lock_state::{
    LockSchedule,
    LockState,
};
pub use selector::{
    select,
    ViewKind,
};
pub use views::{
    ActionView,
    CardOptions,
    CardView,
    CountdownProps,
    HarvestProps,
    StakeActionProps,
};
