use std::sync::{
    atomic::{
        AtomicBool,
        Ordering,
    },
    Arc,
};

use crate::error::InFlightError;

/// Marks an enable transaction as submitted and not yet settled.
///
/// Clones share the same flag.
#[derive(Debug, Default, Clone)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    /// Sets the flag. Must fail if it is already set.
    pub fn lock(&self) -> Result<InFlightGuard, InFlightError> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| InFlightError::AlreadyInFlight)?;
        Ok(InFlightGuard(self.0.clone()))
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears the in-flight flag when dropped.
#[derive(Debug)]
pub struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
