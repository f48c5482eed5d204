use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::DashboardError;

/// A write in flight: the contract function and its rendered arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCall {
    pub function: &'static str,
    pub args: Vec<String>,
}

impl PendingCall {
    pub fn new(function: &'static str, args: Vec<String>) -> Self {
        Self { function, args }
    }
}

impl fmt::Display for PendingCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.function, self.args.join(", "))
    }
}

/// Shared one-at-a-time gate for writes. Clones observe the same slot, so a
/// renderer can see the in-flight call while an action awaits it.
#[derive(Clone, Debug, Default)]
pub struct PendingSlot {
    inner: Arc<Mutex<Option<PendingCall>>>,
}

impl PendingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `call`. Released when the guard drops, on every exit path.
    pub fn begin(&self, call: PendingCall) -> Result<PendingGuard, DashboardError> {
        let mut slot = self.lock();
        if slot.is_some() {
            return Err(DashboardError::ActionPending);
        }
        *slot = Some(call);
        Ok(PendingGuard { slot: self.clone() })
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    pub fn current(&self) -> Option<PendingCall> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<PendingCall>> {
        // The slot holds plain data; a poisoned lock still has a usable value.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug)]
pub struct PendingGuard {
    slot: PendingSlot,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_call_at_a_time() {
        let slot = PendingSlot::new();
        let guard = slot.begin(PendingCall::new("deposit", vec!["1".into()])).unwrap();
        assert!(slot.is_pending());
        assert_eq!(
            slot.begin(PendingCall::new("claimMonthlyPension", vec![])).unwrap_err(),
            DashboardError::ActionPending
        );
        assert_eq!(slot.current().unwrap().to_string(), "deposit(1)");
        drop(guard);
        assert!(!slot.is_pending());
        assert!(slot.begin(PendingCall::new("claimMonthlyPension", vec![])).is_ok());
    }

    #[test]
    fn clones_share_state() {
        let slot = PendingSlot::new();
        let observer = slot.clone();
        let _guard = slot.begin(PendingCall::new("setBeneficiary", vec![])).unwrap();
        assert!(observer.is_pending());
    }
}
