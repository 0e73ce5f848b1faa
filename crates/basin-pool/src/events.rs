//! Append-only pool event log
//!
//! Written only after a successful transition, outside the reserve lock.

use std::sync::Mutex;

use crate::state::PoolEvent;

/// Append-only event log, internally synchronized
#[derive(Default)]
pub struct EventLog {
    entries: Mutex<Vec<PoolEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&self, event: PoolEvent) {
        self.lock().push(event);
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the full log, oldest first
    pub fn snapshot(&self) -> Vec<PoolEvent> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PoolEvent>> {
        self.entries.lock().expect("event log lock poisoned")
    }
}
