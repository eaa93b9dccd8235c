//! # Shared sample tally: the cross-handler counter and its guard.
//!
//! [`SampleTally`] is the one piece of mutable state shared by the stream
//! handlers. A single mutex scopes every read-modify-write of the counters
//! *and* every formatted-output emission a handler performs, so output lines
//! never interleave and increments are never lost even if the handlers run
//! concurrently.
//!
//! ## Rules
//! - Counters only increase.
//! - The output closure runs inside the critical section; keep it cheap
//!   (formatting can be done by the caller beforehand).
//! - The lock is released on every exit path, including a panicking emit
//!   closure; a poisoned lock is recovered rather than propagated, since the
//!   counters cannot be left mid-update.

use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    samples: u64,
    state_changes: u64,
}

/// Monotonic tally of received samples, guarded by one mutex.
#[derive(Debug, Default)]
pub struct SampleTally {
    counts: Mutex<Counts>,
}

impl SampleTally {
    /// Creates a tally at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one valid sample: runs `emit` and increments the sample count
    /// inside the critical section. Returns the new count.
    pub fn record(&self, emit: impl FnOnce()) -> u64 {
        let mut counts = self.lock();
        emit();
        counts.samples += 1;
        counts.samples
    }

    /// Records one lifecycle change: runs `emit` and increments the
    /// state-change count inside the critical section. The sample count is
    /// untouched.
    pub fn observe(&self, emit: impl FnOnce()) -> u64 {
        let mut counts = self.lock();
        emit();
        counts.state_changes += 1;
        counts.state_changes
    }

    /// Valid samples recorded so far.
    pub fn count(&self) -> u64 {
        self.lock().samples
    }

    /// Lifecycle changes observed so far.
    pub fn state_changes(&self) -> u64 {
        self.lock().state_changes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Counts> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
