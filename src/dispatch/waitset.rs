//! # Wait set: one blocking call over many stream conditions.
//!
//! [`WaitSet`] is the subscriber's multiplexer. It owns every attached
//! [`Condition`] and exposes a single operation,
//! [`wait_and_dispatch`](WaitSet::wait_and_dispatch), that blocks until at
//! least one condition is ready or a timeout elapses, then runs the handler of
//! every ready condition before returning.
//!
//! ```text
//! wait_and_dispatch(timeout)
//!     │
//!     ├─ race: condition[0].armed() ┐
//!     │        condition[1].armed() ├─ select_all, bounded by timeout
//!     │        condition[N].armed() ┘
//!     │
//!     ├─ timeout, nothing ready ──► 0 delivered (caller re-checks and re-waits)
//!     │
//!     └─ someone ready ──► for each condition, in attachment order:
//!                              dispatch(): drain all + run handler once
//! ```
//!
//! ## Rules
//! - A timeout with nothing ready is **not** an error; the caller's loop
//!   re-evaluates its termination predicate and waits again. The bounded
//!   timeout is what keeps shutdown latency bounded.
//! - Ready handlers run synchronously, in attachment order, to completion
//!   before the call returns.
//! - Conditions are attached by value; ownership transfer makes attaching the
//!   same condition twice unrepresentable.

use std::time::Duration;

use futures::future;

use crate::dispatch::Condition;

/// Owns the attached conditions and multiplexes their readiness.
#[derive(Default)]
pub struct WaitSet {
    conditions: Vec<Box<dyn Condition>>,
}

impl WaitSet {
    /// Creates an empty wait set.
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Attaches a condition; dispatch order is attachment order.
    pub fn attach(&mut self, condition: impl Condition + 'static) {
        self.conditions.push(Box::new(condition));
    }

    /// Number of attached conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// True if no conditions are attached.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Blocks until a condition is ready or `timeout` elapses, then dispatches
    /// every ready condition. Returns the total number of samples delivered
    /// across all handlers (0 on timeout).
    ///
    /// An empty wait set just sleeps out the timeout.
    pub async fn wait_and_dispatch(&mut self, timeout: Duration) -> usize {
        if self.conditions.is_empty() {
            tokio::time::sleep(timeout).await;
            return 0;
        }

        let woke = {
            let armed: Vec<_> = self.conditions.iter_mut().map(|c| c.armed()).collect();
            tokio::time::timeout(timeout, future::select_all(armed))
                .await
                .is_ok()
        };
        if !woke {
            return 0;
        }

        // One wakeup may have made several conditions ready; give each its
        // turn in attachment order. Not-ready conditions dispatch as a no-op.
        self.conditions.iter_mut().map(|c| c.dispatch()).sum()
    }
}
