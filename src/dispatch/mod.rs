//! Readiness multiplexing: conditions and the wait set.
//!
//! ## Contents
//! - [`Condition`], [`ReadCondition`] — per-stream readiness plus the
//!   drain-and-handle step
//! - [`WaitSet`] — blocks on all attached conditions at once, dispatches the
//!   ready ones
//!
//! See `subscriber.rs` for the loop that drives a wait set to termination.

mod condition;
mod waitset;

pub use condition::{Condition, Handler, ReadCondition};
pub use waitset::WaitSet;
