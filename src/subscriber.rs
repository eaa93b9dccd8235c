//! # Subscriber: dispatch loop over both streams.
//!
//! Wires one [`ReadCondition`] per stream into a [`WaitSet`], hands each a
//! handler that classifies the drained batch, and drives the wait set until
//! the receive budget is met or the run is cancelled.
//!
//! ```text
//! while tally < budget and not cancelled:
//!     waitset.wait_and_dispatch(1s)
//!         ├─ fortune condition ready ─► drain ─► per sample:
//!         │       Valid(text)  ─► tally.record(print text)
//!         │       State(s)     ─► tally.observe(print state)
//!         └─ frame condition ready ──► drain ─► per sample:
//!                 Valid(bytes) ─► tally.record(print decimal bytes)
//!                 State(s)     ─► tally.observe(print state)
//! ```
//!
//! The 1-second dispatch timeout bounds how long a shutdown request can go
//! unnoticed while both streams are silent. Formatting happens before the
//! tally lock is taken; only the increment and the actual output emission run
//! inside the critical section.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::broker::{Broker, Sample};
use crate::config::RunConfig;
use crate::dispatch::{ReadCondition, WaitSet};
use crate::error::BrokerError;
use crate::tally::SampleTally;
use crate::{FORTUNE_TOPIC, FRAME_TOPIC};

/// Upper bound on one blocked wait; keeps the termination predicate and the
/// cancellation flag checked at least this often.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(1);

/// Receives both streams until the budget is met or the run is cancelled.
pub struct Subscriber {
    waitset: WaitSet,
    tally: Arc<SampleTally>,
    budget: u32,
    timeout: Duration,
}

impl Subscriber {
    /// Creates readers for both topics on `broker` and wires the handlers.
    pub fn new(broker: &Broker, cfg: &RunConfig) -> Result<Self, BrokerError> {
        let tally = Arc::new(SampleTally::new());
        let mut waitset = WaitSet::new();

        let fortune_reader = broker.reader::<String>(FORTUNE_TOPIC)?;
        let fortune_tally = Arc::clone(&tally);
        waitset.attach(ReadCondition::new(fortune_reader, move |batch| {
            for sample in batch {
                match sample {
                    Sample::Valid(fortune) => {
                        let line = format!("fortune: {fortune}");
                        fortune_tally.record(|| println!("{line}"));
                    }
                    Sample::State(state) => {
                        let line = format!("fortune stream: {state}");
                        fortune_tally.observe(|| println!("{line}"));
                    }
                }
            }
        }));

        let frame_reader = broker.reader::<Vec<u8>>(FRAME_TOPIC)?;
        let frame_tally = Arc::clone(&tally);
        waitset.attach(ReadCondition::new(frame_reader, move |batch| {
            for sample in batch {
                match sample {
                    Sample::Valid(bytes) => {
                        let line = format!("frame: {}", format_frame(&bytes));
                        frame_tally.record(|| println!("{line}"));
                    }
                    Sample::State(state) => {
                        let line = format!("frame stream: {state}");
                        frame_tally.observe(|| println!("{line}"));
                    }
                }
            }
        }));

        Ok(Self {
            waitset,
            tally,
            budget: cfg.sample_count,
            timeout: DEFAULT_DISPATCH_TIMEOUT,
        })
    }

    /// Overrides the dispatch timeout (tests use short ones).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Handle to the shared tally, usable while and after the loop runs.
    pub fn tally(&self) -> Arc<SampleTally> {
        Arc::clone(&self.tally)
    }

    /// Drives the dispatch loop to termination; returns the final valid-sample
    /// count.
    ///
    /// The predicate is re-evaluated between waits, so a timed-out wait is
    /// just another lap, and a cancellation is honored within one timeout.
    pub async fn run(mut self, token: CancellationToken) -> u64 {
        while self.tally.count() < u64::from(self.budget) && !token.is_cancelled() {
            self.waitset.wait_and_dispatch(self.timeout).await;
        }
        self.tally.count()
    }
}

/// Renders a byte frame as decimal values in source order.
///
/// The default byte formatting would print the values as opaque, so the demo
/// spells them out: `{0, 1, 2, ...}`.
pub fn format_frame(bytes: &[u8]) -> String {
    let values: Vec<String> = bytes.iter().map(u8::to_string).collect();
    format!("{{{}}}", values.join(", "))
}
