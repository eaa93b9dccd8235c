//! # fortunecast
//!
//! **fortunecast** is a minimal two-party publish/subscribe demonstration:
//! a producer periodically emits two independent streams (a rotating textual
//! fortune and a rotating 256-byte frame); a subscriber multiplexes both
//! through a single wait primitive and tallies received samples until a
//! target count is reached or shutdown is requested.
//!
//! ## Architecture
//! ```text
//!  Producer loop                          Subscriber dispatch loop
//!  ─────────────                          ────────────────────────
//!  pick fortune ──► Writer<String> ─┐     ┌─► ReadCondition<String> ─► handler
//!  frame snapshot ► Writer<Vec<u8>> ┤     │                              │
//!  rotate frame                     │     │                              ▼
//!  interruptible 3s sleep           ▼     │                        SampleTally
//!                               Broker ───┤                      (mutex: count +
//!                        (typed topics,   │                       output emission)
//!                     broadcast channels) │                              ▲
//!                                         └─► ReadCondition<Vec<u8>> ─► handler
//!                                         ▲
//!                              WaitSet::wait_and_dispatch(1s)
//!                     (level-triggered: ready conditions drain fully)
//!
//!  CancellationToken ◄── OS signal (SIGINT/SIGTERM/SIGQUIT)
//!  polled by both loops at every iteration boundary
//! ```
//!
//! ## Termination
//! - Producer: budget spent, or token cancelled (pacing sleep is
//!   interruptible).
//! - Subscriber: tally reached the budget, or token cancelled; the bounded
//!   dispatch timeout caps how long either check can be deferred.
//!
//! ## Example
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use fortunecast::{Broker, FortuneStore, Producer, RunConfig, Subscriber};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = RunConfig {
//!         sample_count: 6,
//!         ..RunConfig::default()
//!     };
//!     let broker = Broker::new(cfg.domain_id);
//!     let token = CancellationToken::new();
//!     fortunecast::cancel_on_signal(token.clone());
//!
//!     // Readers must attach before the first publish.
//!     let subscriber = Subscriber::new(&broker, &cfg)?;
//!     let producer = Producer::new(
//!         &broker,
//!         &RunConfig { sample_count: 3, ..cfg },
//!         FortuneStore::load("fortunes"),
//!     )?;
//!
//!     let receiving = tokio::spawn(subscriber.run(token.clone()));
//!     producer.run(token).await?;
//!     println!("received {} samples", receiving.await?);
//!     Ok(())
//! }
//! ```

mod broker;
mod config;
mod dispatch;
mod error;
mod fortunes;
mod frame;
mod producer;
mod shutdown;
mod subscriber;
mod tally;

// ---- Public re-exports ----

pub use broker::{Broker, Reader, Sample, StreamState, Writer, TOPIC_CAPACITY};
pub use config::{parse_args, DemoArgs, RunConfig, Verbosity, USAGE};
pub use dispatch::{Condition, Handler, ReadCondition, WaitSet};
pub use error::{BrokerError, ConfigError};
pub use fortunes::{parse_blocks, FortuneStore, DEFAULT_FORTUNES};
pub use frame::{ByteFrame, FRAME_LEN};
pub use producer::{Producer, DEFAULT_PUBLISH_INTERVAL};
pub use shutdown::cancel_on_signal;
pub use subscriber::{format_frame, Subscriber, DEFAULT_DISPATCH_TIMEOUT};
pub use tally::SampleTally;

/// Topic carrying the fortune stream.
pub const FORTUNE_TOPIC: &str = "fortunes";
/// Topic carrying the byte-frame stream.
pub const FRAME_TOPIC: &str = "frames";
