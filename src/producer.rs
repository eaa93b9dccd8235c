//! # Producer loop: periodic publication of both streams.
//!
//! Each iteration publishes one random fortune and one snapshot of the
//! rotating byte frame, rotates the frame, and sleeps out the publish
//! interval. The sleep is a wait on the cancellation token with a timeout, so
//! shutdown latency is bounded by one interval at worst and usually far less.
//!
//! ```text
//! while written < budget and not cancelled:
//!     publish fortune (uniform random pick)
//!     publish frame snapshot
//!     rotate frame left by one
//!     written += 1
//!     sleep interval | cancelled ──► break
//! ```
//!
//! Publish failures are fatal for the run: they propagate with `?`, no retry.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::broker::{Broker, Writer};
use crate::config::RunConfig;
use crate::error::BrokerError;
use crate::fortunes::FortuneStore;
use crate::frame::ByteFrame;
use crate::{FORTUNE_TOPIC, FRAME_TOPIC};

/// Pacing between publish cycles; matches the demo's historical 3-second
/// cadence. Pacing only, not a correctness requirement.
pub const DEFAULT_PUBLISH_INTERVAL: Duration = Duration::from_secs(3);

/// Publishes the fortune and frame streams until the budget is spent or the
/// run is cancelled.
pub struct Producer {
    fortunes: Writer<String>,
    frames: Writer<Vec<u8>>,
    store: FortuneStore,
    frame: ByteFrame,
    budget: u32,
    interval: Duration,
}

impl Producer {
    /// Creates writers for both topics on `broker`.
    pub fn new(broker: &Broker, cfg: &RunConfig, store: FortuneStore) -> Result<Self, BrokerError> {
        Ok(Self {
            fortunes: broker.writer(FORTUNE_TOPIC)?,
            frames: broker.writer(FRAME_TOPIC)?,
            store,
            frame: ByteFrame::new(),
            budget: cfg.sample_count,
            interval: DEFAULT_PUBLISH_INTERVAL,
        })
    }

    /// Overrides the publish interval (tests use short ones).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs the publication loop; returns how many cycles completed.
    ///
    /// Cancellation is checked at each iteration boundary and interrupts the
    /// pacing sleep. Dropping the writers on return lets subscribers observe
    /// the streams going quiet.
    pub async fn run(mut self, token: CancellationToken) -> Result<u32, BrokerError> {
        let mut written = 0u32;
        while written < self.budget && !token.is_cancelled() {
            let fortune = self.store.pick(&mut rand::rng()).to_owned();
            self.fortunes.publish(fortune)?;
            self.frames.publish(self.frame.snapshot())?;
            self.frame.rotate();
            written += 1;

            tokio::select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use crate::broker::Sample;
    use crate::config::Verbosity;

    fn config(samples: u32) -> RunConfig {
        RunConfig {
            domain_id: 0,
            sample_count: samples,
            verbosity: Verbosity::Silent,
        }
    }

    #[tokio::test]
    async fn publishes_budget_pairs_then_stops() {
        let broker = Broker::new(0);
        let mut fortunes = broker.reader::<String>(FORTUNE_TOPIC).unwrap();
        let mut frames = broker.reader::<Vec<u8>>(FRAME_TOPIC).unwrap();

        let producer = Producer::new(&broker, &config(3), FortuneStore::defaults())
            .unwrap()
            .with_interval(Duration::from_millis(1));
        let written = producer.run(CancellationToken::new()).await.unwrap();
        assert_eq!(written, 3);

        let fortune_batch = fortunes.take_available();
        let valid_fortunes = fortune_batch.iter().filter(|s| s.is_valid()).count();
        assert_eq!(valid_fortunes, 3);

        let frame_batch = frames.take_available();
        let valid_frames = frame_batch.iter().filter(|s| s.is_valid()).count();
        assert_eq!(valid_frames, 3);
    }

    #[tokio::test]
    async fn published_frames_show_the_rotation() {
        let broker = Broker::new(0);
        let mut frames = broker.reader::<Vec<u8>>(FRAME_TOPIC).unwrap();

        let producer = Producer::new(&broker, &config(2), FortuneStore::defaults())
            .unwrap()
            .with_interval(Duration::from_millis(1));
        producer.run(CancellationToken::new()).await.unwrap();

        let batch = frames.take_available();
        let Sample::Valid(first) = &batch[0] else {
            panic!("expected valid frame");
        };
        let Sample::Valid(second) = &batch[1] else {
            panic!("expected valid frame");
        };
        assert_eq!(first[0], 0);
        assert_eq!(second[0], 1);
        assert_eq!(second[255], 0);
    }

    #[tokio::test]
    async fn published_fortunes_come_from_the_store() {
        let broker = Broker::new(0);
        let mut fortunes = broker.reader::<String>(FORTUNE_TOPIC).unwrap();

        let store = FortuneStore::defaults();
        let producer = Producer::new(&broker, &config(5), store.clone())
            .unwrap()
            .with_interval(Duration::from_millis(1));
        producer.run(CancellationToken::new()).await.unwrap();

        for sample in fortunes.take_available() {
            if let Sample::Valid(fortune) = sample {
                assert!(store.fortunes().iter().any(|f| *f == fortune));
            }
        }
    }

    #[tokio::test]
    async fn cancellation_interrupts_the_pacing_sleep() {
        let broker = Broker::new(0);
        let token = CancellationToken::new();

        let producer = Producer::new(&broker, &config(u32::MAX), FortuneStore::defaults())
            .unwrap()
            .with_interval(Duration::from_secs(60));

        let cancel = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            cancel.cancel();
        });

        let started = Instant::now();
        let written = producer.run(token).await.unwrap();
        assert_eq!(written, 1);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn pre_cancelled_token_publishes_nothing() {
        let broker = Broker::new(0);
        let token = CancellationToken::new();
        token.cancel();

        let producer = Producer::new(&broker, &config(10), FortuneStore::defaults()).unwrap();
        let written = producer.run(token).await.unwrap();
        assert_eq!(written, 0);
    }
}
