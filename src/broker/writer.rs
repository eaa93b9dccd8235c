//! Publishing endpoint for one typed topic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::broker::domain::TopicChannel;
use crate::broker::{Sample, StreamState};
use crate::error::BrokerError;

/// Fire-and-forget publisher attached to one topic.
///
/// Publishing never blocks. Dropping the last writer of a topic injects a
/// single [`StreamState::WritersGone`] sample so attached readers can observe
/// the stream going quiet.
pub struct Writer<T> {
    topic: String,
    tx: broadcast::Sender<Sample<T>>,
    writers: Arc<AtomicUsize>,
}

impl<T: Clone + Send + 'static> Writer<T> {
    pub(crate) fn attach(topic: &str, channel: TopicChannel<T>) -> Self {
        channel.writers.fetch_add(1, Ordering::AcqRel);
        Self {
            topic: topic.to_string(),
            tx: channel.tx,
            writers: channel.writers,
        }
    }

    /// Topic this writer publishes to.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Publishes one sample; returns how many readers it was delivered to.
    ///
    /// Zero attached readers is not a failure: the sample is dropped, matching
    /// best-effort transport semantics. The `Result` is the transport
    /// contract; the loopback realization has no failing publish path.
    pub fn publish(&self, value: T) -> Result<usize, BrokerError> {
        Ok(self.tx.send(Sample::Valid(value)).unwrap_or(0))
    }
}

impl<T> Drop for Writer<T> {
    fn drop(&mut self) {
        if self.writers.fetch_sub(1, Ordering::AcqRel) == 1 {
            let _ = self.tx.send(Sample::State(StreamState::WritersGone));
        }
    }
}
