//! Subscribing endpoint for one typed topic.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use crate::broker::Sample;

/// Destructive-read subscriber attached to one topic.
///
/// A reader observes samples published after it attached, in publish order.
/// If it lags behind the topic's ring capacity, the overwritten samples are
/// skipped; the remaining ones are still delivered in order.
#[derive(Debug)]
pub struct Reader<T> {
    topic: String,
    rx: broadcast::Receiver<Sample<T>>,
}

impl<T: Clone + Send + 'static> Reader<T> {
    pub(crate) fn attach(topic: &str, rx: broadcast::Receiver<Sample<T>>) -> Self {
        Self {
            topic: topic.to_string(),
            rx,
        }
    }

    /// Topic this reader is attached to.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Drains everything currently buffered, without blocking.
    ///
    /// Returns an empty vector when nothing is buffered. Lag gaps are skipped;
    /// the drain continues with whatever survived the ring.
    pub fn take_available(&mut self) -> Vec<Sample<T>> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(sample) => out.push(sample),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        out
    }

    /// Awaits the next sample.
    ///
    /// Returns `None` only if the topic channel itself is gone, which the
    /// loopback broker never does while the `Broker` is alive; callers treat
    /// `None` as "this stream will produce nothing more".
    pub async fn recv(&mut self) -> Option<Sample<T>> {
        loop {
            match self.rx.recv().await {
                Ok(sample) => return Some(sample),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
