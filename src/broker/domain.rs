//! # Loopback broker: typed topics over broadcast channels.
//!
//! [`Broker`] plays the role of a domain participant for the demo: a registry
//! of named, typed topics that producer and subscriber sides attach to
//! independently. Each topic is a [`tokio::sync::broadcast`] channel of
//! [`Sample<T>`] values.
//!
//! ```text
//! Broker (topic registry, one per domain)
//!   ├─ "fortunes" ── broadcast<Sample<String>>  ──► Reader<String>
//!   │        ▲                                  ──► Reader<String> (N readers)
//!   │    Writer<String>::publish
//!   └─ "frames"   ── broadcast<Sample<Vec<u8>>> ──► Reader<Vec<u8>>
//!            ▲
//!        Writer<Vec<u8>>::publish
//! ```
//!
//! ## Rules
//! - **Typed topics**: the payload type is fixed at first use; re-requesting a
//!   topic under another type is [`BrokerError::TopicTypeMismatch`].
//! - **Best-effort**: publishing with no attached readers silently drops the
//!   sample; readers only observe samples published after they attach.
//! - **Bounded buffering**: each topic keeps the most recent
//!   [`TOPIC_CAPACITY`] samples; a lagging reader skips what the ring
//!   overwrote.
//! - **Writer liveness**: the broker counts writers per topic. When the last
//!   writer drops, one [`StreamState::WritersGone`] sample is injected so
//!   readers can observe the transition.

use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;

use crate::broker::{Reader, Sample, Writer};
use crate::error::BrokerError;

/// Ring capacity of each topic channel.
pub const TOPIC_CAPACITY: usize = 256;

/// Shared state of one typed topic.
pub(crate) struct TopicChannel<T> {
    pub(crate) tx: broadcast::Sender<Sample<T>>,
    /// Live writer count; the last writer to drop injects `WritersGone`.
    pub(crate) writers: Arc<AtomicUsize>,
}

impl<T> Clone for TopicChannel<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            writers: Arc::clone(&self.writers),
        }
    }
}

/// In-process pub/sub transport for one domain.
pub struct Broker {
    domain_id: u32,
    topics: Mutex<HashMap<String, Box<dyn Any + Send + Sync>>>,
}

impl Broker {
    /// Creates an empty broker for the given domain.
    pub fn new(domain_id: u32) -> Self {
        Self {
            domain_id,
            topics: Mutex::new(HashMap::new()),
        }
    }

    /// Domain this broker was created for.
    pub fn domain_id(&self) -> u32 {
        self.domain_id
    }

    /// Creates a publishing endpoint for `topic`, creating the topic on first
    /// use.
    pub fn writer<T>(&self, topic: &str) -> Result<Writer<T>, BrokerError>
    where
        T: Clone + Send + 'static,
    {
        let channel = self.channel::<T>(topic)?;
        Ok(Writer::attach(topic, channel))
    }

    /// Creates a subscribing endpoint for `topic`, creating the topic on first
    /// use. The reader observes only samples published after this call.
    pub fn reader<T>(&self, topic: &str) -> Result<Reader<T>, BrokerError>
    where
        T: Clone + Send + 'static,
    {
        let channel = self.channel::<T>(topic)?;
        Ok(Reader::attach(topic, channel.tx.subscribe()))
    }

    /// Looks up or creates the typed channel behind `topic`.
    fn channel<T>(&self, topic: &str) -> Result<TopicChannel<T>, BrokerError>
    where
        T: Clone + Send + 'static,
    {
        let mut topics = self
            .topics
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match topics.entry(topic.to_string()) {
            Entry::Occupied(slot) => slot
                .get()
                .downcast_ref::<TopicChannel<T>>()
                .cloned()
                .ok_or_else(|| BrokerError::TopicTypeMismatch {
                    topic: topic.to_string(),
                }),
            Entry::Vacant(slot) => {
                let (tx, _rx) = broadcast::channel::<Sample<T>>(TOPIC_CAPACITY);
                let channel = TopicChannel {
                    tx,
                    writers: Arc::new(AtomicUsize::new(0)),
                };
                slot.insert(Box::new(channel.clone()));
                Ok(channel)
            }
        }
    }
}
