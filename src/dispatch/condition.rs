//! # Read conditions: readiness + handler for one stream.
//!
//! A [`ReadCondition`] binds one [`Reader`] to one handler. Attached to a
//! [`WaitSet`](crate::dispatch::WaitSet), it contributes a readiness future
//! (`armed`) the set can block on, and a synchronous `dispatch` step that
//! drains everything currently available for the stream and runs the handler
//! once over the drained batch.
//!
//! ## Rules
//! - Readiness is **level-triggered**: `dispatch` drains the pre-read sample
//!   *and* everything `take_available` returns, not just one item. Partial
//!   drains could leave the stream's readiness permanently satisfied and
//!   starve the other conditions' turn.
//! - The handler runs to completion on the dispatch call; it is never invoked
//!   for an empty batch.
//! - Batch order is delivery order for the stream.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::broker::{Reader, Sample};

/// Object-safe surface the wait set drives.
///
/// One implementation per stream kind; the wait set owns conditions as
/// `Box<dyn Condition>`, which is what lets it multiplex streams of different
/// payload types behind one blocking call.
#[async_trait]
pub trait Condition: Send {
    /// Resolves once at least one sample is buffered for this condition.
    ///
    /// Must be cancel-safe: the wait set races all conditions and drops the
    /// losing futures. A condition whose stream can produce nothing more must
    /// pend forever instead of resolving, so it never wins the race again.
    async fn armed(&mut self);

    /// Drains all currently available samples and runs the handler once.
    ///
    /// Returns the number of samples handed to the handler; zero means the
    /// handler was not invoked.
    fn dispatch(&mut self) -> usize;
}

/// Handler invoked with each drained batch.
pub type Handler<T> = Box<dyn FnMut(Vec<Sample<T>>) + Send>;

/// Binds one reader to one handler.
pub struct ReadCondition<T> {
    reader: Reader<T>,
    /// Samples consumed while arming, awaiting the next dispatch.
    pending: VecDeque<Sample<T>>,
    handler: Handler<T>,
}

impl<T: Clone + Send + 'static> ReadCondition<T> {
    /// Creates a condition over `reader` that feeds `handler`.
    pub fn new(reader: Reader<T>, handler: impl FnMut(Vec<Sample<T>>) + Send + 'static) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            handler: Box::new(handler),
        }
    }

    /// Topic of the underlying reader.
    pub fn topic(&self) -> &str {
        self.reader.topic()
    }
}

#[async_trait]
impl<T: Clone + Send + 'static> Condition for ReadCondition<T> {
    async fn armed(&mut self) {
        if !self.pending.is_empty() {
            return;
        }
        match self.reader.recv().await {
            Some(sample) => self.pending.push_back(sample),
            // Stream can produce nothing more; never win the race again.
            None => futures::future::pending::<()>().await,
        }
    }

    fn dispatch(&mut self) -> usize {
        let mut batch: Vec<Sample<T>> = self.pending.drain(..).collect();
        batch.extend(self.reader.take_available());
        let delivered = batch.len();
        if delivered > 0 {
            (self.handler)(batch);
        }
        delivered
    }
}
