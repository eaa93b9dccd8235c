//! Delivered sample model: valid payload data or a stream lifecycle change.

use std::fmt;

/// One delivered unit from a reader.
///
/// Most samples carry valid payload data. When the set of writers for a topic
/// changes in a way the reader should know about, the broker injects a
/// [`Sample::State`] instead; state samples are observed but never counted as
/// received data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sample<T> {
    /// Valid payload published by a writer.
    Valid(T),
    /// Lifecycle change on the stream; carries no payload.
    State(StreamState),
}

impl<T> Sample<T> {
    /// True for [`Sample::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Sample::Valid(_))
    }
}

/// Lifecycle states a stream can transition into.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Every writer for the topic has been dropped.
    WritersGone,
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamState::WritersGone => write!(f, "no remaining writers"),
        }
    }
}
