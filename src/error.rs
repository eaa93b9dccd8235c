//! Error types used by the broker and the demo configuration.
//!
//! Two enums cover the failure taxonomy:
//!
//! - [`BrokerError`] — transport faults. These are fatal for the current run:
//!   callers propagate them with `?` up to the top level, where a single
//!   diagnostic line is printed and the process exits with failure status.
//! - [`ConfigError`] — command-line argument problems. Reported with a usage
//!   message; never retried.
//!
//! Both provide `as_label` for stable snake_case identifiers in logs.

use thiserror::Error;

/// Errors produced by the loopback broker.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BrokerError {
    /// A topic was requested under a payload type different from the one it
    /// was created with. Topics are typed at first use; both endpoints of a
    /// topic must agree on the payload.
    #[error("topic {topic:?} already exists with a different payload type")]
    TopicTypeMismatch {
        /// Name of the conflicting topic.
        topic: String,
    },
}

impl BrokerError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            BrokerError::TopicTypeMismatch { .. } => "broker_topic_type_mismatch",
        }
    }
}

/// Errors produced while parsing command-line arguments.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An argument that is not a recognized flag.
    #[error("unknown argument {arg:?}")]
    UnknownArgument {
        /// The offending argument as given.
        arg: String,
    },

    /// A flag that requires a value was given without one.
    #[error("{flag} requires a value")]
    MissingValue {
        /// The flag missing its value.
        flag: String,
    },

    /// A flag value that could not be parsed.
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue {
        /// The flag whose value was rejected.
        flag: String,
        /// The rejected value as given.
        value: String,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::UnknownArgument { .. } => "config_unknown_argument",
            ConfigError::MissingValue { .. } => "config_missing_value",
            ConfigError::InvalidValue { .. } => "config_invalid_value",
        }
    }
}
