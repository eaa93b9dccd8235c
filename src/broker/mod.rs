//! Loopback pub/sub transport: typed topics, endpoints, and the sample model.
//!
//! ## Contents
//! - [`Broker`] — per-domain topic registry (get-or-create, typed at first use)
//! - [`Writer`] / [`Reader`] — publishing and subscribing endpoints
//! - [`Sample`], [`StreamState`] — delivered units: valid data or lifecycle
//!   changes
//!
//! The readiness/dispatch side (conditions and the wait set) lives in
//! [`crate::dispatch`]; this module only moves samples.

mod domain;
mod reader;
mod sample;
mod writer;

pub use domain::{Broker, TOPIC_CAPACITY};
pub use reader::Reader;
pub use sample::{Sample, StreamState};
pub use writer::Writer;
