//! # Concentration Series
//!
//! [`SeriesStore`] is the only shared mutable state of the pipeline: the
//! history of concentration estimates with their receipt times, plus the raw
//! current/voltage trace of the most recent batch.
//!
//! All access goes through one `RwLock`. Writers hold it for the duration of a
//! single append, so a reader always observes both histories at the same
//! length. The latest-trace vectors are replaced wholesale on every append;
//! they are never merged with the previous batch.

mod store;

#[cfg(test)]
mod tests;

pub use store::{SeriesSnapshot, SeriesStore};
