//! # Measurement Batches
//!
//! A batch is one uploaded sweep from the potentiostat: a header line followed
//! by rows of `index, current, voltage, elapsed_ms`. This module holds the
//! decoded form of a batch and the [`BatchParser`] that produces it.
//!
//! The decoded batch is stored column-wise (parallel vectors aligned by
//! accepted-row order), which is the layout the peak locator and the series
//! store both consume.

pub mod parser;


pub use parser::{BatchParser, ParseReport, SkipReason, SkippedRow};

use serde::{Deserialize, Serialize};

/// A single accepted row of a measurement batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Sample index as reported by the instrument
    pub index: i64,
    /// Working-electrode current
    pub current: f64,
    /// Applied voltage in volts
    pub voltage: f64,
    /// Elapsed time since the start of the sweep in milliseconds
    pub elapsed_ms: f64,
}

/// Decoded measurement batch in parallel-column layout.
///
/// Invariant: all four columns have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementBatch {
    indices: Vec<i64>,
    currents: Vec<f64>,
    voltages: Vec<f64>,
    elapsed_ms: Vec<f64>,
}

impl MeasurementBatch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty batch with room for `capacity` samples
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            currents: Vec::with_capacity(capacity),
            voltages: Vec::with_capacity(capacity),
            elapsed_ms: Vec::with_capacity(capacity),
        }
    }

    /// Append one sample to every column
    pub fn push(&mut self, sample: Sample) {
        self.indices.push(sample.index);
        self.currents.push(sample.current);
        self.voltages.push(sample.voltage);
        self.elapsed_ms.push(sample.elapsed_ms);
    }

    /// Number of samples in the batch
    pub fn len(&self) -> usize {
        self.currents.len()
    }

    /// True when no row of the upload was accepted
    pub fn is_empty(&self) -> bool {
        self.currents.is_empty()
    }

    /// Sample indices column
    pub fn indices(&self) -> &[i64] {
        &self.indices
    }

    /// Current column
    pub fn currents(&self) -> &[f64] {
        &self.currents
    }

    /// Voltage column
    pub fn voltages(&self) -> &[f64] {
        &self.voltages
    }

    /// Elapsed-time column in milliseconds
    pub fn elapsed_ms(&self) -> &[f64] {
        &self.elapsed_ms
    }

    /// Row view at `position`, if present
    pub fn sample(&self, position: usize) -> Option<Sample> {
        Some(Sample {
            index: *self.indices.get(position)?,
            current: *self.currents.get(position)?,
            voltage: *self.voltages.get(position)?,
            elapsed_ms: *self.elapsed_ms.get(position)?,
        })
    }

    /// Iterate over the rows of the batch
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(move |i| self.sample(i))
    }

    /// Split into owned `(currents, voltages)` columns
    pub fn into_signal_columns(self) -> (Vec<f64>, Vec<f64>) {
        (self.currents, self.voltages)
    }
}

impl FromIterator<Sample> for MeasurementBatch {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut batch = Self::with_capacity(iter.size_hint().0);
        for sample in iter {
            batch.push(sample);
        }
        batch
    }
}
