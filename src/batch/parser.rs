//! Delimited-text decoder for measurement batches.
//!
//! The first line of an upload is always a header and is discarded without
//! inspection. Every following row needs at least four fields:
//!
//! | column | meaning      | type            |
//! |--------|--------------|-----------------|
//! | 0      | sample index | integer         |
//! | 1      | current      | finite float    |
//! | 2      | voltage      | finite float    |
//! | 3      | elapsed ms   | finite float    |
//!
//! Extra trailing fields are ignored. Quote characters have no special
//! meaning, so a row never spans more than one line. Rows that fail any of
//! these checks are dropped and recorded in the [`ParseReport`]; they never
//! fail the parse.

use std::fmt;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use super::{MeasurementBatch, Sample};

/// Minimum number of fields in an accepted row
pub const MIN_FIELDS: usize = 4;

/// Why a row was dropped
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Fewer than [`MIN_FIELDS`] fields
    TooFewFields {
        /// Number of fields found on the row
        found: usize,
    },
    /// A field did not parse as a number
    InvalidNumber {
        /// Column name of the offending field
        column: &'static str,
        /// Raw field text
        value: String,
    },
    /// A field parsed but is NaN or infinite
    NonFinite {
        /// Column name of the offending field
        column: &'static str,
    },
    /// The row could not be tokenized
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewFields { found } => {
                write!(f, "expected at least {MIN_FIELDS} fields, found {found}")
            }
            SkipReason::InvalidNumber { column, value } => {
                write!(f, "{column} is not a number: {value:?}")
            }
            SkipReason::NonFinite { column } => write!(f, "{column} is not finite"),
            SkipReason::Malformed(msg) => write!(f, "malformed row: {msg}"),
        }
    }
}

/// A dropped row, with its 1-based line number in the upload
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// Line number in the raw upload (the header is line 1)
    pub line: u64,
    /// Why the row was dropped
    pub reason: SkipReason,
}

/// Row accounting for one parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Rows that made it into the batch
    pub rows_accepted: usize,
    /// Rows that were dropped, in upload order
    pub skipped: Vec<SkippedRow>,
}

impl ParseReport {
    /// Number of dropped rows
    pub fn rows_skipped(&self) -> usize {
        self.skipped.len()
    }
}

/// Decoder for raw batch uploads.
#[derive(Debug, Clone, Copy)]
pub struct BatchParser {
    delimiter: u8,
}

impl Default for BatchParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl BatchParser {
    /// Create a parser splitting fields on `delimiter`
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Field delimiter in use
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Decode `raw` into a batch, discarding the row accounting.
    ///
    /// An upload with no acceptable rows yields an empty batch, not an error.
    pub fn parse(&self, raw: &str) -> MeasurementBatch {
        self.parse_with_report(raw).0
    }

    /// Decode `raw` into a batch and report which rows were dropped.
    pub fn parse_with_report(&self, raw: &str) -> (MeasurementBatch, ParseReport) {
        let body = raw.split_once('\n').map_or("", |(_, rest)| rest);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .quoting(false)
            .from_reader(body.as_bytes());

        let mut batch = MeasurementBatch::new();
        let mut report = ParseReport::default();

        for result in reader.records() {
            let (line, outcome) = match result {
                Ok(record) => (
                    record.position().map_or(0, |p| p.line() + 1),
                    decode_row(&record),
                ),
                Err(err) => (
                    err.position().map_or(0, |p| p.line() + 1),
                    Err(SkipReason::Malformed(err.to_string())),
                ),
            };

            match outcome {
                Ok(sample) => {
                    batch.push(sample);
                    report.rows_accepted += 1;
                }
                Err(reason) => {
                    debug!("Skipping batch line {}: {}", line, reason);
                    report.skipped.push(SkippedRow { line, reason });
                }
            }
        }

        (batch, report)
    }
}

fn decode_row(record: &StringRecord) -> Result<Sample, SkipReason> {
    if record.len() < MIN_FIELDS {
        return Err(SkipReason::TooFewFields {
            found: record.len(),
        });
    }

    let index_field = &record[0];
    let index = index_field
        .parse::<i64>()
        .map_err(|_| SkipReason::InvalidNumber {
            column: "index",
            value: index_field.to_string(),
        })?;

    Ok(Sample {
        index,
        current: finite_field(record, 1, "current")?,
        voltage: finite_field(record, 2, "voltage")?,
        elapsed_ms: finite_field(record, 3, "elapsed_ms")?,
    })
}

fn finite_field(record: &StringRecord, i: usize, column: &'static str) -> Result<f64, SkipReason> {
    let field = &record[i];
    let value = field.parse::<f64>().map_err(|_| SkipReason::InvalidNumber {
        column,
        value: field.to_string(),
    })?;

    if !value.is_finite() {
        return Err(SkipReason::NonFinite { column });
    }

    Ok(value)
}
