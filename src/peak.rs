//! Peak location over a current trace.

use serde::{Deserialize, Serialize};

/// Errors from peak location
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeakError {
    /// The current trace had no samples
    #[error("cannot locate a peak in an empty current trace")]
    EmptyInput,
}

/// Maximum of a current trace and where it occurred
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Maximum current value
    pub value: f64,
    /// Zero-based position of the first sample attaining the maximum
    pub index: usize,
}

/// Find the maximum of `currents`.
///
/// Ties resolve to the earliest position. NaN samples never win.
pub fn find_peak(currents: &[f64]) -> Result<Peak, PeakError> {
    let (&first, rest) = currents.split_first().ok_or(PeakError::EmptyInput)?;

    let mut peak = Peak {
        value: first,
        index: 0,
    };
    for (offset, &value) in rest.iter().enumerate() {
        // strict comparison keeps the first occurrence
        if value > peak.value || peak.value.is_nan() {
            peak = Peak {
                value,
                index: offset + 1,
            };
        }
    }

    Ok(peak)
}
