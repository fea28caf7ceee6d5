/// Errors raised while building a calibration model.
///
/// All of these are fatal at startup: a process must not begin ingesting with
/// a calibration it cannot invert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    /// Slope of zero makes the calibration line non-invertible
    #[error("calibration slope must be non-zero")]
    ZeroSlope,

    /// Signal scale of zero would map every peak onto the intercept
    #[error("signal scale must be non-zero")]
    ZeroSignalScale,

    /// A coefficient or threshold is NaN or infinite
    #[error("calibration {name} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending parameter
        name: &'static str,
        /// Value supplied
        value: f64,
    },

    /// Lower clamp bound lies above the upper clamp bound
    #[error("clamp lower bound {lower} exceeds upper bound {upper}")]
    InvertedBounds {
        /// Configured lower bound
        lower: f64,
        /// Configured upper bound
        upper: f64,
    },
}
