use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::CalibrationError;

/// How an inverted concentration is bounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClampPolicy {
    /// Values below the lower bound snap to 0, values above the upper bound
    /// snap to the upper bound
    #[default]
    Bounded,
    /// Values below the lower bound snap to 0, no upper clamp
    Floor,
    /// No clamping
    None,
}

impl ClampPolicy {
    /// Apply the policy to a raw concentration.
    ///
    /// Values exactly on a bound are left unchanged.
    pub fn apply(self, value: f64, lower: f64, upper: f64) -> f64 {
        match self {
            ClampPolicy::Bounded if value < lower => 0.0,
            ClampPolicy::Bounded if value > upper => upper,
            ClampPolicy::Floor if value < lower => 0.0,
            _ => value,
        }
    }
}

impl fmt::Display for ClampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClampPolicy::Bounded => "bounded",
            ClampPolicy::Floor => "floor",
            ClampPolicy::None => "none",
        };
        f.write_str(name)
    }
}

/// Immutable linear calibration for one sensor deployment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationModel {
    slope: f64,
    intercept: f64,
    signal_scale: f64,
    clamp: ClampPolicy,
    lower_bound: f64,
    upper_bound: f64,
}

impl Default for CalibrationModel {
    fn default() -> Self {
        // µA sensor line with the bounded 10..10000 clamp
        Self {
            slope: 0.03,
            intercept: 1.0,
            signal_scale: 1.0,
            clamp: ClampPolicy::Bounded,
            lower_bound: 10.0,
            upper_bound: 10_000.0,
        }
    }
}

impl CalibrationModel {
    /// Build a model from line coefficients, with the default clamp policy.
    pub fn new(slope: f64, intercept: f64) -> Result<Self, CalibrationError> {
        Self {
            slope,
            intercept,
            ..Self::default()
        }
        .validated()
    }

    /// Build an unclamped model from line coefficients.
    pub fn unclamped(slope: f64, intercept: f64) -> Result<Self, CalibrationError> {
        Self::new(slope, intercept)?.with_clamp(ClampPolicy::None, 0.0, 0.0)
    }

    /// Replace the clamp policy and its bounds.
    pub fn with_clamp(
        self,
        clamp: ClampPolicy,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<Self, CalibrationError> {
        Self {
            clamp,
            lower_bound,
            upper_bound,
            ..self
        }
        .validated()
    }

    /// Replace the factor applied to raw current before inversion.
    pub fn with_signal_scale(self, signal_scale: f64) -> Result<Self, CalibrationError> {
        Self {
            signal_scale,
            ..self
        }
        .validated()
    }

    fn validated(self) -> Result<Self, CalibrationError> {
        for (name, value) in [
            ("slope", self.slope),
            ("intercept", self.intercept),
            ("signal scale", self.signal_scale),
            ("lower bound", self.lower_bound),
            ("upper bound", self.upper_bound),
        ] {
            if !value.is_finite() {
                return Err(CalibrationError::NonFinite { name, value });
            }
        }

        if self.slope == 0.0 {
            return Err(CalibrationError::ZeroSlope);
        }
        if self.signal_scale == 0.0 {
            return Err(CalibrationError::ZeroSignalScale);
        }
        if self.clamp == ClampPolicy::Bounded && self.lower_bound > self.upper_bound {
            return Err(CalibrationError::InvertedBounds {
                lower: self.lower_bound,
                upper: self.upper_bound,
            });
        }

        Ok(self)
    }

    /// Calibration line slope
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Calibration line intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Factor applied to the raw peak current before inversion
    pub fn signal_scale(&self) -> f64 {
        self.signal_scale
    }

    /// Clamp policy
    pub fn clamp(&self) -> ClampPolicy {
        self.clamp
    }

    /// Lower clamp bound
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Upper clamp bound
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }
}

impl fmt::Display for CalibrationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "signal = {} * concentration + {} (scale {}, clamp {} [{}, {}])",
            self.slope,
            self.intercept,
            self.signal_scale,
            self.clamp,
            self.lower_bound,
            self.upper_bound
        )
    }
}
