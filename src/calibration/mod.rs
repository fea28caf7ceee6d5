//! # Calibration
//!
//! A deployment's sensor is characterised by a straight line
//! `signal = slope * concentration + intercept`. Estimation inverts that line
//! for a batch's peak current and then applies the deployment's clamp policy.
//!
//! The [`CalibrationModel`] is validated once, when it is built, so that
//! [`estimate`] has no error path.

mod error;
mod estimator;
mod model;


pub use error::CalibrationError;
pub use estimator::{estimate, estimate_unclamped};
pub use model::{CalibrationModel, ClampPolicy};
