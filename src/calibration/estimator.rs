use super::model::CalibrationModel;

/// Invert the calibration line for `peak_current`, without clamping.
///
/// `concentration = (peak_current * signal_scale - intercept) / slope`
pub fn estimate_unclamped(peak_current: f64, model: &CalibrationModel) -> f64 {
    (peak_current * model.signal_scale() - model.intercept()) / model.slope()
}

/// Invert the calibration line for `peak_current` and apply the model's clamp
/// policy.
pub fn estimate(peak_current: f64, model: &CalibrationModel) -> f64 {
    model.clamp().apply(
        estimate_unclamped(peak_current, model),
        model.lower_bound(),
        model.upper_bound(),
    )
}
