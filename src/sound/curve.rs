use crate::config::CalibrationConfig;
use crate::core::curve::PitchCurve;
use crate::sound::category::SoundCategory;

/// Normalizes a raw continuous input against a category's calibration range
/// and evaluates the configured response curve.
///
/// The curve output replaces the raw value; it does not scale it. When no
/// curve is configured the caller keeps the raw value untouched — that case
/// is signaled up front by `ResolutionCache::has_curve`, so this engine is
/// only reached for components that actually carry one.
#[derive(Debug, Clone)]
pub struct CurveEngine {
    calibration: CalibrationConfig,
}

impl CurveEngine {
    pub fn new(calibration: CalibrationConfig) -> Self {
        Self { calibration }
    }

    /// Map a raw input to the normalized position within the category's
    /// calibration range, clamped to the closed interval [0,1].
    pub fn normalize(&self, category: SoundCategory, raw_input: f32) -> f32 {
        let range = self.calibration.range_for(category);
        let span = range.span();
        if span <= f32::EPSILON {
            return 0.0;
        }
        ((raw_input - range.min_input) / span).clamp(0.0, 1.0)
    }

    /// Evaluate `curve` at the normalized position of `raw_input`.
    pub fn evaluate(&self, category: SoundCategory, curve: &PitchCurve, raw_input: f32) -> f32 {
        curve.evaluate(self.normalize(category, raw_input))
    }
}
