use serde::{Deserialize, Serialize};

/// One keyframe of a [`PitchCurve`]: input position `t` in [0,1], output value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub t: f32,
    pub value: f32,
}

/// Piecewise-linear mapping from a normalized input in [0,1] to an output
/// value. Shapes need not be monotonic; evaluation is defined on the closed
/// interval and holds the end values outside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchCurve {
    keys: Vec<Keyframe>,
}

impl PitchCurve {
    /// Build a curve from keyframes. Keys are sorted by `t`; an empty key
    /// list yields the identity-at-zero curve (always 0.0).
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
        Self { keys }
    }

    /// Convenience: evenly spaced keys over [0,1] from a value table.
    pub fn from_values(values: &[f32]) -> Self {
        let n = values.len();
        let keys = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Keyframe {
                t: if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 },
                value,
            })
            .collect();
        Self { keys }
    }

    /// Evaluate at `t`. `t` is clamped to the key span; between keys the
    /// value is linearly interpolated.
    pub fn evaluate(&self, t: f32) -> f32 {
        let keys = &self.keys;
        let (first, last) = match (keys.first(), keys.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return 0.0,
        };
        if t <= first.t {
            return first.value;
        }
        if t >= last.t {
            return last.value;
        }
        // t is strictly inside the span, so a bracketing pair exists.
        let upper = keys.partition_point(|k| k.t < t);
        let hi = keys[upper];
        let lo = keys[upper - 1];
        let span = hi.t - lo.t;
        if span <= f32::EPSILON {
            return lo.value;
        }
        let frac = (t - lo.t) / span;
        lo.value + frac * (hi.value - lo.value)
    }
}
