//! Easing curves
//!
//! Curves map normalized progress `t` in [0, 1] to eased progress. Power
//! curves follow the common "powerN" naming, where powerN uses an exponent
//! of N + 1 (power2 is cubic, power3 is quartic).

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Easing curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Ease {
    Linear,
    /// Cubic, decelerating
    Power2Out,
    /// Cubic, accelerate then decelerate
    Power2InOut,
    /// Quartic, decelerating (quick start, long glide)
    #[default]
    Power3Out,
    /// Springy overshoot that settles on the target
    ElasticOut { amplitude: f64, period: f64 },
}

impl Ease {
    /// Evaluate the curve. `t` is clamped to [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::Linear => t,
            Ease::Power2Out => power_out(t, 3),
            Ease::Power2InOut => power_in_out(t, 3),
            Ease::Power3Out => power_out(t, 4),
            Ease::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

#[inline]
fn power_out(t: f64, exp: i32) -> f64 {
    1.0 - (1.0 - t).powi(exp)
}

#[inline]
fn power_in_out(t: f64, exp: i32) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(exp) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
    }
}

fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    let a = amplitude.max(1.0);
    let period = if period > 0.0 { period } else { 0.3 };
    let p = if amplitude > 0.0 && amplitude < 1.0 { period / amplitude } else { period };
    // Phase shift so the curve starts at exactly 0
    let shift = p / TAU * (1.0 / a).asin();
    a * 2f64.powf(-10.0 * t) * ((t - shift) * TAU / p).sin() + 1.0
}
