//! Needle wobble when the wheel passes a boundary
//!
//! The needle pivots on its pin at the top of the wheel. Each pulse swings
//! it one way, overshoots the other, and springs back to rest. Pulses are
//! independent of the wheel's rotation and may overlap.

use crate::anim::{Ease, Keyframe, Timeline};

/// Swing choreography (degrees, seconds)
pub const PULSE_KEYFRAMES: [Keyframe; 4] = [
    Keyframe::new(-20.0, 0.1, Ease::Power2Out),
    Keyframe::new(18.0, 0.12, Ease::Power2InOut),
    Keyframe::new(-10.0, 0.1, Ease::Power2InOut),
    Keyframe::new(0.0, 0.12, Ease::ElasticOut { amplitude: 1.2, period: 0.5 }),
];

/// Needle displacement state
#[derive(Debug, Clone, Default)]
pub struct Needle {
    /// Running pulses, oldest first
    pulses: Vec<Timeline>,
    angle: f64,
}

impl Needle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current displacement from rest (degrees, clockwise)
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Number of pulses still running
    pub fn active_pulses(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_at_rest(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Start a new pulse from wherever the needle currently is
    pub fn pulse(&mut self) {
        self.pulses.push(Timeline::new(self.angle, &PULSE_KEYFRAMES));
    }

    /// Advance all pulses; the newest running pulse decides the angle
    pub fn advance(&mut self, dt: f64) -> f64 {
        for pulse in &mut self.pulses {
            pulse.advance(dt);
        }
        if let Some(newest) = self.pulses.last() {
            self.angle = newest.value();
        }
        self.pulses.retain(|p| !p.is_finished());
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_swings_and_settles() {
        let mut needle = Needle::new();
        needle.pulse();
        assert!(!needle.is_at_rest());

        // End of the first swing
        let a = needle.advance(0.1);
        assert!((a + 20.0).abs() < 1e-6);

        // End of the overshoot
        let a = needle.advance(0.12);
        assert!((a - 18.0).abs() < 1e-6);

        assert_eq!(needle.advance(1.0), 0.0);
        assert!(needle.is_at_rest());
    }

    #[test]
    fn test_overlapping_pulses_not_coalesced() {
        let mut needle = Needle::new();
        needle.pulse();
        needle.advance(0.05);
        needle.pulse();
        assert_eq!(needle.active_pulses(), 2);

        // The first pulse finishes before the second
        let total: f64 = PULSE_KEYFRAMES.iter().map(|k| k.duration).sum();
        needle.advance(total - 0.05 + 1e-6);
        assert_eq!(needle.active_pulses(), 1);
        needle.advance(1.0);
        assert!(needle.is_at_rest());
        assert_eq!(needle.angle(), 0.0);
    }
}
