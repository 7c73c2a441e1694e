//! Sequenced tweens
//!
//! A timeline plays keyframes back to back. Each keyframe tweens from where
//! the previous one ended, the first from the timeline's start value.

use super::ease::Ease;
use super::tween::Tween;

/// One step of a timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Value reached at the end of this step
    pub to: f64,
    /// Seconds
    pub duration: f64,
    pub ease: Ease,
}

impl Keyframe {
    pub const fn new(to: f64, duration: f64, ease: Ease) -> Self {
        Self { to, duration, ease }
    }
}

/// Keyframes played in sequence
#[derive(Debug, Clone)]
pub struct Timeline {
    keyframes: Vec<Keyframe>,
    /// Index of the playing keyframe (== len when done)
    index: usize,
    current: Tween,
    value: f64,
}

impl Timeline {
    pub fn new(start: f64, keyframes: &[Keyframe]) -> Self {
        let current = match keyframes.first() {
            Some(k) => Tween::new(start, k.to, k.duration, k.ease),
            None => Tween::new(start, start, 0.0, Ease::Linear),
        };
        Self {
            keyframes: keyframes.to_vec(),
            index: 0,
            current,
            value: start,
        }
    }

    /// Total length in seconds
    pub fn duration(&self) -> f64 {
        self.keyframes.iter().map(|k| k.duration).sum()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.keyframes.len()
    }

    /// Advance by `dt` seconds, spilling leftover time into later keyframes
    pub fn advance(&mut self, dt: f64) -> f64 {
        let mut remaining = dt.max(0.0);
        while !self.is_finished() {
            let left_in_step = self.current.duration * (1.0 - self.current.progress());
            if remaining < left_in_step {
                self.value = self.current.advance(remaining);
                return self.value;
            }
            remaining -= left_in_step;
            self.value = self.current.to;
            self.index += 1;
            if let Some(k) = self.keyframes.get(self.index) {
                self.current = Tween::new(self.value, k.to, k.duration, k.ease);
            }
        }
        self.value
    }
}
