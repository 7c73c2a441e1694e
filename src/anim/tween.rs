//! Single-value tween

use super::ease::Ease;

/// Receiver of tween progress.
///
/// `on_update` is called with the current value on every step, including the
/// final one. `on_complete` is called exactly once, after the final update.
pub trait TweenTarget {
    fn on_update(&mut self, value: f64);
    fn on_complete(&mut self);
}

/// Animates one number from `from` to `to` over `duration` seconds
#[derive(Debug, Clone)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    /// Seconds
    pub duration: f64,
    pub ease: Ease,
    elapsed: f64,
    completed: bool,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            ease,
            elapsed: 0.0,
            completed: false,
        }
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Current (eased) value
    pub fn value(&self) -> f64 {
        let t = self.progress();
        if t >= 1.0 {
            // Land exactly on the target, no float drift
            return self.to;
        }
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    /// True once elapsed time has reached the duration
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// True once `on_complete` has been delivered by `drive`
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Advance the clock and return the new value
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.elapsed += dt.max(0.0);
        self.value()
    }

    /// Advance the clock and report to `target`.
    ///
    /// Returns true on the step that completes the tween. Once completed,
    /// further calls do nothing.
    pub fn drive<T: TweenTarget + ?Sized>(&mut self, dt: f64, target: &mut T) -> bool {
        if self.completed {
            return false;
        }
        let value = self.advance(dt);
        target.on_update(value);
        if self.is_finished() {
            self.completed = true;
            target.on_complete();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        values: Vec<f64>,
        completions: u32,
    }

    impl TweenTarget for Recorder {
        fn on_update(&mut self, value: f64) {
            self.values.push(value);
        }

        fn on_complete(&mut self) {
            self.completions += 1;
        }
    }

    #[test]
    fn test_linear_midpoint() {
        let mut tween = Tween::new(10.0, 20.0, 2.0, Ease::Linear);
        assert!((tween.advance(1.0) - 15.0).abs() < 1e-9);
        assert!(!tween.is_finished());
        assert_eq!(tween.advance(5.0), 20.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_drive_completes_once() {
        let mut tween = Tween::new(0.0, 100.0, 0.5, Ease::Power3Out);
        let mut rec = Recorder::default();

        let mut finished_steps = 0;
        for _ in 0..10 {
            if tween.drive(0.125, &mut rec) {
                finished_steps += 1;
            }
        }

        assert_eq!(finished_steps, 1);
        assert_eq!(rec.completions, 1);
        assert_eq!(*rec.values.last().unwrap(), 100.0);
        // Updates stop after completion
        assert_eq!(rec.values.len(), 4);
        assert!(rec.values.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut tween = Tween::new(3.0, 7.0, 0.0, Ease::Linear);
        let mut rec = Recorder::default();
        assert!(tween.drive(0.0, &mut rec));
        assert_eq!(rec.values, vec![7.0]);
        assert_eq!(rec.completions, 1);
    }
}
