//! Boundary crossing detection
//!
//! The wheel only ever turns forward, so between two updates the normalized
//! rotation either grows (no wrap) or drops (it passed through 0°).

use crate::normalize_degrees;

/// Indices of `boundaries` crossed when the rotation moved from `prev` to
/// `current` (degrees, any range; both are normalized to [0, 360)).
///
/// - `prev < current`: boundary `b` is crossed when `prev < b <= current`.
/// - `prev > current` (wrapped through 0°): `b` is crossed when `b == 0` or
///   `b <= current`.
/// - `prev == current`: nothing moved, nothing is crossed.
pub fn crossed_boundaries(prev: f64, current: f64, boundaries: &[f64]) -> Vec<usize> {
    let p = normalize_degrees(prev);
    let c = normalize_degrees(current);

    if p == c {
        return Vec::new();
    }

    boundaries
        .iter()
        .enumerate()
        .filter(|&(_, &b)| {
            if p < c {
                p < b && b <= c
            } else {
                b == 0.0 || b <= c
            }
        })
        .map(|(i, _)| i)
        .collect()
}

/// Per-spin record of crossed boundaries.
///
/// Each boundary fires at most once per spin, however many update ticks
/// report it.
#[derive(Debug, Clone, Default)]
pub struct CrossingTracker {
    crossed: Vec<bool>,
    /// Most recently crossed boundary this spin
    last_crossed: Option<usize>,
}

impl CrossingTracker {
    pub fn new(boundary_count: usize) -> Self {
        Self {
            crossed: vec![false; boundary_count],
            last_crossed: None,
        }
    }

    /// Forget everything (start of a new spin)
    pub fn reset(&mut self) {
        self.crossed.fill(false);
        self.last_crossed = None;
    }

    pub fn last_crossed(&self) -> Option<usize> {
        self.last_crossed
    }

    pub fn has_crossed(&self, index: usize) -> bool {
        self.crossed.get(index).copied().unwrap_or(false)
    }

    /// Record a rotation update; returns boundaries crossed for the first
    /// time this spin
    pub fn observe(&mut self, prev: f64, current: f64, boundaries: &[f64]) -> Vec<usize> {
        let mut fresh = Vec::new();
        for i in crossed_boundaries(prev, current, boundaries) {
            match self.crossed.get_mut(i) {
                Some(seen) if !*seen => {
                    *seen = true;
                    self.last_crossed = Some(i);
                    fresh.push(i);
                }
                _ => {}
            }
        }
        fresh
    }
}
