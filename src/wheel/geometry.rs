//! Wheel geometry
//!
//! Angles are degrees clockwise from the top of the wheel, where the needle
//! sits. Segment `i` spans `[i * a, (i + 1) * a)` for segment angle `a`.
//! Everything here is a pure function of index, segment angle, radius and
//! center.

use glam::DVec2;

use crate::consts::{CENTER_X, CENTER_Y, LABEL_RADIUS_FRACTION, WHEEL_RADIUS};
use crate::{normalize_degrees, polar_to_cartesian};

/// Where and how to draw a segment label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub pos: DVec2,
    /// Rotation (degrees, clockwise) so the text follows the wedge
    pub rotation: f64,
}

/// Fixed geometry of a wheel with `count` equal segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub count: usize,
    /// Angular width of one segment (degrees)
    pub segment_angle: f64,
    pub radius: f64,
    pub center: DVec2,
}

impl WheelGeometry {
    /// Geometry with the standard radius and center. `count` must be >= 1.
    pub fn new(count: usize) -> Self {
        Self::with_dimensions(count, WHEEL_RADIUS, DVec2::new(CENTER_X, CENTER_Y))
    }

    pub fn with_dimensions(count: usize, radius: f64, center: DVec2) -> Self {
        let count = count.max(1);
        Self {
            count,
            segment_angle: 360.0 / count as f64,
            radius,
            center,
        }
    }

    /// Angle where segment `index` starts (its leading boundary)
    #[inline]
    pub fn segment_start(&self, index: usize) -> f64 {
        index as f64 * self.segment_angle
    }

    /// Angular midpoint of segment `index`
    #[inline]
    pub fn segment_center(&self, index: usize) -> f64 {
        self.segment_start(index) + self.segment_angle / 2.0
    }

    /// Boundary angles, one per segment, in index order
    pub fn boundary_angles(&self) -> Vec<f64> {
        (0..self.count).map(|i| self.segment_start(i)).collect()
    }

    /// SVG large-arc flag: set when a wedge spans more than half the circle
    #[inline]
    pub fn large_arc(&self) -> bool {
        self.segment_angle > 180.0
    }

    /// SVG path data for the wedge of segment `index`.
    ///
    /// A single segment covers the whole circle. An arc whose endpoints
    /// coincide is dropped by SVG renderers, so that case is drawn as two
    /// half-circle arcs instead.
    pub fn wedge_path(&self, index: usize) -> String {
        let c = self.center;
        let r = fmt_num(self.radius);

        if self.segment_angle >= 360.0 {
            let top = polar_to_cartesian(c, self.radius, 0.0);
            let bottom = polar_to_cartesian(c, self.radius, 180.0);
            return format!(
                "M {tx} {ty} A {r} {r} 0 1 1 {bx} {by} A {r} {r} 0 1 1 {tx} {ty} Z",
                tx = fmt_num(top.x),
                ty = fmt_num(top.y),
                bx = fmt_num(bottom.x),
                by = fmt_num(bottom.y),
            );
        }

        let p1 = polar_to_cartesian(c, self.radius, self.segment_start(index));
        let p2 = polar_to_cartesian(c, self.radius, self.segment_start(index + 1));
        format!(
            "M {} {} L {} {} A {r} {r} 0 {} 1 {} {} Z",
            fmt_num(c.x),
            fmt_num(c.y),
            fmt_num(p1.x),
            fmt_num(p1.y),
            u8::from(self.large_arc()),
            fmt_num(p2.x),
            fmt_num(p2.y),
        )
    }

    /// Label position: segment midpoint at 0.65 of the radius
    pub fn label_anchor(&self, index: usize) -> LabelAnchor {
        let mid = self.segment_center(index);
        LabelAnchor {
            pos: polar_to_cartesian(self.center, self.radius * LABEL_RADIUS_FRACTION, mid),
            rotation: mid,
        }
    }

    /// Dot on the rim where segment `index` starts
    pub fn boundary_marker(&self, index: usize) -> DVec2 {
        polar_to_cartesian(self.center, self.radius, self.segment_start(index))
    }

    /// Rotation offset (within one turn) that puts the center of segment
    /// `index` under the needle
    pub fn landing_offset(&self, index: usize) -> f64 {
        360.0 - self.segment_center(index)
    }

    /// Segment sitting under the needle when the wheel is rotated by
    /// `rotation` degrees clockwise
    pub fn segment_under_needle(&self, rotation: f64) -> usize {
        // Rotating the wheel clockwise by R brings wheel angle -R to the top
        let angle = normalize_degrees(-rotation);
        ((angle / self.segment_angle).floor() as usize).min(self.count - 1)
    }
}

/// Compact number formatting for SVG attributes (3 decimals, no trailing zeros)
pub fn fmt_num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(150.0), "150");
        assert_eq!(fmt_num(10.00000000001), "10");
        assert_eq!(fmt_num(248.994949), "248.995");
        assert_eq!(fmt_num(-0.0001), "0");
    }

    #[test]
    fn test_wedge_path_eight_segments() {
        let g = WheelGeometry::new(8);
        assert_eq!(g.wedge_path(0), "M 150 150 L 150 10 A 140 140 0 0 1 248.995 51.005 Z");
        // Segment 2 runs from the right edge (90°) down to 135°
        assert!(g.wedge_path(2).starts_with("M 150 150 L 290 150 A"));
    }

    #[test]
    fn test_wedge_path_two_segments_not_large() {
        let g = WheelGeometry::new(2);
        assert!(!g.large_arc());
        assert!(g.wedge_path(0).contains(" 0 0 1 "));
    }

    #[test]
    fn test_single_segment_full_circle() {
        let g = WheelGeometry::new(1);
        assert_eq!(g.segment_angle, 360.0);
        assert!(g.large_arc());
        let path = g.wedge_path(0);
        assert_eq!(path, "M 150 10 A 140 140 0 1 1 150 290 A 140 140 0 1 1 150 10 Z");
    }

    #[test]
    fn test_label_anchor() {
        let g = WheelGeometry::new(4);
        // Segment 0 midpoint is 45° clockwise from the top
        let a = g.label_anchor(0);
        assert_eq!(a.rotation, 45.0);
        let r = 140.0 * 0.65;
        let expected = DVec2::new(150.0 + r * 45f64.to_radians().sin(), 150.0 - r * 45f64.to_radians().cos());
        assert!((a.pos - expected).length() < 1e-9);
        assert!(((a.pos - g.center).length() - r).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_marker_on_rim() {
        let g = WheelGeometry::new(6);
        for i in 0..6 {
            let p = g.boundary_marker(i);
            assert!(((p - g.center).length() - 140.0).abs() < 1e-9);
        }
        assert!((g.boundary_marker(0) - DVec2::new(150.0, 10.0)).length() < 1e-9);
    }

    #[test]
    fn test_segment_under_needle() {
        let g = WheelGeometry::new(8);
        assert_eq!(g.segment_under_needle(0.0 + 1.0), 7);
        assert_eq!(g.segment_under_needle(-1.0), 0);
        for i in 0..8 {
            let rotation = 1800.0 + g.landing_offset(i);
            assert_eq!(g.segment_under_needle(rotation), i);
        }
    }
}
