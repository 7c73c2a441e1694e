//! Reward Wheel - a spinning reward roulette for the merchant admin
//!
//! Core modules:
//! - `anim`: Tween engine (easing curves, tweens, timelines)
//! - `wheel`: Wheel model (segments, geometry, outcome, boundary crossings, needle)
//! - `widget`: Wheel + needle + running animation, driven once per frame
//! - `renderer`: SVG output
//! - `settings`: Widget options (JSON)
//! - `host`: Reward page shell around the widget

pub mod anim;
pub mod host;
pub mod renderer;
pub mod settings;
pub mod wheel;
pub mod widget;

pub use host::{AdminAuthenticator, AdminRequest, AdminSession, HostError, RewardPage};
pub use settings::WidgetOptions;
pub use wheel::{Segment, Wheel, WheelConfig, WheelError};
pub use widget::Widget;

use glam::DVec2;

/// Wheel configuration constants
pub mod consts {
    /// SVG view box edge (the wheel is drawn in a square box)
    pub const VIEW_BOX_SIZE: f64 = 300.0;
    /// Wheel center in view box coordinates
    pub const CENTER_X: f64 = 150.0;
    pub const CENTER_Y: f64 = 150.0;
    /// Outer radius of the segments
    pub const WHEEL_RADIUS: f64 = 140.0;
    /// Border ring drawn behind the segments
    pub const BORDER_WIDTH: f64 = 8.0;
    /// Radius of the hub circle in the middle
    pub const HUB_RADIUS: f64 = 40.0;
    /// Radius of the dots marking segment boundaries
    pub const BOUNDARY_DOT_RADIUS: f64 = 6.0;
    /// Labels sit at this fraction of the wheel radius
    pub const LABEL_RADIUS_FRACTION: f64 = 0.65;

    /// Spin duration in seconds
    pub const SPIN_DURATION: f64 = 4.0;
    /// Guaranteed full revolutions before landing
    pub const FULL_TURNS: u32 = 5;

    /// Fixed frame step used by the native driver (60 Hz)
    pub const FRAME_DT: f64 = 1.0 / 60.0;
    /// Frames longer than this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Palette
    pub const ACCENT_COLOR: &str = "#FF6B6B";
    pub const ACCENT_LIGHT_COLOR: &str = "#FF8E8E";
    pub const LABEL_COLOR: &str = "#333";
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Convert a wheel angle to view box coordinates.
///
/// Wheel angles are measured in degrees clockwise from the top (12 o'clock),
/// which is where the needle sits. Screen space has y pointing down, so the
/// top is -90° in the usual cos/sin convention.
#[inline]
pub fn polar_to_cartesian(center: DVec2, r: f64, wheel_angle_deg: f64) -> DVec2 {
    let theta = (wheel_angle_deg - 90.0).to_radians();
    center + DVec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(2002.5) - 202.5).abs() < 1e-9);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-9);
        assert!(normalize_degrees(-1e-18) < 360.0);
    }

    #[test]
    fn test_polar_top_is_straight_up() {
        let c = DVec2::new(150.0, 150.0);
        let top = polar_to_cartesian(c, 140.0, 0.0);
        assert!((top.x - 150.0).abs() < 1e-9);
        assert!((top.y - 10.0).abs() < 1e-9);

        // Clockwise: 90° lands on the right
        let right = polar_to_cartesian(c, 140.0, 90.0);
        assert!((right.x - 290.0).abs() < 1e-9);
        assert!((right.y - 150.0).abs() < 1e-9);
    }
}
