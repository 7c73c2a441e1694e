//! Wheel model
//!
//! Everything that decides what the wheel looks like and where it stops.
//! No clock, no DOM:
//! - Outcome drawn from a seeded RNG before any animation starts
//! - Rotation only moves forward and accumulates across spins
//! - One spin in flight at a time

pub mod crossing;
pub mod geometry;
pub mod needle;
pub mod segment;
pub mod spin;

pub use crossing::{CrossingTracker, crossed_boundaries};
pub use geometry::{LabelAnchor, WheelGeometry};
pub use needle::{Needle, PULSE_KEYFRAMES};
pub use segment::{Segment, WheelConfig, WheelError, default_segments};
pub use spin::{SpinCallback, SpinPlan, SpinState, Wheel};
