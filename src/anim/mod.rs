//! Tween engine
//!
//! A small numeric animation toolkit:
//! - `ease`: easing curves (power, elastic)
//! - `tween`: one value from A to B over a duration
//! - `timeline`: tweens played back to back
//!
//! Nothing here knows about wheels. Whatever owns the clock (a
//! `requestAnimationFrame` loop, a fixed-step native loop, a test) feeds
//! elapsed seconds in and reads values out.

pub mod ease;
pub mod timeline;
pub mod tween;

pub use ease::Ease;
pub use timeline::{Keyframe, Timeline};
pub use tween::{Tween, TweenTarget};
