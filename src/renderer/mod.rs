//! SVG rendering for the wheel
//!
//! Markup is produced with `quick-xml`, so segment labels and colors from
//! the host are escaped.

pub mod svg;

pub use svg::{RenderError, css_rotate, render_wheel_svg, svg_rotate};
