//! Segments and wheel configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a wheel
#[derive(Error, Debug)]
pub enum WheelError {
    #[error("a wheel needs at least one segment")]
    NoSegments,

    #[error("invalid widget options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// One labeled wedge of the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub label: String,
    /// Any SVG paint value (`#FFE4D6`, `tomato`, ...)
    pub color: String,
}

impl Segment {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Built-in segment set used when the host does not provide one
pub fn default_segments() -> Vec<Segment> {
    [
        ("7000", "#FFE4D6"),
        ("7000", "#FFD6CC"),
        ("9500", "#FFE4D6"),
        ("9700", "#FFD6CC"),
        ("9800", "#FFE4D6"),
        ("7000", "#FFD6CC"),
        ("9500", "#FFE4D6"),
        ("9700", "#FFD6CC"),
    ]
    .into_iter()
    .map(|(label, color)| Segment::new(label, color))
    .collect()
}

/// Ordered, non-empty list of segments.
///
/// Order decides angular position: segment 0 starts at the top and the rest
/// follow clockwise. Labels may repeat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelConfig {
    segments: Vec<Segment>,
}

impl WheelConfig {
    pub fn new(segments: Vec<Segment>) -> Result<Self, WheelError> {
        if segments.is_empty() {
            return Err(WheelError::NoSegments);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Number of segments (always >= 1)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Angular width of one segment in degrees
    pub fn segment_angle(&self) -> f64 {
        360.0 / self.segments.len() as f64
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            segments: default_segments(),
        }
    }
}
