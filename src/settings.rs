//! Widget options
//!
//! Read from JSON, typically the `data-options` attribute of the element the
//! widget mounts into. Every field is optional.

use serde::{Deserialize, Serialize};

use crate::consts::{FULL_TURNS, SPIN_DURATION};
use crate::wheel::{Segment, WheelConfig, WheelError};

/// Widget options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    /// Segments in clockwise order from the top (built-in set when absent)
    pub segments: Option<Vec<Segment>>,
    /// RNG seed; taken from the clock when absent
    pub seed: Option<u64>,
    /// Spin duration in seconds
    pub spin_duration: f64,
    /// Guaranteed full revolutions per spin
    pub full_turns: u32,
    /// Wobble the needle when a boundary passes under it
    pub needle_pulse: bool,
    /// Caption on the wheel hub
    pub hub_caption: String,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            segments: None,
            seed: None,
            spin_duration: SPIN_DURATION,
            full_turns: FULL_TURNS,
            needle_pulse: true,
            hub_caption: "スピン".to_string(),
        }
    }
}

impl WidgetOptions {
    /// Options with an explicit segment list
    pub fn with_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments: Some(segments),
            ..Self::default()
        }
    }

    /// Parse options from JSON. Blank input gives the defaults.
    pub fn from_json(json: &str) -> Result<Self, WheelError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Wheel configuration (rejects an explicitly empty segment list)
    pub fn wheel_config(&self) -> Result<WheelConfig, WheelError> {
        match &self.segments {
            Some(segments) => WheelConfig::new(segments.clone()),
            None => Ok(WheelConfig::default()),
        }
    }

    /// Seed to use, falling back to `fallback` (usually the clock)
    pub fn effective_seed(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Spin duration clamped to something playable
    pub fn effective_spin_duration(&self) -> f64 {
        if self.spin_duration.is_finite() {
            self.spin_duration.max(0.0)
        } else {
            SPIN_DURATION
        }
    }
}
