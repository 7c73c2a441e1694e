//! Spin state machine
//!
//! A spin is: pick the winner, plan a rotation that lands on it, then let
//! whatever drives the animation feed rotation updates (`advance`) and
//! finally `complete`. The wheel never reads a clock itself.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::crossing::CrossingTracker;
use super::geometry::WheelGeometry;
use super::needle::Needle;
use super::segment::{Segment, WheelConfig};
use crate::anim::{Ease, TweenTarget};
use crate::consts::{FULL_TURNS, SPIN_DURATION};
use crate::normalize_degrees;

/// Completion callback, called with the winning segment index
pub type SpinCallback = Box<dyn FnMut(usize)>;

/// Spin bookkeeping that outlives a single spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SpinState {
    /// A spin is in flight
    pub is_spinning: bool,
    /// Absolute rotation after the last completed spin (degrees, only grows)
    pub current_rotation: f64,
    /// Most recently crossed boundary during the current spin
    pub last_crossed: Option<usize>,
}

/// What the animation driver needs to run a spin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub winning_index: usize,
    /// Start rotation (degrees)
    pub from: f64,
    /// Final rotation (degrees)
    pub target: f64,
    /// Seconds
    pub duration: f64,
    pub ease: Ease,
}

impl SpinPlan {
    /// Rotation added by this spin
    pub fn added_rotation(&self) -> f64 {
        self.target - self.from
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveSpin {
    winning_index: usize,
    target: f64,
    /// Rotation seen at the previous update
    previous: f64,
}

/// The wheel: segments, geometry, outcome selection and spin state
pub struct Wheel {
    config: WheelConfig,
    geometry: WheelGeometry,
    boundaries: Vec<f64>,
    state: SpinState,
    /// Rotation currently displayed (moves during a spin)
    rotation: f64,
    active: Option<ActiveSpin>,
    tracker: CrossingTracker,
    needle: Needle,
    rng: Pcg32,
    seed: u64,
    full_turns: u32,
    duration: f64,
    needle_pulse: bool,
    on_complete: Option<SpinCallback>,
}

impl Wheel {
    /// Create a wheel at rest with the given RNG seed
    pub fn new(config: WheelConfig, seed: u64) -> Self {
        let geometry = WheelGeometry::new(config.len());
        let boundaries = geometry.boundary_angles();
        Self {
            tracker: CrossingTracker::new(config.len()),
            config,
            geometry,
            boundaries,
            state: SpinState::default(),
            rotation: 0.0,
            active: None,
            needle: Needle::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            full_turns: FULL_TURNS,
            duration: SPIN_DURATION,
            needle_pulse: true,
            on_complete: None,
        }
    }

    /// Override the guaranteed revolutions per spin
    pub fn with_full_turns(mut self, turns: u32) -> Self {
        self.full_turns = turns;
        self
    }

    /// Override the spin duration (seconds)
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    /// Turn the needle wobble on boundary crossings on or off
    pub fn with_needle_pulse(mut self, enabled: bool) -> Self {
        self.needle_pulse = enabled;
        self
    }

    /// Register the completion callback (replaces any previous one)
    pub fn set_on_complete(&mut self, callback: impl FnMut(usize) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn segments(&self) -> &[Segment] {
        self.config.segments()
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning
    }

    /// Displayed rotation (degrees)
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn needle(&self) -> &Needle {
        &self.needle
    }

    pub fn needle_mut(&mut self) -> &mut Needle {
        &mut self.needle
    }

    /// Winning index of the spin in flight
    pub fn pending_winner(&self) -> Option<usize> {
        self.active.map(|a| a.winning_index)
    }

    /// Segment currently under the needle
    pub fn segment_under_needle(&self) -> usize {
        self.geometry.segment_under_needle(self.rotation)
    }

    /// Start a spin.
    ///
    /// Returns `None` without touching any state when a spin is already in
    /// flight.
    pub fn start_spin(&mut self) -> Option<SpinPlan> {
        if self.state.is_spinning {
            log::debug!("Spin requested while spinning - ignored");
            return None;
        }

        let winning_index = self.rng.random_range(0..self.config.len());
        let from = self.state.current_rotation;
        let target = from + self.rotation_to(winning_index);

        self.state.is_spinning = true;
        self.state.last_crossed = None;
        self.tracker.reset();
        self.active = Some(ActiveSpin {
            winning_index,
            target,
            previous: from,
        });

        log::info!(
            "Spin started: winner {} ({}), {:.1}° -> {:.1}°",
            winning_index,
            self.config.segments()[winning_index].label,
            from,
            target
        );

        Some(SpinPlan {
            winning_index,
            from,
            target,
            duration: self.duration,
            ease: Ease::Power3Out,
        })
    }

    /// Rotation to add so that segment `index` comes to rest under the
    /// needle after the configured number of full turns.
    ///
    /// From a rotation of 0 this is `turns * 360 + (360 - center(index))`.
    /// From any other rotation the landing offset is taken relative to where
    /// the wheel currently rests, so every spin lands on its winner.
    pub fn rotation_to(&self, index: usize) -> f64 {
        let rest = normalize_degrees(self.state.current_rotation);
        let offset = (self.geometry.landing_offset(index) - rest).rem_euclid(360.0);
        self.full_turns as f64 * 360.0 + offset
    }

    /// Feed a rotation update from the animation.
    ///
    /// Returns boundaries crossed for the first time this spin; each one has
    /// already triggered a needle pulse. Ignored when no spin is in flight.
    pub fn advance(&mut self, rotation: f64) -> Vec<usize> {
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };

        let fresh = self
            .tracker
            .observe(active.previous, rotation, &self.boundaries);
        active.previous = rotation;
        self.rotation = rotation;

        for &boundary in &fresh {
            log::debug!("Boundary {} crossed at {:.1}°", boundary, rotation);
            if self.needle_pulse {
                self.needle.pulse();
            }
        }
        self.state.last_crossed = self.tracker.last_crossed();

        fresh
    }

    /// Finish the spin in flight: settle the rotation, clear the in-flight
    /// flag, and report the winner to the callback.
    ///
    /// Returns the winning index, or `None` if no spin was in flight (the
    /// callback is not called then).
    pub fn complete(&mut self) -> Option<usize> {
        let active = self.active.take()?;

        self.state.current_rotation = active.target;
        self.state.is_spinning = false;
        self.rotation = active.target;

        log::info!(
            "Spin complete: segment {} at rest ({:.1}°)",
            active.winning_index,
            normalize_degrees(active.target)
        );

        if let Some(callback) = self.on_complete.as_mut() {
            callback(active.winning_index);
        }

        Some(active.winning_index)
    }
}

impl TweenTarget for Wheel {
    fn on_update(&mut self, value: f64) {
        self.advance(value);
    }

    fn on_complete(&mut self) {
        self.complete();
    }
}

impl std::fmt::Debug for Wheel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wheel")
            .field("segments", &self.config.len())
            .field("state", &self.state)
            .field("rotation", &self.rotation)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
