//! The wheel widget: wheel, needle and the running spin animation
//!
//! Call `tick` once per frame with the elapsed seconds. The widget owns the
//! spin tween and forwards its updates to the wheel.

use crate::anim::Tween;
use crate::consts::{CENTER_X, CENTER_Y, MAX_FRAME_DT};
use crate::renderer::{RenderError, css_rotate, render_wheel_svg, svg_rotate};
use crate::settings::WidgetOptions;
use crate::wheel::{Wheel, WheelError};

/// Spin button caption while idle
pub const SPIN_LABEL: &str = "回る";
/// Spin button caption while a spin is running
pub const SPINNING_LABEL: &str = "回転中...";

/// Wheel widget instance
#[derive(Debug)]
pub struct Widget {
    wheel: Wheel,
    spin: Option<Tween>,
    hub_caption: String,
}

impl Widget {
    /// Build a widget from options. `fallback_seed` is used when the options
    /// carry no seed.
    pub fn new(options: &WidgetOptions, fallback_seed: u64) -> Result<Self, WheelError> {
        let config = options.wheel_config()?;
        let wheel = Wheel::new(config, options.effective_seed(fallback_seed))
            .with_full_turns(options.full_turns)
            .with_duration(options.effective_spin_duration())
            .with_needle_pulse(options.needle_pulse);
        log::info!(
            "Wheel widget ready: {} segments, seed {}",
            wheel.config().len(),
            wheel.seed()
        );
        Ok(Self {
            wheel,
            spin: None,
            hub_caption: options.hub_caption.clone(),
        })
    }

    /// Register the completion callback
    pub fn set_on_complete(&mut self, callback: impl FnMut(usize) + 'static) {
        self.wheel.set_on_complete(callback);
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn is_spinning(&self) -> bool {
        self.wheel.is_spinning()
    }

    /// Start a spin; false if one is already running
    pub fn start_spin(&mut self) -> bool {
        match self.wheel.start_spin() {
            Some(plan) => {
                self.spin = Some(Tween::new(plan.from, plan.target, plan.duration, plan.ease));
                true
            }
            None => false,
        }
    }

    /// Advance one frame. Returns the winning index on the frame the spin
    /// completes.
    pub fn tick(&mut self, dt: f64) -> Option<usize> {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        // Pulses started during this frame's update begin on the next frame
        self.wheel.needle_mut().advance(dt);

        let tween = self.spin.as_mut()?;
        let winner = self.wheel.pending_winner();
        if tween.drive(dt, &mut self.wheel) {
            self.spin = None;
            return winner;
        }
        None
    }

    /// SVG transform for the wheel group
    pub fn wheel_transform(&self) -> String {
        svg_rotate(self.wheel.rotation(), CENTER_X, CENTER_Y)
    }

    /// CSS/SVG transform for the needle (pivots on its pin)
    pub fn needle_transform(&self) -> String {
        css_rotate(self.wheel.needle().angle())
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_spinning() { SPINNING_LABEL } else { SPIN_LABEL }
    }

    /// Full SVG markup for the wheel at its current rotation
    pub fn render_svg(&self) -> Result<String, RenderError> {
        render_wheel_svg(&self.wheel, &self.hub_caption)
    }
}
