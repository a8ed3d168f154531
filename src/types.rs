//! Core simulation types and constants shared by the animation, input and UI layers.

use bevy::prelude::*;

/// Factor applied per "faster"/"slower" key press.
pub const SPEED_FACTOR: f64 = 2.0;

/// Lowest allowed speed multiplier (2^-6).
pub const MIN_SPEED: f64 = 1.0 / 64.0;

/// Highest allowed speed multiplier (2^6).
pub const MAX_SPEED: f64 = 64.0;

/// Speed multiplier at startup and after a reset.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Lifecycle of the animation loop.
///
/// `Idle` covers texture loading and scene composition. Once the scene is
/// fully composed the phase moves to `Running` and never leaves it.
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    /// Textures are loading; nothing has been spawned or animated yet.
    #[default]
    Idle,
    /// Scene is composed and every frame advances the bodies.
    Running,
}

/// System sets for the per-frame pipeline.
///
/// Input runs after the frame has been advanced so a speed change made
/// during frame N only affects frame N+1.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnimationSet {
    /// Advance every body's angular state.
    Advance,
    /// Derive scene-graph transforms from angular state.
    Transforms,
    /// Keyboard and dock speed controls.
    Input,
}

/// Global time-speed control.
///
/// Read once per frame by the animation driver, mutated only by discrete
/// input events.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationSpeed {
    /// Multiplier applied to every body's rates, always within
    /// `[MIN_SPEED, MAX_SPEED]`.
    pub multiplier: f64,
    /// Whether the animation is frozen.
    pub paused: bool,
}

impl Default for SimulationSpeed {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_SPEED,
            paused: false,
        }
    }
}

impl SimulationSpeed {
    /// Create a running speed control with the given multiplier (clamped).
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier: multiplier.clamp(MIN_SPEED, MAX_SPEED),
            paused: false,
        }
    }

    /// Multiply the speed by [`SPEED_FACTOR`], saturating at [`MAX_SPEED`].
    pub fn increase(&mut self) {
        self.multiplier = (self.multiplier * SPEED_FACTOR).min(MAX_SPEED);
    }

    /// Divide the speed by [`SPEED_FACTOR`], saturating at [`MIN_SPEED`].
    pub fn decrease(&mut self) {
        self.multiplier = (self.multiplier / SPEED_FACTOR).max(MIN_SPEED);
    }

    /// Back to 1x, leaving the pause state alone.
    pub fn reset(&mut self) {
        self.multiplier = DEFAULT_SPEED;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Speed actually applied to a frame: zero while paused.
    pub fn effective(&self) -> f64 {
        if self.paused { 0.0 } else { self.multiplier }
    }

    /// Short label such as `2x` or `0.25x` for logs and the dock.
    pub fn label(&self) -> String {
        if self.multiplier >= 1.0 {
            format!("{}x", self.multiplier)
        } else {
            let digits = format!("{:.3}", self.multiplier);
            format!("{}x", digits.trim_end_matches('0'))
        }
    }
}
