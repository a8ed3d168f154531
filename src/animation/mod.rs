//! Per-frame animation of the composed scene.
//!
//! The driver is a pull-based step: [`advance_bodies`] moves every body's
//! angles by `rate × speed × dt`, then [`sync_transforms`] derives the scene
//! graph from those angles. Bevy calls both once per frame while the
//! animation is [`AnimationPhase::Running`]; tests call them directly.

#[cfg(test)]
mod proptest_animation;

use bevy::prelude::*;

use crate::bodies::{OrbitRegistry, RegistryError, pivot_rotation, spin_rotation};
use crate::types::{AnimationPhase, AnimationSet, SimulationSpeed};

/// Plugin driving the animation loop.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationSettings>()
            .init_resource::<AnimationClock>()
            .configure_sets(
                Update,
                (
                    AnimationSet::Advance,
                    AnimationSet::Transforms,
                    AnimationSet::Input,
                )
                    .chain(),
            )
            .add_systems(OnEnter(AnimationPhase::Running), log_start)
            .add_systems(
                Update,
                (
                    advance_animation.in_set(AnimationSet::Advance),
                    apply_body_transforms.in_set(AnimationSet::Transforms),
                )
                    .run_if(in_state(AnimationPhase::Running)),
            );
    }
}

/// How much animation time one frame represents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameStep {
    /// Constant number of nominal units per frame, independent of refresh rate.
    Fixed(f64),
    /// Wall-clock driven: `units_per_second` nominal units per real second.
    Elapsed { units_per_second: f64 },
}

impl FrameStep {
    /// Nominal units to advance given the real time since the last frame.
    pub fn delta(&self, real_delta_secs: f64) -> f64 {
        match *self {
            FrameStep::Fixed(step) => step,
            FrameStep::Elapsed { units_per_second } => real_delta_secs * units_per_second,
        }
    }
}

/// Animation tunables.
#[derive(Resource, Clone, Debug)]
pub struct AnimationSettings {
    pub step: FrameStep,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        // One unit per frame, the rates in the presets are tuned for this.
        Self {
            step: FrameStep::Fixed(1.0),
        }
    }
}

/// Running totals since the animation started, shown in the dock status.
#[derive(Resource, Clone, Debug, Default)]
pub struct AnimationClock {
    /// Frames animated so far.
    pub frames: u64,
    /// Accumulated `speed × dt`.
    pub scaled_time: f64,
}

#[derive(thiserror::Error, Debug)]
pub enum AnimationError {
    #[error("body has no scene handles: {0}")]
    Unregistered(#[from] RegistryError),

    #[error("entity {entity} of body {name:?} has no transform")]
    MissingEntity { name: String, entity: Entity },
}

/// Advance every body by `speed × dt` units of time.
///
/// Bodies are independent, so the result does not depend on iteration order.
/// A speed of zero leaves every angle untouched.
pub fn advance_bodies(registry: &mut OrbitRegistry, speed: f64, dt: f64) {
    let amount = speed * dt;
    if amount == 0.0 {
        return;
    }
    for body in registry.all_mut() {
        body.advance(amount);
    }
}

/// Write every body's angles into its scene-graph transforms.
///
/// The mesh carries the spin and sits `orbital_distance` along the pivot's
/// +X axis; the pivot carries the revolution. The central star has no pivot
/// and only spins.
pub fn sync_transforms(
    registry: &OrbitRegistry,
    transforms: &mut Query<&mut Transform>,
) -> Result<(), AnimationError> {
    for body in registry.all() {
        let handles = registry.handles(&body.name)?;
        let missing = |entity| AnimationError::MissingEntity {
            name: body.name.clone(),
            entity,
        };

        {
            let mut mesh = transforms
                .get_mut(handles.mesh)
                .map_err(|_| missing(handles.mesh))?;
            mesh.rotation = spin_rotation(body.angles.spin);
            if handles.pivot.is_some() {
                mesh.translation = Vec3::X * body.orbital_distance;
            }
        }

        if let Some(pivot) = handles.pivot {
            let mut pivot_transform = transforms.get_mut(pivot).map_err(|_| missing(pivot))?;
            pivot_transform.rotation = pivot_rotation(body.angles.orbit);
        }
    }
    Ok(())
}

fn advance_animation(
    time: Res<Time>,
    settings: Res<AnimationSettings>,
    speed: Res<SimulationSpeed>,
    mut registry: ResMut<OrbitRegistry>,
    mut clock: ResMut<AnimationClock>,
) {
    // Speed is sampled once; input handlers only run after this system.
    let s = speed.effective();
    let dt = settings.step.delta(time.delta_secs_f64());

    advance_bodies(&mut registry, s, dt);

    clock.frames += 1;
    clock.scaled_time += s * dt;
}

fn apply_body_transforms(
    registry: Res<OrbitRegistry>,
    mut transforms: Query<&mut Transform>,
    mut exit: MessageWriter<AppExit>,
) {
    // A broken scene graph means corrupted state: stop instead of skipping bodies.
    if let Err(err) = sync_transforms(&registry, &mut transforms) {
        error!("Animation aborted: {err}");
        exit.write(AppExit::error());
    }
}

fn log_start(registry: Res<OrbitRegistry>, speed: Res<SimulationSpeed>) {
    info!(
        "Animation running: {} bodies at {}",
        registry.len(),
        speed.label()
    );
}
