//! Rendering for the orrery.
//!
//! Texture loading gates composition; composition spawns the entity tree the
//! animation drives; orbit guides and lighting decorate it.

pub mod compose;
mod lighting;
pub mod orbits;
pub mod textures;

use bevy::prelude::*;

use self::compose::ComposePlugin;
use self::lighting::LightingPlugin;
use self::orbits::OrbitPathPlugin;
use self::textures::TexturePlugin;

// Re-export for use in other modules
pub use self::compose::{
    BodyMesh, CentralBody, CompositionError, CompositionSummary, OrbitPivot, RingMesh,
    ScenePlan, SceneSettings, spawn_scene,
};
pub use self::lighting::LightingSettings;
pub use self::orbits::{OrbitGuide, OrbitPathSettings};
pub use self::textures::{
    BodyTextures, MissingTexture, TextureError, TextureGate, TextureLoad, TextureSet,
};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((TexturePlugin, ComposePlugin, OrbitPathPlugin, LightingPlugin));
    }
}
