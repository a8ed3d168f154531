//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::transform::TransformPlugin;
use orrery::animation::AnimationPlugin;
use orrery::bodies::{CelestialBody, OrbitRegistry, Ring};
use orrery::render::compose::ComposePlugin;
use orrery::render::orbits::OrbitPathPlugin;
use orrery::render::{BodyTextures, TextureGate, TextureLoad};
use orrery::types::{AnimationPhase, SimulationSpeed};

/// Sun plus a single Earth at distance 120 (revolution 0.01, spin 0.02).
pub fn sun_earth() -> OrbitRegistry {
    OrbitRegistry::from_bodies([
        CelestialBody::star("Sun", 10.0, 0.004),
        CelestialBody::planet("Earth", 2.0, 120.0, 0.02, 0.01),
    ])
    .unwrap()
}

/// Sun with Mercury and Venus, no rings.
pub fn sun_mercury_venus() -> OrbitRegistry {
    OrbitRegistry::from_bodies([
        CelestialBody::star("Sun", 10.0, 0.004),
        CelestialBody::planet("Mercury", 0.8, 28.0, 0.004, 0.04),
        CelestialBody::planet("Venus", 1.2, 44.0, 0.002, 0.015),
    ])
    .unwrap()
}

/// Sun plus a ringed planet.
pub fn sun_saturn() -> OrbitRegistry {
    OrbitRegistry::from_bodies([
        CelestialBody::star("Sun", 10.0, 0.004),
        CelestialBody::planet("Saturn", 4.0, 138.0, 0.038, 0.0009)
            .with_ring(Ring::new("textures/2k_saturn_ring_alpha.png")),
    ])
    .unwrap()
}

/// Every texture the registry names, already decoded and the gate open.
pub fn resolved_textures(registry: &OrbitRegistry) -> BodyTextures {
    let mut textures = BodyTextures::default();
    for body in registry.all() {
        for path in body.texture_paths() {
            textures.insert(path, Handle::default());
            textures.record(path, TextureLoad::Loaded);
        }
    }
    textures.gate = TextureGate::Ready;
    textures
}

/// Minimal Bevy app without rendering, with plain asset storage.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, TransformPlugin));
    app.init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .init_resource::<Assets<Image>>();
    app
}

/// Headless app that composes `registry` on its first update and animates
/// from the second one on.
pub fn orrery_app(registry: OrbitRegistry, textures: BodyTextures) -> App {
    let mut app = headless_app();
    app.init_state::<AnimationPhase>()
        .insert_resource(registry)
        .insert_resource(textures)
        .insert_resource(SimulationSpeed::default())
        .add_plugins((ComposePlugin, OrbitPathPlugin, AnimationPlugin));
    app
}

/// Orrery app whose textures are all already available.
pub fn ready_app(registry: OrbitRegistry) -> App {
    let textures = resolved_textures(&registry);
    orrery_app(registry, textures)
}

pub fn phase(app: &App) -> AnimationPhase {
    *app.world().resource::<State<AnimationPhase>>().get()
}
