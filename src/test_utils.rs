//! Test utilities for animation and composition tests.
//!
//! Provides small registries used across unit tests and a headless Bevy app
//! with just enough asset storage for the scene composer.

/// Fixtures for creating test registries.
pub mod fixtures {
    use crate::bodies::{CelestialBody, OrbitRegistry, Ring};

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
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;
    use bevy::state::app::StatesPlugin;
    use bevy::transform::TransformPlugin;

    /// Create a minimal Bevy app for testing without rendering.
    ///
    /// Mesh, material and image storage are plain resources so composition
    /// can run without a GPU.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, TransformPlugin));
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>();
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::*;

    #[test]
    fn test_fixtures_have_a_central_body() {
        for registry in [
            fixtures::sun_earth(),
            fixtures::sun_mercury_venus(),
            fixtures::sun_saturn(),
        ] {
            assert_eq!(registry.central().unwrap().name, "Sun");
        }
    }

    #[test]
    fn test_headless_app_updates() {
        let mut app = bevy_test::headless_app();
        app.update();
        assert!(app.world().contains_resource::<Assets<Mesh>>());
    }
}
