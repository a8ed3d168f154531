//! Default solar system preset.
//!
//! Distances and radii are render units chosen for a readable scale model,
//! not physical values. Rates are radians per nominal frame at 1x speed.

use super::{CelestialBody, Ring};

/// Texture of Saturn's ring (RGBA, transparent gaps).
pub const SATURN_RING_TEXTURE: &str = "textures/2k_saturn_ring_alpha.png";

/// Texture of Uranus' ring.
pub const URANUS_RING_TEXTURE: &str = "textures/2k_uranus_ring.png";

/// All bodies of the default model, star first.
pub fn solar_system_bodies() -> Vec<CelestialBody> {
    vec![
        CelestialBody::star("Sun", 16.0, 0.004),
        CelestialBody::planet("Mercury", 1.6, 28.0, 0.004, 0.04),
        CelestialBody::planet("Venus", 2.4, 44.0, 0.002, 0.015),
        CelestialBody::planet("Earth", 2.6, 62.0, 0.02, 0.01),
        CelestialBody::planet("Mars", 1.8, 78.0, 0.018, 0.008),
        CelestialBody::planet("Jupiter", 8.0, 100.0, 0.04, 0.002),
        CelestialBody::planet("Saturn", 6.6, 138.0, 0.038, 0.0009)
            .with_ring(Ring::new(SATURN_RING_TEXTURE).with_outer_ratio(2.1)),
        CelestialBody::planet("Uranus", 4.2, 176.0, 0.03, 0.0004)
            .with_ring(Ring::new(URANUS_RING_TEXTURE).with_outer_ratio(1.7)),
        CelestialBody::planet("Neptune", 4.0, 200.0, 0.032, 0.0001),
    ]
}
