//! Celestial body descriptions and their angular state.
//!
//! A body is static geometry (radius, orbital distance, textures) plus two
//! mutable angles: `spin` about its own vertical axis and `orbit` about the
//! system origin. Scene-graph transforms are derived from these angles every
//! frame; nothing else about a body changes after startup.
//!
//! Coordinate frame:
//! - Y is up; the orbital plane is XZ with the star at the origin.
//! - A body at orbit angle θ sits at `(d cos θ, 0, d sin θ)`.

pub mod data;
pub mod registry;

pub use data::solar_system_bodies;
pub use registry::{BodyHandles, OrbitRegistry, RegistryError};

use std::f64::consts::TAU;

use bevy::prelude::*;

/// Default outer/inner radius ratio for ring geometry.
pub const DEFAULT_RING_RATIO: f32 = 2.0;

/// Annular ring attached to a body.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    /// Asset path of the ring texture.
    pub texture: String,
    /// Outer radius as a multiple of the body radius.
    pub outer_ratio: f32,
}

impl Ring {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            outer_ratio: DEFAULT_RING_RATIO,
        }
    }

    pub fn with_outer_ratio(mut self, outer_ratio: f32) -> Self {
        self.outer_ratio = outer_ratio;
        self
    }

    /// Inner edge of the ring: it starts at the body's surface.
    pub fn inner_radius(&self, body_radius: f32) -> f32 {
        body_radius
    }

    pub fn outer_radius(&self, body_radius: f32) -> f32 {
        body_radius * self.outer_ratio
    }
}

/// Angular state of a body, in radians, kept in `[0, 2π)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyAngles {
    /// Rotation about the body's own vertical axis.
    pub spin: f64,
    /// Revolution about the origin.
    pub orbit: f64,
}

impl BodyAngles {
    /// Advance both angles and wrap them back into `[0, 2π)`.
    pub fn advance(&mut self, spin_delta: f64, orbit_delta: f64) {
        self.spin = wrap_angle(self.spin + spin_delta);
        self.orbit = wrap_angle(self.orbit + orbit_delta);
    }
}

/// Wrap into `[0, 2π)`. `rem_euclid` rounds tiny negatives up to exactly `TAU`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// One body of the model: the central star or anything orbiting it.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    /// Unique, non-empty identifier.
    pub name: String,
    /// Rendered sphere radius (render units).
    pub radius: f32,
    /// Distance from the origin (render units). Zero for the central star.
    pub orbital_distance: f32,
    /// Spin rate, radians per unit time.
    pub self_rotation_rate: f64,
    /// Revolution rate, radians per unit time. Zero for the central star.
    pub revolution_rate: f64,
    /// Asset path of the surface texture.
    pub texture: String,
    pub ring: Option<Ring>,
    pub angles: BodyAngles,
}

impl CelestialBody {
    /// Create the central star: fixed at the origin, spinning only.
    pub fn star(name: impl Into<String>, radius: f32, self_rotation_rate: f64) -> Self {
        Self::planet(name, radius, 0.0, self_rotation_rate, 0.0)
    }

    /// Create an orbiting body with a texture path derived from its name.
    pub fn planet(
        name: impl Into<String>,
        radius: f32,
        orbital_distance: f32,
        self_rotation_rate: f64,
        revolution_rate: f64,
    ) -> Self {
        let name = name.into();
        let texture = default_texture_path(&name);
        Self {
            name,
            radius,
            orbital_distance,
            self_rotation_rate,
            revolution_rate,
            texture,
            ring: None,
            angles: BodyAngles::default(),
        }
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = texture.into();
        self
    }

    pub fn with_ring(mut self, ring: Ring) -> Self {
        self.ring = Some(ring);
        self
    }

    /// The central star sits at the origin and never revolves.
    pub fn is_central(&self) -> bool {
        self.orbital_distance == 0.0 && self.revolution_rate == 0.0
    }

    /// Advance by `amount` units of scaled time (speed × dt).
    pub fn advance(&mut self, amount: f64) {
        self.angles.advance(
            self.self_rotation_rate * amount,
            self.revolution_rate * amount,
        );
    }

    /// World-space center of the body for its current orbit angle.
    pub fn world_position(&self) -> Vec3 {
        orbit_position(self.orbital_distance, self.angles.orbit)
    }

    /// Every texture this body needs, surface first.
    pub fn texture_paths(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.texture.as_str()).chain(self.ring.as_ref().map(|r| r.texture.as_str()))
    }
}

/// Conventional texture location for a body, e.g. `textures/2k_earth.jpg`.
pub fn default_texture_path(name: &str) -> String {
    format!("textures/2k_{}.jpg", name.to_lowercase())
}

/// Point on a circle of radius `distance` in the orbital plane.
pub fn orbit_position(distance: f32, angle: f64) -> Vec3 {
    let d = distance as f64;
    Vec3::new((d * angle.cos()) as f32, 0.0, (d * angle.sin()) as f32)
}

/// Rotation of a pivot that carries its child from `+X` to [`orbit_position`].
///
/// A positive rotation about Y maps +X towards -Z, hence the negated angle.
pub fn pivot_rotation(orbit_angle: f64) -> Quat {
    Quat::from_rotation_y(-orbit_angle as f32)
}

/// Rotation of a body mesh about its own vertical axis.
pub fn spin_rotation(spin_angle: f64) -> Quat {
    Quat::from_rotation_y(spin_angle as f32)
}
