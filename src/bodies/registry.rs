//! Ordered, name-indexed catalog of celestial bodies.
//!
//! The registry is the single owner of every body's description and angular
//! state. It also remembers which entities the scene composer spawned for
//! each body so the animation systems can find them again by name.

use std::collections::HashMap;

use bevy::prelude::*;

use super::CelestialBody;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("a body named {0:?} is already registered")]
    DuplicateName(String),

    #[error("no body named {0:?}")]
    NotFound(String),

    #[error("body names must not be empty")]
    EmptyName,

    #[error("invalid geometry for {name:?}: {reason}")]
    InvalidGeometry { name: String, reason: &'static str },
}

/// Scene-graph entities owned by one body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyHandles {
    /// Visible sphere; carries the spin rotation.
    pub mesh: Entity,
    /// Invisible parent at the origin carrying the orbital rotation.
    /// `None` for the central star.
    pub pivot: Option<Entity>,
    /// Ring annulus, a sibling of `mesh` under `pivot`.
    pub ring: Option<Entity>,
}

/// Resource holding all bodies in insertion order.
#[derive(Resource, Debug, Default)]
pub struct OrbitRegistry {
    bodies: Vec<CelestialBody>,
    index: HashMap<String, usize>,
    handles: HashMap<String, BodyHandles>,
}

impl OrbitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated with the default solar system.
    pub fn solar_system() -> Result<Self, RegistryError> {
        Self::from_bodies(super::solar_system_bodies())
    }

    /// Build a registry from bodies in order, stopping at the first invalid one.
    pub fn from_bodies(
        bodies: impl IntoIterator<Item = CelestialBody>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for body in bodies {
            registry.add(body)?;
        }
        Ok(registry)
    }

    /// Append a body. On error the registry is left untouched.
    pub fn add(&mut self, body: CelestialBody) -> Result<(), RegistryError> {
        if body.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.index.contains_key(&body.name) {
            return Err(RegistryError::DuplicateName(body.name));
        }
        validate_geometry(&body)?;

        self.index.insert(body.name.clone(), self.bodies.len());
        self.bodies.push(body);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&CelestialBody, RegistryError> {
        self.index
            .get(name)
            .map(|&i| &self.bodies[i])
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut CelestialBody, RegistryError> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.bodies[i]),
            None => Err(RegistryError::NotFound(name.to_string())),
        }
    }

    /// Bodies in insertion order. The iterator is cheap to clone, so callers
    /// can restart it.
    pub fn all(&self) -> std::slice::Iter<'_, CelestialBody> {
        self.bodies.iter()
    }

    /// Mutable access for the animation step. No body's update reads another
    /// body, so the order here carries no meaning.
    pub fn all_mut(&mut self) -> std::slice::IterMut<'_, CelestialBody> {
        self.bodies.iter_mut()
    }

    /// The central star, if one has been registered.
    pub fn central(&self) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.is_central())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Record the entities spawned for `name`.
    pub fn register(&mut self, name: &str, handles: BodyHandles) -> Result<(), RegistryError> {
        if !self.index.contains_key(name) {
            return Err(RegistryError::NotFound(name.to_string()));
        }
        self.handles.insert(name.to_string(), handles);
        Ok(())
    }

    pub fn handles(&self, name: &str) -> Result<&BodyHandles, RegistryError> {
        self.handles
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Whether every body has had its entities registered.
    pub fn is_composed(&self) -> bool {
        !self.bodies.is_empty() && self.bodies.iter().all(|b| self.handles.contains_key(&b.name))
    }
}

fn validate_geometry(body: &CelestialBody) -> Result<(), RegistryError> {
    let invalid = |reason| RegistryError::InvalidGeometry {
        name: body.name.clone(),
        reason,
    };

    if !(body.radius.is_finite() && body.radius > 0.0) {
        return Err(invalid("radius must be positive"));
    }
    if !(body.orbital_distance.is_finite() && body.orbital_distance >= 0.0) {
        return Err(invalid("orbital distance must be non-negative"));
    }
    if !body.self_rotation_rate.is_finite() || !body.revolution_rate.is_finite() {
        return Err(invalid("rates must be finite"));
    }
    if body.orbital_distance == 0.0 && body.revolution_rate != 0.0 {
        return Err(invalid("a body at the origin cannot revolve"));
    }
    if let Some(ring) = &body.ring
        && !(ring.outer_ratio.is_finite() && ring.outer_ratio > 1.0)
    {
        return Err(invalid("ring outer ratio must exceed 1"));
    }
    Ok(())
}
