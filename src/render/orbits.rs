//! Orbit-path guides.
//!
//! Each orbiting body gets a static closed polyline on its orbital circle.
//! Guides sit at the scene root, never move, and are only shown or hidden.

use std::f64::consts::TAU;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;

use crate::bodies::orbit_position;

/// Plugin providing orbit guide settings and visibility toggling.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPathSettings>()
            .add_systems(Update, apply_guide_visibility);
    }
}

/// Settings for orbit path rendering.
#[derive(Resource, Clone, Debug)]
pub struct OrbitPathSettings {
    /// Whether to show orbit paths.
    pub visible: bool,
    /// Number of segments per circle (higher = smoother).
    pub segments: u32,
    /// Alpha value for the guide color.
    pub alpha: f32,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            segments: 256,
            alpha: 0.35,
        }
    }
}

impl OrbitPathSettings {
    /// Segment count actually used; very coarse circles look like polygons.
    pub fn effective_segments(&self) -> u32 {
        self.segments.max(16)
    }

    pub fn color(&self) -> Color {
        Color::srgba(0.8, 0.8, 0.85, self.alpha)
    }
}

/// Marker for an orbit guide, with the radius it traces.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitGuide {
    pub radius: f32,
}

/// Evenly spaced points on the orbital circle, closed: the last point
/// repeats the first.
pub fn orbit_guide_points(radius: f32, segments: u32) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| {
            // Reuse the first angle for the closing point so it matches exactly.
            let i = if i == segments { 0 } else { i };
            let angle = i as f64 / segments as f64 * TAU;
            orbit_position(radius, angle)
        })
        .collect()
}

/// Line-strip mesh tracing the orbital circle.
pub fn orbit_guide_mesh(radius: f32, segments: u32) -> Mesh {
    Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, orbit_guide_points(radius, segments))
}

/// Visibility a guide should have for the given settings.
pub fn guide_visibility(settings: &OrbitPathSettings) -> Visibility {
    if settings.visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn apply_guide_visibility(
    settings: Res<OrbitPathSettings>,
    mut guides: Query<&mut Visibility, With<OrbitGuide>>,
) {
    if !settings.is_changed() {
        return;
    }
    let visibility = guide_visibility(&settings);
    for mut guide in &mut guides {
        *guide = visibility;
    }
}
