//! Scene lighting: the star is the light source.

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

/// Plugin lighting the scene from the central star.
pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LightingSettings>()
            .add_systems(Startup, spawn_lighting);
    }
}

/// Light tunables.
#[derive(Resource, Clone, Debug)]
pub struct LightingSettings {
    /// Point light intensity at the origin, in lumens.
    pub star_intensity: f32,
    /// Reach of the star's light. Must cover the outermost orbit.
    pub star_range: f32,
    /// Ambient brightness so night sides are not pitch black.
    pub ambient_brightness: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            star_intensity: 2.0e9,
            star_range: 2000.0,
            ambient_brightness: 80.0,
        }
    }
}

fn spawn_lighting(mut commands: Commands, settings: Res<LightingSettings>) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: settings.ambient_brightness,
        ..default()
    });

    // Inside the star's sphere; the star material is unlit so it is not shadowed.
    commands.spawn((
        PointLight {
            intensity: settings.star_intensity,
            range: settings.star_range,
            shadows_enabled: false,
            ..default()
        },
        Transform::IDENTITY,
        Name::new("Star light"),
    ));

    info!("Scene lighting initialized");
}
