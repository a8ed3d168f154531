//! Orbit camera looking at the central star.
//!
//! Left-drag orbits, the scroll wheel zooms, Home returns to the initial view.

use std::f32::consts::FRAC_PI_2;

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};
use bevy_egui::EguiContexts;

/// Keep the camera just shy of straight up/down so `looking_at` stays stable.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Camera tunables.
#[derive(Resource, Clone, Debug)]
pub struct CameraSettings {
    /// Distance from the origin at startup and after a reset.
    pub initial_distance: f32,
    /// Pitch above the orbital plane at startup, in radians.
    pub initial_pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians of rotation per pixel dragged.
    pub orbit_sensitivity: f32,
    /// Fractional distance change per scroll line.
    pub zoom_speed: f32,
    /// Far clip plane; must enclose the outermost orbit.
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            initial_distance: 320.0,
            initial_pitch: 0.5,
            min_distance: 30.0,
            max_distance: 1500.0,
            orbit_sensitivity: 0.005,
            zoom_speed: 0.1,
            far: 5000.0,
        }
    }
}

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Spherical coordinates of the camera around the origin.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCameraState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitCameraState {
    pub fn initial(settings: &CameraSettings) -> Self {
        Self {
            yaw: 0.0,
            pitch: settings.initial_pitch,
            distance: settings.initial_distance,
        }
    }

    /// Rotate by a mouse drag of `delta` pixels.
    pub fn orbit(&mut self, delta: Vec2, settings: &CameraSettings) {
        self.yaw -= delta.x * settings.orbit_sensitivity;
        self.pitch = (self.pitch + delta.y * settings.orbit_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zoom by `lines` scroll lines; positive moves closer.
    pub fn zoom(&mut self, lines: f32, settings: &CameraSettings) {
        let factor = (1.0 - lines * settings.zoom_speed).max(0.1);
        self.distance =
            (self.distance * factor).clamp(settings.min_distance, settings.max_distance);
    }

    /// Camera transform for this state, looking at the origin.
    pub fn transform(&self) -> Transform {
        let horizontal = self.distance * self.pitch.cos();
        let eye = Vec3::new(
            horizontal * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            horizontal * self.yaw.cos(),
        );
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

impl Default for OrbitCameraState {
    fn default() -> Self {
        Self::initial(&CameraSettings::default())
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .init_resource::<OrbitCameraState>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (camera_orbit, camera_zoom, camera_reset, apply_camera_state).chain(),
            );
    }
}

/// Spawn the main camera with a perspective projection.
fn setup_camera(
    mut commands: Commands,
    settings: Res<CameraSettings>,
    mut state: ResMut<OrbitCameraState>,
) {
    *state = OrbitCameraState::initial(&settings);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            far: settings.far,
            ..default()
        }),
        state.transform(),
        MainCamera,
    ));
}

/// Whether egui is using the pointer, so camera input should be ignored.
fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// Handle left mouse button drag for orbiting.
fn camera_orbit(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    settings: Res<CameraSettings>,
    mut state: ResMut<OrbitCameraState>,
    mut contexts: EguiContexts,
) {
    if !mouse_buttons.pressed(MouseButton::Left) || mouse_motion.delta == Vec2::ZERO {
        return;
    }
    if pointer_over_ui(&mut contexts) {
        return;
    }
    state.orbit(mouse_motion.delta, &settings);
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    settings: Res<CameraSettings>,
    mut state: ResMut<OrbitCameraState>,
    mut contexts: EguiContexts,
) {
    if mouse_scroll.delta.y == 0.0 || pointer_over_ui(&mut contexts) {
        return;
    }
    state.zoom(mouse_scroll.delta.y, &settings);
}

fn camera_reset(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<CameraSettings>,
    mut state: ResMut<OrbitCameraState>,
) {
    if keys.just_pressed(KeyCode::Home) {
        *state = OrbitCameraState::initial(&settings);
        info!("Camera reset");
    }
}

fn apply_camera_state(
    state: Res<OrbitCameraState>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if !state.is_changed() {
        return;
    }
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = state.transform();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_looks_at_origin() {
        let state = OrbitCameraState::default();
        let transform = state.transform();
        assert_relative_eq!(transform.translation.length(), state.distance, epsilon = 1e-3);
        let to_origin = (-transform.translation).normalize();
        assert_relative_eq!(transform.forward().dot(to_origin), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_initial_view_is_above_plane() {
        let transform = OrbitCameraState::default().transform();
        assert!(transform.translation.y > 0.0);
    }

    #[test]
    fn test_zoom_clamps_to_limits() {
        let settings = CameraSettings::default();
        let mut state = OrbitCameraState::initial(&settings);
        for _ in 0..200 {
            state.zoom(5.0, &settings);
        }
        assert_eq!(state.distance, settings.min_distance);
        for _ in 0..200 {
            state.zoom(-5.0, &settings);
        }
        assert_eq!(state.distance, settings.max_distance);
    }

    #[test]
    fn test_pitch_never_flips() {
        let settings = CameraSettings::default();
        let mut state = OrbitCameraState::initial(&settings);
        state.orbit(Vec2::new(0.0, 1.0e6), &settings);
        assert_eq!(state.pitch, PITCH_LIMIT);
        state.orbit(Vec2::new(0.0, -1.0e6), &settings);
        assert_eq!(state.pitch, -PITCH_LIMIT);
    }
}
