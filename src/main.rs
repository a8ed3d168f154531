//! Orrery - animated solar system scale model
//!
//! A desktop application showing the Sun and eight planets spinning and
//! revolving, with keyboard and dock controls for the animation speed.

use bevy::prelude::*;
use bevy::window::WindowPlugin;
use bevy_egui::EguiPlugin;

use orrery::animation::AnimationPlugin;
use orrery::bodies::OrbitRegistry;
use orrery::camera::CameraPlugin;
use orrery::input::InputPlugin;
use orrery::render::RenderPlugin;
use orrery::types::{AnimationPhase, SimulationSpeed};
use orrery::ui::UiPlugin;

fn main() -> AppExit {
    let registry = match OrbitRegistry::solar_system() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("invalid solar system preset: {err}");
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::BLACK))
        // Insert resources before plugins that depend on them
        .insert_resource(registry)
        .insert_resource(SimulationSpeed::default())
        .init_state::<AnimationPhase>()
        .add_plugins((
            CameraPlugin,
            AnimationPlugin,
            RenderPlugin,
            InputPlugin,
            UiPlugin,
        ))
        .run()
}
