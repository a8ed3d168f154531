//! Dock (bottom bar) for the speed control and display toggles.
//!
//! The dock provides a single horizontal strip with:
//! - Play/Pause toggle
//! - Slower / current speed / faster
//! - Reset to 1x
//! - Orbit guide toggle
//! - Help button with shortcuts tooltip

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::animation::AnimationClock;
use crate::bodies::OrbitRegistry;
use crate::input::SpeedCommand;
use crate::render::OrbitPathSettings;
use crate::types::{AnimationPhase, MAX_SPEED, MIN_SPEED, SimulationSpeed};
use crate::ui::icons;

/// Colors for the dock UI.
mod colors {
    use bevy_egui::egui::Color32;

    pub const DOCK_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 240);
    pub const SPEED_ACTIVE: Color32 = Color32::from_rgb(85, 221, 136);
    pub const SPEED_INACTIVE: Color32 = Color32::from_rgb(120, 120, 130);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

/// Resource for help tooltip visibility.
#[derive(Resource, Default)]
pub struct HelpTooltipState {
    pub visible: bool,
}

/// System that renders the dock at the bottom.
pub fn dock_system(
    mut contexts: EguiContexts,
    mut speed: ResMut<SimulationSpeed>,
    mut guides: ResMut<OrbitPathSettings>,
    mut help_state: ResMut<HelpTooltipState>,
    registry: Res<OrbitRegistry>,
    clock: Res<AnimationClock>,
    phase: Res<State<AnimationPhase>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut pressed: Vec<SpeedCommand> = Vec::new();
    let mut toggle_guides = false;

    egui::TopBottomPanel::bottom("dock")
        .exact_height(56.0)
        .frame(
            egui::Frame::NONE
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::symmetric(20, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 16.0;

                render_play_pause(ui, &speed, &mut pressed);

                ui.separator();

                render_speed_controls(ui, &speed, &mut pressed);

                ui.separator();

                ui.label(
                    egui::RichText::new(status_text(&registry, &clock, *phase.get()))
                        .size(14.0)
                        .color(colors::TEXT),
                );

                // Spacer to push remaining buttons to the right
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;

                    render_help_button(ui, &mut help_state);
                    toggle_guides = render_orbit_toggle(ui, guides.visible);
                    render_reset_button(ui, &mut pressed);
                });
            });
        });

    for command in pressed {
        command.apply(&mut speed);
        info!("Dock: {command:?}, speed {}", speed.label());
    }

    if toggle_guides {
        guides.visible = !guides.visible;
    }

    if help_state.visible {
        render_help_overlay(ctx);
    }
}

fn render_play_pause(ui: &mut egui::Ui, speed: &SimulationSpeed, pressed: &mut Vec<SpeedCommand>) {
    let (icon, color, tooltip) = if speed.paused {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    } else {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    };

    let button = egui::Button::new(egui::RichText::new(icon).size(22.0).color(color))
        .min_size(egui::vec2(40.0, 36.0));

    if ui.add(button).on_hover_text(tooltip).clicked() {
        pressed.push(SpeedCommand::TogglePause);
    }
}

/// Slower button, the current multiplier, faster button.
fn render_speed_controls(
    ui: &mut egui::Ui,
    speed: &SimulationSpeed,
    pressed: &mut Vec<SpeedCommand>,
) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        let slower = egui::Button::new(egui::RichText::new(icons::SLOWER).size(18.0))
            .min_size(egui::vec2(32.0, 28.0));
        if ui
            .add_enabled(speed.multiplier > MIN_SPEED, slower)
            .on_hover_text("Slower ([)")
            .clicked()
        {
            pressed.push(SpeedCommand::Slower);
        }

        let color = if speed.paused {
            colors::SPEED_INACTIVE
        } else {
            colors::SPEED_ACTIVE
        };
        ui.add_sized(
            egui::vec2(56.0, 28.0),
            egui::Label::new(
                egui::RichText::new(speed.label())
                    .monospace()
                    .size(14.0)
                    .color(color)
                    .strong(),
            ),
        );

        let faster = egui::Button::new(egui::RichText::new(icons::FASTER).size(18.0))
            .min_size(egui::vec2(32.0, 28.0));
        if ui
            .add_enabled(speed.multiplier < MAX_SPEED, faster)
            .on_hover_text("Faster (])")
            .clicked()
        {
            pressed.push(SpeedCommand::Faster);
        }
    });
}

/// Body count and elapsed animation, or a loading notice while textures
/// are still arriving.
fn status_text(registry: &OrbitRegistry, clock: &AnimationClock, phase: AnimationPhase) -> String {
    match phase {
        AnimationPhase::Idle => "Loading textures...".to_string(),
        AnimationPhase::Running => format!(
            "{} {} bodies  t={:.0} ({} frames)",
            icons::SUN,
            registry.len(),
            clock.scaled_time,
            clock.frames
        ),
    }
}

fn render_reset_button(ui: &mut egui::Ui, pressed: &mut Vec<SpeedCommand>) {
    let button = egui::Button::new(egui::RichText::new(icons::RESET).size(18.0))
        .min_size(egui::vec2(36.0, 32.0));
    if ui.add(button).on_hover_text("Reset speed to 1x (1)").clicked() {
        pressed.push(SpeedCommand::Reset);
    }
}

/// Returns whether the toggle was clicked.
fn render_orbit_toggle(ui: &mut egui::Ui, visible: bool) -> bool {
    let color = if visible {
        colors::SPEED_ACTIVE
    } else {
        colors::SPEED_INACTIVE
    };
    let button = egui::Button::new(egui::RichText::new(icons::ORBIT).size(18.0).color(color))
        .min_size(egui::vec2(36.0, 32.0));
    ui.add(button).on_hover_text("Orbit guides (O)").clicked()
}

fn render_help_button(ui: &mut egui::Ui, help_state: &mut HelpTooltipState) {
    let button = egui::Button::new(egui::RichText::new(icons::HELP).size(18.0))
        .min_size(egui::vec2(36.0, 32.0));
    if ui.add(button).on_hover_text("Keyboard shortcuts").clicked() {
        help_state.visible = !help_state.visible;
    }
}

fn render_help_overlay(ctx: &egui::Context) {
    egui::Window::new("Shortcuts")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -72.0))
        .show(ctx, |ui| {
            egui::Grid::new("shortcuts").striped(true).show(ui, |ui| {
                for (key, action) in SHORTCUTS {
                    ui.label(egui::RichText::new(*key).monospace());
                    ui.label(*action);
                    ui.end_row();
                }
            });
        });
}

const SHORTCUTS: &[(&str, &str)] = &[
    ("Space", "Pause / resume"),
    ("] / Num+", "Faster"),
    ("[ / Num-", "Slower"),
    ("1", "Reset speed to 1x"),
    ("O", "Toggle orbit guides"),
    ("Drag", "Orbit camera"),
    ("Scroll", "Zoom"),
    ("Home", "Reset camera"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn test_status_while_loading() {
        let text = status_text(
            &fixtures::sun_earth(),
            &AnimationClock::default(),
            AnimationPhase::Idle,
        );
        assert_eq!(text, "Loading textures...");
    }

    #[test]
    fn test_status_shows_clock() {
        let clock = AnimationClock {
            frames: 120,
            scaled_time: 240.0,
        };
        let text = status_text(&fixtures::sun_earth(), &clock, AnimationPhase::Running);
        assert!(text.contains("2 bodies"));
        assert!(text.contains("t=240"));
        assert!(text.contains("120 frames"));
    }
}
