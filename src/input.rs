//! Keyboard shortcuts for the speed control and display toggles.
//!
//! Shortcuts run in [`AnimationSet::Input`], after the frame has been
//! advanced, so a press during frame N takes effect on frame N+1.

use bevy::prelude::*;

use crate::render::OrbitPathSettings;
use crate::types::{AnimationSet, SimulationSpeed};

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_shortcuts.in_set(AnimationSet::Input));
    }
}

/// A discrete change to the simulation speed, from a key or a dock button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedCommand {
    Faster,
    Slower,
    TogglePause,
    Reset,
}

impl SpeedCommand {
    /// Keys bound to each command. Either key of a pair triggers it.
    pub const BINDINGS: [(SpeedCommand, [KeyCode; 2]); 4] = [
        (
            SpeedCommand::Faster,
            [KeyCode::BracketRight, KeyCode::NumpadAdd],
        ),
        (
            SpeedCommand::Slower,
            [KeyCode::BracketLeft, KeyCode::NumpadSubtract],
        ),
        (SpeedCommand::TogglePause, [KeyCode::Space, KeyCode::Pause]),
        (SpeedCommand::Reset, [KeyCode::Digit1, KeyCode::Numpad1]),
    ];

    pub fn apply(self, speed: &mut SimulationSpeed) {
        match self {
            SpeedCommand::Faster => speed.increase(),
            SpeedCommand::Slower => speed.decrease(),
            SpeedCommand::TogglePause => speed.toggle_pause(),
            SpeedCommand::Reset => speed.reset(),
        }
    }
}

/// Commands whose keys were pressed this frame, in binding order.
///
/// Holding a key does not repeat: each press is one step.
pub fn pressed_commands(keys: &ButtonInput<KeyCode>) -> Vec<SpeedCommand> {
    SpeedCommand::BINDINGS
        .iter()
        .filter(|(_, codes)| keys.any_just_pressed(*codes))
        .map(|(command, _)| *command)
        .collect()
}

/// Apply every pressed speed command. Returns whether the speed changed.
pub fn apply_speed_keys(keys: &ButtonInput<KeyCode>, speed: &mut SimulationSpeed) -> bool {
    let before = speed.clone();
    for command in pressed_commands(keys) {
        command.apply(speed);
    }
    *speed != before
}

/// Handle keyboard shortcuts for simulation control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut speed: ResMut<SimulationSpeed>,
    mut guides: ResMut<OrbitPathSettings>,
) {
    // Only touch the resource on a real change so change detection stays quiet.
    let mut next = speed.clone();
    if apply_speed_keys(&keys, &mut next) {
        if next.paused != speed.paused {
            info!("Animation {}", if next.paused { "paused" } else { "resumed" });
        }
        if next.multiplier != speed.multiplier {
            info!("Speed: {}", next.label());
        }
        *speed = next;
    }

    // O: toggle orbit guides
    if keys.just_pressed(KeyCode::KeyO) {
        guides.visible = !guides.visible;
        info!(
            "Orbit guides {}",
            if guides.visible { "shown" } else { "hidden" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(codes: &[KeyCode]) -> ButtonInput<KeyCode> {
        let mut keys = ButtonInput::default();
        for code in codes {
            keys.press(*code);
        }
        keys
    }

    #[test]
    fn test_faster_key_doubles_speed() {
        let mut speed = SimulationSpeed::default();
        assert!(apply_speed_keys(&press(&[KeyCode::BracketRight]), &mut speed));
        assert_eq!(speed.multiplier, 2.0);
    }

    #[test]
    fn test_numpad_aliases() {
        let mut speed = SimulationSpeed::default();
        apply_speed_keys(&press(&[KeyCode::NumpadSubtract]), &mut speed);
        assert_eq!(speed.multiplier, 0.5);
        apply_speed_keys(&press(&[KeyCode::NumpadAdd]), &mut speed);
        assert_eq!(speed.multiplier, 1.0);
    }

    #[test]
    fn test_both_keys_of_a_pair_count_once() {
        let keys = press(&[KeyCode::BracketRight, KeyCode::NumpadAdd]);
        assert_eq!(pressed_commands(&keys), vec![SpeedCommand::Faster]);
    }

    #[test]
    fn test_held_key_does_not_repeat() {
        let mut keys = press(&[KeyCode::BracketRight]);
        keys.clear();
        let mut speed = SimulationSpeed::default();
        assert!(!apply_speed_keys(&keys, &mut speed));
        assert_eq!(speed.multiplier, 1.0);
    }

    #[test]
    fn test_space_toggles_pause() {
        let mut speed = SimulationSpeed::new(4.0);
        apply_speed_keys(&press(&[KeyCode::Space]), &mut speed);
        assert!(speed.paused);
        assert_eq!(speed.effective(), 0.0);
        assert_eq!(speed.multiplier, 4.0);
    }

    #[test]
    fn test_reset_key() {
        let mut speed = SimulationSpeed::new(16.0);
        apply_speed_keys(&press(&[KeyCode::Digit1]), &mut speed);
        assert_eq!(speed.multiplier, 1.0);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut speed = SimulationSpeed::default();
        assert!(!apply_speed_keys(&press(&[KeyCode::KeyQ]), &mut speed));
    }
}
