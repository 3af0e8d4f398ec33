//! Keyboard bindings.
//!
//! | Key                 | Action                         |
//! |---------------------|--------------------------------|
//! | `1`–`4`             | metal, wall, wood, plastic     |
//! | `←` / `→`           | move light along -X / +X       |
//! | `↓` / `↑`           | move light along -Y / +Y       |
//! | `PageDown` / `PageUp` | move light along -Z / +Z     |
//! | `Esc` (on release)  | quit                           |

use crate::input::Input;
use crate::material::MaterialKind;
use crate::scene::{Axis, SceneState};
use tracing::{debug, info};
use winit::keyboard::KeyCode;

/// An action requested by the user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    SelectMaterial(MaterialKind),
    /// Move the light one step along `axis`; `sign` is `1.0` or `-1.0`.
    MoveLight { axis: Axis, sign: f32 },
    Quit,
}

/// Maps a freshly pressed key to its command.
pub fn command_for_press(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::Digit1 | KeyCode::Numpad1 => Command::SelectMaterial(MaterialKind::Metal),
        KeyCode::Digit2 | KeyCode::Numpad2 => Command::SelectMaterial(MaterialKind::Wall),
        KeyCode::Digit3 | KeyCode::Numpad3 => Command::SelectMaterial(MaterialKind::Wood),
        KeyCode::Digit4 | KeyCode::Numpad4 => Command::SelectMaterial(MaterialKind::Plastic),
        KeyCode::ArrowRight => Command::MoveLight { axis: Axis::X, sign: 1.0 },
        KeyCode::ArrowLeft => Command::MoveLight { axis: Axis::X, sign: -1.0 },
        KeyCode::ArrowUp => Command::MoveLight { axis: Axis::Y, sign: 1.0 },
        KeyCode::ArrowDown => Command::MoveLight { axis: Axis::Y, sign: -1.0 },
        KeyCode::PageUp => Command::MoveLight { axis: Axis::Z, sign: 1.0 },
        KeyCode::PageDown => Command::MoveLight { axis: Axis::Z, sign: -1.0 },
        _ => return None,
    };
    Some(command)
}

/// Maps a released key to its command.
pub fn command_for_release(key: KeyCode) -> Option<Command> {
    (key == KeyCode::Escape).then_some(Command::Quit)
}

/// Collects this frame's commands from the input state.
pub fn frame_commands(input: &Input) -> Vec<Command> {
    input
        .pressed_keys()
        .filter_map(command_for_press)
        .chain(input.released_keys().filter_map(command_for_release))
        .collect()
}

/// Applies a state-changing command. Returns `false` for [`Command::Quit`],
/// which the caller handles.
pub fn apply(state: &mut SceneState, command: Command) -> bool {
    match command {
        Command::SelectMaterial(kind) => {
            if state.select_material(kind) {
                info!("Material: {kind}");
            }
            true
        }
        Command::MoveLight { axis, sign } => {
            state.step_light(axis, sign);
            debug!(position = ?state.light.position, "light moved along {axis:?}");
            true
        }
        Command::Quit => false,
    }
}
