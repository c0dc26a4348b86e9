//! Keyboard-driven rendering modes.

use crate::event::{Action, Key};

/// How the cube's triangles are rasterized.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// Filled triangles.
    #[default]
    Fill,
    /// Triangle edges only.
    Wireframe,
    /// Vertices only.
    Points,
}

/// What a key event asks the window to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyCommand {
    /// Switch to the given rendering mode.
    SetMode(RenderMode),
    /// Write the currently displayed frame to the screenshot path.
    Screenshot,
}

/// Maps a key event to a command.
///
/// * `W` pressed: wireframe.
/// * `P` pressed: points.
/// * `S` released: screenshot.
/// * any other key released: back to filled rendering.
///
/// Releasing `W` or `P` thus ends the mode they started.
pub fn command_for_key(key: Key, action: Action) -> Option<KeyCommand> {
    match (key, action) {
        (Key::W, Action::Press) => Some(KeyCommand::SetMode(RenderMode::Wireframe)),
        (Key::P, Action::Press) => Some(KeyCommand::SetMode(RenderMode::Points)),
        (Key::S, Action::Release) => Some(KeyCommand::Screenshot),
        (_, Action::Release) => Some(KeyCommand::SetMode(RenderMode::Fill)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_last_while_the_key_is_held() {
        assert_eq!(
            command_for_key(Key::W, Action::Press),
            Some(KeyCommand::SetMode(RenderMode::Wireframe))
        );
        assert_eq!(
            command_for_key(Key::W, Action::Release),
            Some(KeyCommand::SetMode(RenderMode::Fill))
        );
        assert_eq!(
            command_for_key(Key::P, Action::Press),
            Some(KeyCommand::SetMode(RenderMode::Points))
        );
        assert_eq!(
            command_for_key(Key::P, Action::Release),
            Some(KeyCommand::SetMode(RenderMode::Fill))
        );
    }

    #[test]
    fn screenshot_fires_on_release_only() {
        assert_eq!(command_for_key(Key::S, Action::Press), None);
        assert_eq!(
            command_for_key(Key::S, Action::Release),
            Some(KeyCommand::Screenshot)
        );
    }

    #[test]
    fn other_keys_reset_on_release() {
        assert_eq!(command_for_key(Key::A, Action::Press), None);
        assert_eq!(command_for_key(Key::Unknown, Action::Press), None);
        assert_eq!(
            command_for_key(Key::Space, Action::Release),
            Some(KeyCommand::SetMode(RenderMode::Fill))
        );
    }
}
