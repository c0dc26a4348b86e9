//! Conversion of winit input into this crate's events.

use crate::event::{Action, Key, Modifiers, MouseButton, WindowEvent};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent as WinitWindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Pixels scrolled per wheel line.
const LINE_SCROLL_PIXELS: f64 = 10.0;

/// What a single winit event means for a canvas: events to forward, and state to update.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PendingEvent {
    Forward(WindowEvent),
    ButtonState(MouseButton, Action),
    KeyState(Key, Action),
    CursorPos(f64, f64),
    Modifiers(ModifiersState),
    Resize(u32, u32),
}

pub(crate) fn translate_window_event(event: WinitWindowEvent) -> Vec<PendingEvent> {
    let none = Modifiers::empty();
    match event {
        WinitWindowEvent::CloseRequested => vec![PendingEvent::Forward(WindowEvent::Close)],
        // Minimized windows report a zero size.
        WinitWindowEvent::Resized(size) if size.width == 0 || size.height == 0 => vec![],
        WinitWindowEvent::Resized(size) => vec![
            PendingEvent::Resize(size.width, size.height),
            PendingEvent::Forward(WindowEvent::FramebufferSize(size.width, size.height)),
        ],
        WinitWindowEvent::CursorMoved { position: p, .. } => vec![
            PendingEvent::CursorPos(p.x, p.y),
            PendingEvent::Forward(WindowEvent::CursorPos(p.x, p.y, none)),
        ],
        WinitWindowEvent::MouseInput { state, button, .. } => {
            let (button, action) = (mouse_button(button), action(state));
            vec![
                PendingEvent::ButtonState(button, action),
                PendingEvent::Forward(WindowEvent::MouseButton(button, action, none)),
            ]
        }
        WinitWindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = match delta {
                MouseScrollDelta::LineDelta(dx, dy) => (
                    dx as f64 * LINE_SCROLL_PIXELS,
                    dy as f64 * LINE_SCROLL_PIXELS,
                ),
                MouseScrollDelta::PixelDelta(d) => (d.x, d.y),
            };
            vec![PendingEvent::Forward(WindowEvent::Scroll(dx, dy, none))]
        }
        WinitWindowEvent::KeyboardInput { event, .. } => {
            let (key, action) = (key(event.physical_key), action(event.state));
            let mut out = vec![
                PendingEvent::KeyState(key, action),
                PendingEvent::Forward(WindowEvent::Key(key, action, none)),
            ];
            if let (Action::Press, winit::keyboard::Key::Character(text)) =
                (action, &event.logical_key)
            {
                out.extend(
                    text.chars()
                        .map(|c| PendingEvent::Forward(WindowEvent::Char(c))),
                );
            }
            out
        }
        WinitWindowEvent::ModifiersChanged(m) => vec![PendingEvent::Modifiers(m.state())],
        _ => vec![],
    }
}

/// Stamps the tracked modifier state onto input events.
pub(crate) fn with_modifiers(event: WindowEvent, state: ModifiersState) -> WindowEvent {
    let m = modifiers(state);
    match event {
        WindowEvent::CursorPos(x, y, _) => WindowEvent::CursorPos(x, y, m),
        WindowEvent::MouseButton(b, a, _) => WindowEvent::MouseButton(b, a, m),
        WindowEvent::Scroll(dx, dy, _) => WindowEvent::Scroll(dx, dy, m),
        WindowEvent::Key(k, a, _) => WindowEvent::Key(k, a, m),
        other => other,
    }
}

fn action(state: ElementState) -> Action {
    if state.is_pressed() {
        Action::Press
    } else {
        Action::Release
    }
}

fn modifiers(state: ModifiersState) -> Modifiers {
    [
        (state.shift_key(), Modifiers::Shift),
        (state.control_key(), Modifiers::Control),
        (state.alt_key(), Modifiers::Alt),
        (state.super_key(), Modifiers::Super),
    ]
    .into_iter()
    .filter(|(held, _)| *held)
    .fold(Modifiers::empty(), |acc, (_, m)| acc | m)
}

fn mouse_button(button: winit::event::MouseButton) -> MouseButton {
    use winit::event::MouseButton as B;
    match button {
        B::Left => MouseButton::Button1,
        B::Right => MouseButton::Button2,
        B::Middle => MouseButton::Button3,
        B::Back => MouseButton::Button4,
        B::Forward => MouseButton::Button5,
        B::Other(_) => MouseButton::Button6,
    }
}

const KEY_MAP: &[(KeyCode, Key)] = &[
    (KeyCode::Digit1, Key::Key1),
    (KeyCode::Digit2, Key::Key2),
    (KeyCode::Digit3, Key::Key3),
    (KeyCode::Digit4, Key::Key4),
    (KeyCode::Digit5, Key::Key5),
    (KeyCode::Digit6, Key::Key6),
    (KeyCode::Digit7, Key::Key7),
    (KeyCode::Digit8, Key::Key8),
    (KeyCode::Digit9, Key::Key9),
    (KeyCode::Digit0, Key::Key0),
    (KeyCode::KeyA, Key::A),
    (KeyCode::KeyB, Key::B),
    (KeyCode::KeyC, Key::C),
    (KeyCode::KeyD, Key::D),
    (KeyCode::KeyE, Key::E),
    (KeyCode::KeyF, Key::F),
    (KeyCode::KeyG, Key::G),
    (KeyCode::KeyH, Key::H),
    (KeyCode::KeyI, Key::I),
    (KeyCode::KeyJ, Key::J),
    (KeyCode::KeyK, Key::K),
    (KeyCode::KeyL, Key::L),
    (KeyCode::KeyM, Key::M),
    (KeyCode::KeyN, Key::N),
    (KeyCode::KeyO, Key::O),
    (KeyCode::KeyP, Key::P),
    (KeyCode::KeyQ, Key::Q),
    (KeyCode::KeyR, Key::R),
    (KeyCode::KeyS, Key::S),
    (KeyCode::KeyT, Key::T),
    (KeyCode::KeyU, Key::U),
    (KeyCode::KeyV, Key::V),
    (KeyCode::KeyW, Key::W),
    (KeyCode::KeyX, Key::X),
    (KeyCode::KeyY, Key::Y),
    (KeyCode::KeyZ, Key::Z),
    (KeyCode::Escape, Key::Escape),
    (KeyCode::ArrowLeft, Key::Left),
    (KeyCode::ArrowUp, Key::Up),
    (KeyCode::ArrowRight, Key::Right),
    (KeyCode::ArrowDown, Key::Down),
    (KeyCode::Backspace, Key::Back),
    (KeyCode::Enter, Key::Return),
    (KeyCode::Space, Key::Space),
    (KeyCode::Tab, Key::Tab),
    (KeyCode::ShiftLeft, Key::LShift),
    (KeyCode::ShiftRight, Key::RShift),
    (KeyCode::ControlLeft, Key::LControl),
    (KeyCode::ControlRight, Key::RControl),
    (KeyCode::AltLeft, Key::LAlt),
    (KeyCode::AltRight, Key::RAlt),
];

fn key(physical_key: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = physical_key else {
        return Key::Unknown;
    };
    KEY_MAP
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(Key::Unknown, |(_, k)| *k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_are_attached_to_input_events() {
        let event = with_modifiers(
            WindowEvent::Key(Key::W, Action::Press, Modifiers::empty()),
            ModifiersState::SHIFT,
        );
        assert_eq!(event, WindowEvent::Key(Key::W, Action::Press, Modifiers::Shift));

        let event = with_modifiers(
            WindowEvent::Scroll(0.0, 1.0, Modifiers::empty()),
            ModifiersState::CONTROL | ModifiersState::ALT,
        );
        assert_eq!(
            event,
            WindowEvent::Scroll(0.0, 1.0, Modifiers::Control | Modifiers::Alt)
        );

        assert_eq!(
            with_modifiers(WindowEvent::Close, ModifiersState::SHIFT),
            WindowEvent::Close
        );
    }

    #[test]
    fn viewer_keys_are_mapped() {
        for (code, expected) in [
            (KeyCode::KeyW, Key::W),
            (KeyCode::KeyP, Key::P),
            (KeyCode::KeyS, Key::S),
            (KeyCode::Escape, Key::Escape),
        ] {
            assert_eq!(key(PhysicalKey::Code(code)), expected);
        }
        assert_eq!(key(PhysicalKey::Code(KeyCode::F12)), Key::Unknown);
    }

    #[test]
    fn mouse_buttons_follow_the_button_numbering() {
        use winit::event::MouseButton as B;
        assert_eq!(mouse_button(B::Left), MouseButton::Button1);
        assert_eq!(mouse_button(B::Right), MouseButton::Button2);
        assert_eq!(mouse_button(B::Middle), MouseButton::Button3);
    }
}
