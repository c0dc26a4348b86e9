/// An event emitted by the window.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum WindowEvent {
    /// The user asked the window to close.
    Close,
    /// The framebuffer was resized to the given size in physical pixels.
    FramebufferSize(u32, u32),
    /// The cursor moved to the given position, in physical pixels from the top-left corner.
    CursorPos(f64, f64, Modifiers),
    /// A mouse button was pressed or released.
    MouseButton(MouseButton, Action, Modifiers),
    /// The mouse wheel or touchpad scrolled by `(dx, dy)`. Positive `dy` scrolls away from the user.
    Scroll(f64, f64, Modifiers),
    /// A key was pressed or released.
    Key(Key, Action, Modifiers),
    /// A unicode character was typed.
    Char(char),
}

impl WindowEvent {
    /// Tests if this event is related to the keyboard.
    pub fn is_keyboard_event(&self) -> bool {
        matches!(self, WindowEvent::Key(..) | WindowEvent::Char(..))
    }

    /// Tests if this event is related to the mouse.
    pub fn is_mouse_event(&self) -> bool {
        matches!(
            self,
            WindowEvent::MouseButton(..) | WindowEvent::CursorPos(..) | WindowEvent::Scroll(..)
        )
    }
}

/// Key and mouse button state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// The key or button is released.
    Release,
    /// The key or button is pressed.
    Press,
}

/// Mouse buttons. `Button1` is the left button.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    /// Left button.
    Button1,
    /// Right button.
    Button2,
    /// Middle button.
    Button3,
    Button4,
    Button5,
    Button6,
    Button7,
    Button8,
}

/// Keyboard keys, identified by their physical position on a US layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Key {
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Key0,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Escape,
    Left,
    Up,
    Right,
    Down,
    Back,
    Return,
    Space,
    Tab,
    LShift,
    RShift,
    LControl,
    RControl,
    LAlt,
    RAlt,
    /// Any key not listed above. Must stay the last variant.
    Unknown,
}

bitflags! {
    /// Modifier keys held while an event happened.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u32 {
        const Shift   = 0b0001;
        const Control = 0b0010;
        const Alt     = 0b0100;
        const Super   = 0b1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_input_events() {
        let key = WindowEvent::Key(Key::W, Action::Press, Modifiers::empty());
        let scroll = WindowEvent::Scroll(0.0, 1.0, Modifiers::Shift);

        assert!(key.is_keyboard_event());
        assert!(!key.is_mouse_event());
        assert!(scroll.is_mouse_event());
        assert!(!WindowEvent::Close.is_keyboard_event());
        assert!(!WindowEvent::FramebufferSize(800, 600).is_mouse_event());
    }
}
