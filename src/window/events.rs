//! Event handling functionality.

use crate::camera::Camera3d;
use crate::error::Result;
use crate::event::{Action, EventManager, Key, MouseButton, WindowEvent};
use crate::render_mode::{command_for_key, KeyCommand};

use super::Window;

impl Window {
    /// Returns an event manager for accessing window events.
    ///
    /// The event manager provides an iterator over events that occurred since the last frame,
    /// such as keyboard input, mouse movement, and window resizing. Events that are not
    /// inhibited are then handled by the window (render modes, screenshot, camera).
    ///
    /// # Example
    /// ```no_run
    /// # use cubeview::prelude::*;
    /// # fn main() -> cubeview::Result<()> {
    /// # pollster::block_on(async {
    /// # let mut window = Window::new("Example").await?;
    /// # let mut camera = OrbitCamera3d::default();
    /// # let mut renderer = CubeRenderer::new(&window.render_context(), CUBE_SHADER_SRC).await?;
    /// while window.render_3d(&mut renderer, &mut camera).await? {
    ///     for mut event in window.events().iter() {
    ///         if let WindowEvent::Key(Key::S, _, _) = event.value {
    ///             // No screenshot for this frame.
    ///             event.inhibit();
    ///         }
    ///     }
    /// }
    /// # Ok(())
    /// # })
    /// # }
    /// ```
    pub fn events(&self) -> EventManager {
        EventManager::new(self.events.clone(), self.unhandled_events.clone())
    }

    /// Gets the current state of a keyboard key.
    pub fn get_key(&self, key: Key) -> Action {
        self.canvas.get_key(key)
    }

    /// Gets the current state of a mouse button.
    pub fn get_mouse_button(&self, button: MouseButton) -> Action {
        self.canvas.get_mouse_button(button)
    }

    /// Gets the last known position of the mouse cursor.
    ///
    /// Coordinates are in pixels, with (0, 0) at the top-left corner.
    pub fn cursor_pos(&self) -> Option<(f64, f64)> {
        self.canvas.cursor_pos()
    }

    pub(crate) fn handle_events(&mut self, camera: &mut dyn Camera3d) -> Result<()> {
        let unhandled_events = self.unhandled_events.clone();
        let events = self.events.clone();

        let pending: Vec<WindowEvent> = unhandled_events.borrow_mut().drain(..).collect();
        for event in pending.iter() {
            self.handle_event(camera, event)?;
        }

        for event in events.try_iter() {
            self.handle_event(camera, &event)?;
        }

        self.canvas.poll_events();
        Ok(())
    }

    pub(crate) fn handle_event(
        &mut self,
        camera: &mut dyn Camera3d,
        event: &WindowEvent,
    ) -> Result<()> {
        match *event {
            WindowEvent::Key(Key::Escape, Action::Release, _) | WindowEvent::Close => {
                self.close();
            }
            WindowEvent::Key(key, action, _) => match command_for_key(key, action) {
                Some(KeyCommand::SetMode(mode)) => {
                    if mode != self.render_mode {
                        log::debug!("render mode: {:?} -> {:?}", self.render_mode, mode);
                        self.render_mode = mode;
                    }
                }
                Some(KeyCommand::Screenshot) => {
                    let path = self.screenshot_path.clone();
                    self.save_screenshot(&path)?;
                }
                None => {}
            },
            _ => {}
        }

        camera.handle_event(&self.canvas, event);
        Ok(())
    }
}
