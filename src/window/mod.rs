//! The window, and things to handle the rendering loop and events.

mod canvas;
mod events;
mod input;
mod render_targets;
mod rendering;
mod screenshot;
mod setup;
mod window;

pub use canvas::Canvas;
pub use setup::{CanvasSetup, NumSamples};
pub use window::{Window, DEFAULT_HEIGHT, DEFAULT_SCREENSHOT_PATH, DEFAULT_WIDTH};
