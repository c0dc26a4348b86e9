//! The cubeview window.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

use crate::clock::FrameClock;
use crate::context::Context;
use crate::error::Result;
use crate::event::WindowEvent;
use crate::render_mode::RenderMode;
use crate::resource::RenderContext;
use crate::window::{Canvas, CanvasSetup};

/// Default window width in logical pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default window height in logical pixels.
pub const DEFAULT_HEIGHT: u32 = 600;
/// Where a screenshot is written unless configured otherwise.
pub const DEFAULT_SCREENSHOT_PATH: &str = "screenshot.png";

/// Structure representing a window with a single render surface.
///
/// This is the main interface with the viewer.
pub struct Window {
    pub(crate) events: Rc<Receiver<WindowEvent>>,
    pub(crate) unhandled_events: Rc<RefCell<Vec<WindowEvent>>>,
    pub(crate) canvas: Canvas,
    pub(crate) should_close: bool,
    pub(crate) background: wgpu::Color,
    pub(crate) render_mode: RenderMode,
    pub(crate) screenshot_path: PathBuf,
    pub(crate) clock: FrameClock,
}

impl Drop for Window {
    fn drop(&mut self) {
        Context::reset();
    }
}

impl Window {
    /// Opens a window of the default size.
    ///
    /// # Example
    /// ```no_run
    /// use cubeview::prelude::*;
    ///
    /// # fn main() -> cubeview::Result<()> {
    /// pollster::block_on(async {
    ///     let mut window = Window::new("cubeview").await?;
    ///     let mut camera = OrbitCamera3d::default();
    ///     let mut renderer = CubeRenderer::new(&window.render_context(), CUBE_SHADER_SRC).await?;
    ///
    ///     while window.render_3d(&mut renderer, &mut camera).await? {}
    ///     Ok(())
    /// })
    /// # }
    /// ```
    pub async fn new(title: &str) -> Result<Window> {
        Window::do_new(title, false, DEFAULT_WIDTH, DEFAULT_HEIGHT, None).await
    }

    /// Opens a hidden window of the default size.
    pub async fn new_hidden(title: &str) -> Result<Window> {
        Window::do_new(title, true, DEFAULT_WIDTH, DEFAULT_HEIGHT, None).await
    }

    /// Opens a window of the given size.
    pub async fn new_with_size(title: &str, width: u32, height: u32) -> Result<Window> {
        Window::do_new(title, false, width, height, None).await
    }

    /// Opens a window of the given size with custom canvas options.
    pub async fn new_with_setup(
        title: &str,
        width: u32,
        height: u32,
        setup: CanvasSetup,
    ) -> Result<Window> {
        Window::do_new(title, false, width, height, Some(setup)).await
    }

    async fn do_new(
        title: &str,
        hide: bool,
        width: u32,
        height: u32,
        setup: Option<CanvasSetup>,
    ) -> Result<Window> {
        let (event_send, event_receive) = mpsc::channel();
        let canvas = Canvas::open(title, hide, width, height, setup, event_send).await?;

        Ok(Window {
            events: Rc::new(event_receive),
            unhandled_events: Rc::new(RefCell::new(Vec::new())),
            canvas,
            should_close: false,
            background: wgpu::Color::WHITE,
            render_mode: RenderMode::default(),
            screenshot_path: PathBuf::from(DEFAULT_SCREENSHOT_PATH),
            clock: FrameClock::new(),
        })
    }

    /// Indicates whether this window should be closed.
    #[inline]
    pub fn should_close(&self) -> bool {
        self.should_close
    }

    /// Closes the window: the next call to `render_3d` returns `false`.
    #[inline]
    pub fn close(&mut self) {
        self.should_close = true;
    }

    /// The window width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.canvas.size().0
    }

    /// The window height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.canvas.size().1
    }

    /// Sets the window title.
    pub fn set_title(&mut self, title: &str) {
        self.canvas.set_title(title)
    }

    /// The scale factor between logical and physical pixels.
    pub fn scale_factor(&self) -> f64 {
        self.canvas.scale_factor()
    }

    /// Sets the color the frame is cleared with. Components are in `[0, 1]`.
    pub fn set_background_color(&mut self, r: f32, g: f32, b: f32) {
        self.background = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };
    }

    /// How primitives are rasterized on the next frame.
    #[inline]
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Forces the rasterization mode until the next key command changes it.
    #[inline]
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    /// The file written when the screenshot key is released.
    pub fn screenshot_path(&self) -> &Path {
        &self.screenshot_path
    }

    /// Sets the file written when the screenshot key is released.
    pub fn set_screenshot_path(&mut self, path: impl Into<PathBuf>) {
        self.screenshot_path = path.into();
    }

    /// The render target description pipelines must be built against.
    pub fn render_context(&self) -> RenderContext {
        let (viewport_width, viewport_height) = self.canvas.size();
        RenderContext {
            surface_format: self.canvas.surface_format(),
            sample_count: self.canvas.sample_count(),
            viewport_width,
            viewport_height,
        }
    }
}
