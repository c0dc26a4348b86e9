//! A native winit window with a wgpu surface.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::event::{Action, Key, MouseButton, WindowEvent};
use crate::window::setup::CanvasSetup;
use crate::window::input::{translate_window_event, with_modifiers, PendingEvent};
use crate::window::render_targets::RenderTargets;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent as WinitWindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowAttributes, WindowId};

// winit allows a single event loop per process. It is created by the first
// window and pumped by every canvas, which each take their own events.
thread_local! {
    static EVENT_LOOP: RefCell<Option<EventLoop<()>>> = const { RefCell::new(None) };
    static PENDING_WINDOW_EVENTS: RefCell<HashMap<WindowId, Vec<PendingEvent>>> =
        RefCell::new(HashMap::new());
}

const NUM_KEYS: usize = Key::Unknown as usize + 1;
const NUM_BUTTONS: usize = MouseButton::Button8 as usize + 1;

/// A canvas drawing into a native window.
pub struct Canvas {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    /// Latest size reported by the window system, applied on the next frame.
    pending_size: Option<(u32, u32)>,
    out_events: Sender<WindowEvent>,
    cursor_pos: Option<(f64, f64)>,
    modifiers: ModifiersState,
    key_states: [Action; NUM_KEYS],
    button_states: [Action; NUM_BUTTONS],
}

impl Canvas {
    /// Opens a window, bringing up the GPU context if this is the first one.
    pub async fn open(
        title: &str,
        hide: bool,
        width: u32,
        height: u32,
        canvas_setup: Option<CanvasSetup>,
        out_events: Sender<WindowEvent>,
    ) -> Result<Self> {
        let setup = canvas_setup.unwrap_or_default();
        let attributes = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .with_resizable(setup.resizable)
            .with_visible(!hide);

        let window = Arc::new(create_window(attributes)?);
        if setup.centered {
            center_on_primary_monitor(&window);
        }

        let (surface, format) = Context::create_surface(window.clone()).await?;
        let ctxt = Context::get();

        let sample_count = (setup.samples as u32).max(1);
        let format_flags = ctxt.adapter.get_texture_format_features(format).flags;
        if !format_flags.sample_count_supported(sample_count) {
            return Err(Error::InvalidSetup(format!(
                "{} samples per pixel are not supported for {:?}",
                sample_count, format
            )));
        }

        let present_mode = if setup.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        let caps = surface.get_capabilities(&ctxt.adapter);
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: surface_usage(caps.usages)?,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        let targets = configure(&ctxt, &surface, &surface_config, |device| {
            RenderTargets::new(
                device,
                surface_config.width,
                surface_config.height,
                format,
                sample_count,
            )
        })
        .await?;

        log::info!(
            "opened {}x{} surface ({:?}, {:?}, {} samples)",
            surface_config.width,
            surface_config.height,
            format,
            present_mode,
            sample_count
        );

        Ok(Canvas {
            window,
            surface,
            surface_config,
            targets,
            pending_size: None,
            out_events,
            cursor_pos: None,
            modifiers: ModifiersState::default(),
            key_states: [Action::Release; NUM_KEYS],
            button_states: [Action::Release; NUM_BUTTONS],
        })
    }

    /// Pumps the window system and forwards this window's events to its channel.
    pub fn poll_events(&mut self) {
        use winit::platform::pump_events::EventLoopExtPumpEvents;

        struct EventCollector;

        impl ApplicationHandler for EventCollector {
            fn resumed(&mut self, _: &ActiveEventLoop) {}

            fn window_event(&mut self, _: &ActiveEventLoop, id: WindowId, event: WinitWindowEvent) {
                let pending = translate_window_event(event);
                if !pending.is_empty() {
                    PENDING_WINDOW_EVENTS
                        .with(|all| all.borrow_mut().entry(id).or_default().extend(pending));
                }
            }
        }

        EVENT_LOOP.with(|cell| {
            if let Some(event_loop) = cell.borrow_mut().as_mut() {
                let _ = event_loop.pump_app_events(Some(std::time::Duration::ZERO), &mut EventCollector);
            }
        });

        let id = self.window.id();
        let pending = PENDING_WINDOW_EVENTS.with(|all| all.borrow_mut().remove(&id));

        for event in pending.into_iter().flatten() {
            match event {
                PendingEvent::Forward(event) => {
                    // The receiver lives in the window owning this canvas.
                    let _ = self.out_events.send(with_modifiers(event, self.modifiers));
                }
                PendingEvent::ButtonState(button, action) => {
                    self.button_states[button as usize] = action
                }
                PendingEvent::KeyState(key, action) => self.key_states[key as usize] = action,
                PendingEvent::CursorPos(x, y) => self.cursor_pos = Some((x, y)),
                PendingEvent::Modifiers(state) => self.modifiers = state,
                PendingEvent::Resize(width, height) => self.pending_size = Some((width, height)),
            }
        }
    }

    /// Applies the last size reported by the window system, if any.
    pub async fn apply_pending_resize(&mut self) -> Result<()> {
        match self.pending_size.take() {
            Some((width, height)) => self.resize(width, height).await,
            None => Ok(()),
        }
    }

    /// Reconfigures the surface and recreates the size-dependent textures.
    pub async fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let ctxt = Context::get();
        self.surface_config.width = width.max(1);
        self.surface_config.height = height.max(1);
        let (width, height) = (self.surface_config.width, self.surface_config.height);
        let targets = &self.targets;
        let resized = configure(&ctxt, &self.surface, &self.surface_config, |device| {
            targets.resized(device, width, height)
        })
        .await?;
        self.targets = resized;
        log::debug!("surface resized to {}x{}", width, height);
        Ok(())
    }

    /// Configures the surface again at its current size, after it was lost or outdated.
    pub async fn reconfigure(&mut self) -> Result<()> {
        let (width, height) = self.size();
        self.resize(width, height).await
    }

    pub fn get_current_texture(
        &self,
    ) -> std::result::Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Keeps a copy of `frame` for [`read_pixels`](Self::read_pixels).
    pub fn copy_frame_to_readback(&self, frame: &wgpu::SurfaceTexture) {
        self.targets.store_frame(&Context::get(), &frame.texture);
    }

    pub fn present(&self, frame: wgpu::SurfaceTexture) {
        frame.present();
    }

    /// Reads the rectangle `(x, y, width, height)` of the last presented frame.
    ///
    /// `out` receives RGB data, rows ordered bottom to top. `(x, y)` is measured
    /// from the top-left corner of the frame.
    pub fn read_pixels(
        &self,
        out: &mut Vec<u8>,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<()> {
        out.clear();
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.targets.read_region(
            &Context::get(),
            out,
            (x as u32, y as u32),
            (width as u32, height as u32),
        )
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        self.targets.depth_view()
    }

    /// The multisampled colour target, when MSAA is on.
    pub fn msaa_view(&self) -> Option<&wgpu::TextureView> {
        self.targets.msaa_view()
    }

    pub fn sample_count(&self) -> u32 {
        self.targets.sample_count()
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Size of the render surface in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    pub fn cursor_pos(&self) -> Option<(f64, f64)> {
        self.cursor_pos
    }

    pub fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title)
    }

    pub fn get_mouse_button(&self, button: MouseButton) -> Action {
        self.button_states[button as usize]
    }

    pub fn get_key(&self, key: Key) -> Action {
        self.key_states[key as usize]
    }
}

/// Configures `surface` and builds the matching render targets, turning any
/// validation error into [`Error::Surface`].
async fn configure(
    ctxt: &Context,
    surface: &wgpu::Surface<'static>,
    config: &wgpu::SurfaceConfiguration,
    targets: impl FnOnce(&wgpu::Device) -> RenderTargets,
) -> Result<RenderTargets> {
    ctxt.push_error_scope();
    surface.configure(&ctxt.device, config);
    let targets = targets(&*ctxt.device);
    match ctxt.pop_error_scope().await {
        Some(e) => Err(Error::Surface(e.to_string())),
        None => Ok(targets),
    }
}

/// Usage of the surface textures: rendered to, then copied for screenshots.
pub(crate) fn surface_usage(supported: wgpu::TextureUsages) -> Result<wgpu::TextureUsages> {
    let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC;
    if supported.contains(usage) {
        Ok(usage)
    } else {
        Err(Error::Surface(format!(
            "the surface supports {:?}, screenshots need {:?}",
            supported, usage
        )))
    }
}

/// Creates a window on the shared event loop, creating the loop on first use.
fn create_window(attributes: WindowAttributes) -> Result<Window> {
    EVENT_LOOP.with(|cell| {
        let mut slot = cell.borrow_mut();
        let event_loop = match slot.take() {
            Some(event_loop) => event_loop,
            None => EventLoop::new()?,
        };
        #[allow(deprecated)]
        let window = event_loop.create_window(attributes);
        *slot = Some(event_loop);
        Ok(window?)
    })
}

fn center_on_primary_monitor(window: &Window) {
    let Some(monitor) = window.primary_monitor() else {
        log::debug!("no primary monitor, leaving window placement to the system");
        return;
    };
    let (pos, size, window_size) = (monitor.position(), monitor.size(), window.outer_size());
    let (x, y) = centered_position(
        (pos.x, pos.y),
        (size.width, size.height),
        (window_size.width, window_size.height),
    );
    window.set_outer_position(PhysicalPosition::new(x, y));
}

/// Top-left corner placing a window of `window_size` at the center of a monitor.
pub(crate) fn centered_position(
    monitor_pos: (i32, i32),
    monitor_size: (u32, u32),
    window_size: (u32, u32),
) -> (i32, i32) {
    let axis = |origin: i32, monitor: u32, window: u32| {
        (origin as i64 + (monitor as i64 - window as i64) / 2) as i32
    };
    (
        axis(monitor_pos.0, monitor_size.0, window_size.0),
        axis(monitor_pos.1, monitor_size.1, window_size.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_must_allow_frame_copies() {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC;
        assert_eq!(
            surface_usage(usage | wgpu::TextureUsages::COPY_DST).ok(),
            Some(usage)
        );
        assert!(matches!(
            surface_usage(wgpu::TextureUsages::RENDER_ATTACHMENT),
            Err(Error::Surface(_))
        ));
    }

    #[test]
    fn window_is_centered_on_the_monitor() {
        assert_eq!(centered_position((0, 0), (1920, 1080), (800, 600)), (560, 240));
        assert_eq!(
            centered_position((1920, 0), (1280, 1024), (800, 600)),
            (2160, 212)
        );
        // A window larger than the monitor overflows on both sides.
        assert_eq!(centered_position((0, 0), (640, 480), (800, 600)), (-80, -60));
    }
}
