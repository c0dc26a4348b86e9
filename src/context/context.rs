//! The process-wide wgpu device.
//!
//! The first window creates the instance, adapter, device and queue; later
//! windows only add a surface. Dropping a window tears everything down.

use std::cell::RefCell;
use std::sync::Arc;

use crate::error::{Error, Result};

// RefCell<Option<_>> rather than OnceLock: the context must be resettable.
thread_local! {
    static CONTEXT_SINGLETON: RefCell<Option<Context>> = const { RefCell::new(None) };
}

/// Shared handles to the wgpu objects every GPU resource is created from.
///
/// Cloning is cheap, all handles are reference counted.
#[derive(Clone)]
pub struct Context {
    /// Used to create surfaces for new windows.
    pub instance: Arc<wgpu::Instance>,
    /// Creates buffers, textures and pipelines.
    pub device: Arc<wgpu::Device>,
    /// Receives uploads and command buffers.
    pub queue: Arc<wgpu::Queue>,
    /// The physical GPU behind `device`.
    pub adapter: Arc<wgpu::Adapter>,
    /// Colour format of the first window's surface.
    pub surface_format: wgpu::TextureFormat,
}

impl Context {
    /// Creates a surface for `target`, bringing the global context up first if this
    /// is the first surface of the process.
    pub(crate) async fn create_surface(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
    ) -> Result<(wgpu::Surface<'static>, wgpu::TextureFormat)> {
        if Context::is_initialized() {
            let ctxt = Context::get();
            let surface = ctxt
                .instance
                .create_surface(target)
                .map_err(|e| Error::Surface(e.to_string()))?;
            let format = preferred_surface_format(&surface, &ctxt.adapter)?;
            return Ok((surface, format));
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(target)
            .map_err(|e| Error::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::NoAdapter(e.to_string()))?;

        let info = adapter.get_info();
        log::info!(
            "using adapter {} ({:?}, {:?})",
            info.name,
            info.device_type,
            info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("cubeview device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                ..Default::default()
            })
            .await?;

        let format = preferred_surface_format(&surface, &adapter)?;
        Context::init(instance, device, queue, adapter, format);

        Ok((surface, format))
    }

    /// Installs the global context, replacing any previous one.
    pub fn init(
        instance: wgpu::Instance,
        device: wgpu::Device,
        queue: wgpu::Queue,
        adapter: wgpu::Adapter,
        surface_format: wgpu::TextureFormat,
    ) {
        let ctxt = Context {
            instance: Arc::new(instance),
            device: Arc::new(device),
            queue: Arc::new(queue),
            adapter: Arc::new(adapter),
            surface_format,
        };
        CONTEXT_SINGLETON.with(|cell| *cell.borrow_mut() = Some(ctxt));
    }

    /// The global context.
    ///
    /// # Panics
    /// If no window is open. GPU objects of this crate are only created through an
    /// open [`Window`](crate::window::Window).
    pub fn get() -> Context {
        CONTEXT_SINGLETON.with(|cell| {
            cell.borrow()
                .clone()
                .expect("wgpu context not initialized: open a Window first.")
        })
    }

    /// Whether a window has brought the context up.
    pub fn is_initialized() -> bool {
        CONTEXT_SINGLETON.with(|cell| cell.borrow().is_some())
    }

    /// Destroys the device and forgets the context.
    pub fn reset() {
        let old = CONTEXT_SINGLETON.with(|cell| cell.borrow_mut().take());
        if let Some(ctxt) = old {
            ctxt.device.destroy();
            log::debug!("wgpu context released");
        }
    }

    /// Starts capturing validation and out-of-memory errors.
    ///
    /// Must be paired with [`pop_error_scope`](Self::pop_error_scope).
    pub fn push_error_scope(&self) {
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
    }

    /// Stops capturing errors and returns the first one reported since the
    /// matching [`push_error_scope`](Self::push_error_scope).
    pub async fn pop_error_scope(&self) -> Option<wgpu::Error> {
        let validation = self.device.pop_error_scope().await;
        let out_of_memory = self.device.pop_error_scope().await;
        validation.or(out_of_memory)
    }

    /// Pops the error scope and turns a captured error into [`Error::Gpu`].
    pub async fn check_error(&self) -> Result<()> {
        match self.pop_error_scope().await {
            Some(e) => Err(Error::Gpu(e.to_string())),
            None => Ok(()),
        }
    }

    /// A buffer filled with `contents`.
    pub fn create_buffer_init(
        &self,
        label: Option<&str>,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;
        let desc = wgpu::util::BufferInitDescriptor {
            label,
            contents,
            usage,
        };
        self.device.create_buffer_init(&desc)
    }

    pub fn create_buffer(&self, desc: &wgpu::BufferDescriptor) -> wgpu::Buffer {
        self.device.create_buffer(desc)
    }

    /// Queues an upload of `data` at `offset` bytes into `buffer`.
    pub fn write_buffer(&self, buffer: &wgpu::Buffer, offset: u64, data: &[u8]) {
        self.queue.write_buffer(buffer, offset, data);
    }

    pub fn create_bind_group_layout(
        &self,
        desc: &wgpu::BindGroupLayoutDescriptor,
    ) -> wgpu::BindGroupLayout {
        self.device.create_bind_group_layout(desc)
    }

    pub fn create_bind_group(&self, desc: &wgpu::BindGroupDescriptor) -> wgpu::BindGroup {
        self.device.create_bind_group(desc)
    }

    pub fn create_pipeline_layout(
        &self,
        desc: &wgpu::PipelineLayoutDescriptor,
    ) -> wgpu::PipelineLayout {
        self.device.create_pipeline_layout(desc)
    }

    pub fn create_render_pipeline(
        &self,
        desc: &wgpu::RenderPipelineDescriptor,
    ) -> wgpu::RenderPipeline {
        self.device.create_render_pipeline(desc)
    }

    /// Compiles WGSL `source`. Errors surface through the current error scope.
    pub fn create_shader_module(&self, label: Option<&str>, source: &str) -> wgpu::ShaderModule {
        let desc = wgpu::ShaderModuleDescriptor {
            label,
            source: wgpu::ShaderSource::Wgsl(source.into()),
        };
        self.device.create_shader_module(desc)
    }

    pub fn create_command_encoder(&self, label: Option<&str>) -> wgpu::CommandEncoder {
        let desc = wgpu::CommandEncoderDescriptor { label };
        self.device.create_command_encoder(&desc)
    }

    pub fn submit<I: IntoIterator<Item = wgpu::CommandBuffer>>(&self, command_buffers: I) {
        self.queue.submit(command_buffers);
    }

    /// Format of every depth attachment.
    pub fn depth_format() -> wgpu::TextureFormat {
        wgpu::TextureFormat::Depth32Float
    }
}

/// Formats the frame readback can decode, in order of preference. Linear
/// formats come first so shader output reaches the screen unchanged.
const READABLE_SURFACE_FORMATS: [wgpu::TextureFormat; 4] = [
    wgpu::TextureFormat::Bgra8Unorm,
    wgpu::TextureFormat::Rgba8Unorm,
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

fn preferred_surface_format(
    surface: &wgpu::Surface<'_>,
    adapter: &wgpu::Adapter,
) -> Result<wgpu::TextureFormat> {
    pick_surface_format(&surface.get_capabilities(adapter).formats)
}

/// The most preferred 8-bit RGBA/BGRA format among `supported`.
pub(crate) fn pick_surface_format(
    supported: &[wgpu::TextureFormat],
) -> Result<wgpu::TextureFormat> {
    READABLE_SURFACE_FORMATS
        .into_iter()
        .find(|format| supported.contains(format))
        .ok_or_else(|| {
            Error::Surface(format!(
                "no 8-bit RGBA or BGRA surface format among {:?}",
                supported
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    #[test]
    fn linear_8_bit_formats_win() {
        let supported = [F::Rgb10a2Unorm, F::Bgra8UnormSrgb, F::Bgra8Unorm];
        assert_eq!(pick_surface_format(&supported).ok(), Some(F::Bgra8Unorm));

        let supported = [F::Rgba16Float, F::Rgba8Unorm];
        assert_eq!(pick_surface_format(&supported).ok(), Some(F::Rgba8Unorm));
    }

    #[test]
    fn srgb_is_used_when_nothing_else_is_readable() {
        let supported = [F::Rgba16Float, F::Bgra8UnormSrgb];
        assert_eq!(pick_surface_format(&supported).ok(), Some(F::Bgra8UnormSrgb));
    }

    #[test]
    fn wide_formats_alone_are_rejected() {
        assert!(matches!(
            pick_surface_format(&[F::Rgb10a2Unorm, F::Rgba16Float]),
            Err(Error::Surface(_))
        ));
        assert!(matches!(pick_surface_format(&[]), Err(Error::Surface(_))));
    }
}
