//! Error type shared by the whole crate.

use std::path::PathBuf;

/// Everything that can go wrong while opening the window or rendering the cube.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The windowing event loop could not be created.
    #[error("failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// The OS refused to create the application window.
    #[error("failed to create the application window: {0}")]
    WindowCreation(#[from] winit::error::OsError),
    /// The render surface could not be created, configured or acquired.
    #[error("render surface error: {0}")]
    Surface(String),
    /// No graphics adapter is compatible with the window surface.
    #[error("no compatible graphics adapter: {0}")]
    NoAdapter(String),
    /// The graphics device could not be opened.
    #[error("failed to open the graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    /// A shader file could not be read.
    #[error("failed to read shader `{path}`: {source}")]
    ShaderSource {
        /// The shader file.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
    /// The shader module or one of the pipelines built from it was rejected.
    #[error("shader compilation failed: {0}")]
    ShaderCompilation(String),
    /// The graphics API reported an error while rendering a frame.
    #[error("the graphics API produced an error: {0}")]
    Gpu(String),
    /// The frame could not be read back or written to disk.
    #[error("failed to write screenshot: {0}")]
    Screenshot(#[from] image::ImageError),
    /// A snapshot rectangle does not fit inside the frame.
    #[error("snapshot region out of bounds: {0}")]
    SnapshotRegion(String),
    /// The requested window configuration cannot be honoured.
    #[error("invalid setup: {0}")]
    InvalidSetup(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
