//! Size-dependent textures of a canvas and the frame readback used for screenshots.

use crate::context::Context;
use crate::error::{Error, Result};

/// Depth, MSAA colour and readback textures matching the surface size.
pub(crate) struct RenderTargets {
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    sample_count: u32,
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
    /// Copy of the last presented frame.
    readback: wgpu::Texture,
}

impl RenderTargets {
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let sample_count = sample_count.max(1);
        let texture = |label: &str,
                       sample_count: u32,
                       format: wgpu::TextureFormat,
                       usage: wgpu::TextureUsages| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: extent(width, height),
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage,
                view_formats: &[],
            })
        };
        let view = |texture: wgpu::Texture| texture.create_view(&Default::default());

        let depth_view = view(texture(
            "depth_texture",
            sample_count,
            Context::depth_format(),
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        ));
        let msaa_view = (sample_count > 1).then(|| {
            view(texture(
                "msaa_texture",
                sample_count,
                format,
                wgpu::TextureUsages::RENDER_ATTACHMENT,
            ))
        });
        let readback = texture(
            "readback_texture",
            1,
            format,
            wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::COPY_SRC,
        );

        RenderTargets {
            width,
            height,
            format,
            sample_count,
            depth_view,
            msaa_view,
            readback,
        }
    }

    /// The same targets for a new surface size.
    pub fn resized(&self, device: &wgpu::Device, width: u32, height: u32) -> Self {
        RenderTargets::new(device, width, height, self.format, self.sample_count)
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    pub fn msaa_view(&self) -> Option<&wgpu::TextureView> {
        self.msaa_view.as_ref()
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Records the copy of `frame` into the readback texture and submits it.
    pub fn store_frame(&self, ctxt: &Context, frame: &wgpu::Texture) {
        let mut encoder = ctxt.create_command_encoder(Some("readback_copy_encoder"));
        encoder.copy_texture_to_texture(
            frame.as_image_copy(),
            self.readback.as_image_copy(),
            extent(self.width, self.height),
        );
        ctxt.submit(std::iter::once(encoder.finish()));
    }

    /// Reads a rectangle of the stored frame as RGB rows, bottom row first.
    pub fn read_region(
        &self,
        ctxt: &Context,
        out: &mut Vec<u8>,
        (x, y): (u32, u32),
        (width, height): (u32, u32),
    ) -> Result<()> {
        let padded_bytes_per_row = padded_bytes_per_row(width as usize);
        let staging = ctxt.create_buffer(&wgpu::BufferDescriptor {
            label: Some("screenshot_staging_buffer"),
            size: (padded_bytes_per_row * height as usize) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut source = self.readback.as_image_copy();
        source.origin = wgpu::Origin3d { x, y, z: 0 };

        let mut encoder = ctxt.create_command_encoder(Some("screenshot_copy_encoder"));
        encoder.copy_texture_to_buffer(
            source,
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row as u32),
                    rows_per_image: Some(height),
                },
            },
            extent(width, height),
        );
        ctxt.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        ctxt.device.poll(wgpu::PollType::wait_indefinitely()).map_err(gpu_error)?;
        rx.recv().map_err(gpu_error)?.map_err(gpu_error)?;

        let is_bgra = matches!(
            self.format,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
        );
        unpad_rows(
            &slice.get_mapped_range(),
            out,
            width as usize,
            height as usize,
            padded_bytes_per_row,
            is_bgra,
        );
        staging.unmap();

        Ok(())
    }
}

fn gpu_error(e: impl std::fmt::Display) -> Error {
    Error::Gpu(e.to_string())
}

fn extent(width: u32, height: u32) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    }
}

/// Bytes per row of a 4-byte-per-pixel texture copy, rounded up to wgpu's alignment.
pub(crate) fn padded_bytes_per_row(width: usize) -> usize {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT as usize;
    (width * 4).div_ceil(align) * align
}

/// Converts padded RGBA/BGRA rows to tightly packed RGB, last row first.
///
/// wgpu has its origin at the top-left, the output has its origin at the bottom-left.
pub(crate) fn unpad_rows(
    data: &[u8],
    out: &mut Vec<u8>,
    width: usize,
    height: usize,
    padded_bytes_per_row: usize,
    is_bgra: bool,
) {
    out.clear();
    out.reserve(width * height * 3);

    for row in data.chunks(padded_bytes_per_row).take(height).rev() {
        for pixel in row[..width * 4].chunks_exact(4) {
            if is_bgra {
                out.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
            } else {
                out.extend_from_slice(&pixel[..3]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_unpadded_swizzled_and_flipped() {
        // 1x2 image, one pixel per row padded to 8 bytes.
        let data = [
            1, 2, 3, 255, 0, 0, 0, 0, // top row
            4, 5, 6, 255, 0, 0, 0, 0, // bottom row
        ];
        let mut out = Vec::new();

        unpad_rows(&data, &mut out, 1, 2, 8, true);
        assert_eq!(out, vec![6, 5, 4, 3, 2, 1]);

        unpad_rows(&data, &mut out, 1, 2, 8, false);
        assert_eq!(out, vec![4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn readback_failures_are_gpu_errors() {
        let error = gpu_error("Validation Error");
        assert!(matches!(error, Error::Gpu(ref message) if message == "Validation Error"));
    }

    #[test]
    fn copy_rows_follow_the_wgpu_alignment() {
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(800), 3328);
    }
}
