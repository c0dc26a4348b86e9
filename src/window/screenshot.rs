//! Screenshot functionality.

use std::path::Path;

use image::{imageops, ImageBuffer, ImageFormat, Rgb};

use crate::error::{Error, Result};

use super::Window;

impl Window {
    /// Captures the last presented frame as raw RGB pixel data.
    ///
    /// The buffer is resized to fit the screen dimensions. Pixels are stored in RGB
    /// format (3 bytes per pixel), row by row from bottom to top.
    pub fn snap(&self, out: &mut Vec<u8>) -> Result<()> {
        let (width, height) = self.canvas.size();
        self.snap_rect(out, 0, 0, width as usize, height as usize)
    }

    /// Captures a rectangular region of the last presented frame as raw RGB pixel data.
    ///
    /// # Arguments
    /// * `out` - The output buffer. It will be resized to width × height × 3 bytes.
    /// * `x` - The x-coordinate of the rectangle's top-left corner
    /// * `y` - The y-coordinate of the rectangle's top-left corner
    /// * `width` - The width of the rectangle in pixels
    /// * `height` - The height of the rectangle in pixels
    pub fn snap_rect(
        &self,
        out: &mut Vec<u8>,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<()> {
        check_region((x, y), (width, height), self.canvas.size())?;
        self.canvas.read_pixels(out, x, y, width, height)
    }

    /// Captures the last presented frame as an image with its origin at the top-left.
    pub fn snap_image(&self) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>> {
        let (width, height) = self.canvas.size();
        let mut buf = Vec::new();
        self.snap(&mut buf)?;
        bottom_up_to_image(width, height, buf)
    }

    /// Writes the last presented frame to `path` as a PNG file.
    pub fn save_screenshot(&self, path: &Path) -> Result<()> {
        let img = self.snap_image()?;
        img.save_with_format(path, ImageFormat::Png)?;
        log::info!(
            "screenshot saved to {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        Ok(())
    }
}

/// Fails unless the rectangle at `origin` of `size` lies inside a frame of `frame` pixels.
fn check_region(
    (x, y): (usize, usize),
    (width, height): (usize, usize),
    (frame_width, frame_height): (u32, u32),
) -> Result<()> {
    let fits = |start: usize, len: usize, frame: u32| {
        start
            .checked_add(len)
            .is_some_and(|end| end <= frame as usize)
    };
    if fits(x, width, frame_width) && fits(y, height, frame_height) {
        Ok(())
    } else {
        Err(Error::SnapshotRegion(format!(
            "{}x{}+{}+{} exceeds the {}x{} frame",
            width, height, x, y, frame_width, frame_height
        )))
    }
}

/// Builds a top-down image from RGB rows stored bottom row first.
fn bottom_up_to_image(
    width: u32,
    height: u32,
    rows: Vec<u8>,
) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>> {
    let img = ImageBuffer::from_vec(width, height, rows)
        .ok_or_else(|| Error::Gpu("frame readback returned a truncated buffer".to_string()))?;
    Ok(imageops::flip_vertical(&img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_must_fit_in_the_frame() {
        assert!(check_region((0, 0), (800, 600), (800, 600)).is_ok());
        assert!(check_region((799, 599), (1, 1), (800, 600)).is_ok());
        assert!(check_region((0, 0), (0, 0), (800, 600)).is_ok());

        assert!(matches!(
            check_region((1, 0), (800, 600), (800, 600)),
            Err(Error::SnapshotRegion(_))
        ));
        assert!(matches!(
            check_region((0, 0), (800, 601), (800, 600)),
            Err(Error::SnapshotRegion(_))
        ));
    }

    #[test]
    fn huge_regions_are_rejected_without_overflowing() {
        assert!(matches!(
            check_region((usize::MAX, 0), (2, 1), (800, 600)),
            Err(Error::SnapshotRegion(_))
        ));
        assert!(matches!(
            check_region((0, 1), (1, usize::MAX), (800, 600)),
            Err(Error::SnapshotRegion(_))
        ));
    }

    #[test]
    fn images_are_flipped_to_top_down() {
        // 1x2 frame: bottom row red, top row blue.
        let rows = vec![255, 0, 0, 0, 0, 255];
        let img = bottom_up_to_image(1, 2, rows).unwrap();

        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(img.get_pixel(0, 1), &Rgb([255, 0, 0]));
    }

    #[test]
    fn truncated_readbacks_are_errors() {
        assert!(matches!(
            bottom_up_to_image(2, 2, vec![0; 6]),
            Err(Error::Gpu(_))
        ));
    }
}
