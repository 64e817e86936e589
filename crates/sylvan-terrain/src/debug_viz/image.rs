//! A 2D debug image represented as a flat array of RGBA pixels.

use std::path::Path;

use crate::biome::Rgb;

/// A 2D debug image, stored as row-major RGBA pixels.
#[derive(Clone, Debug)]
pub struct DebugImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Create a new black (all-zero) image with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Set an opaque pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = self.index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
    }

    /// Color of a pixel, ignoring alpha.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgb {
        let idx = self.index(x, y);
        Rgb::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Count the number of unique colors (ignoring alpha) in the image.
    pub fn unique_color_count(&self) -> usize {
        let mut colors = hashbrown::HashSet::new();
        for chunk in self.pixels.chunks_exact(4) {
            colors.insert((chunk[0], chunk[1], chunk[2]));
        }
        colors.len()
    }

    /// Write the image as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<(), ::image::ImageError> {
        ::image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            ::image::ExtendedColorType::Rgba8,
            ::image::ImageFormat::Png,
        )?;
        tracing::debug!(
            path = %path.display(),
            width = self.width,
            height = self.height,
            "saved debug image"
        );
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }
}
