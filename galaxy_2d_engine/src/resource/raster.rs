/// Raster - decoded RGBA pixels kept on the CPU.
///
/// The asset loader decodes images into a `Raster`; scroll layers upload it
/// to a backend texture and keep it around for pixel queries and edge-color
/// sampling.

use crate::error::Result;
use crate::renderer::{Color, TextureDesc, TextureFormat};

/// Decoded image, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Raster {
    /// Build a raster from tightly packed RGBA8 bytes
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` if the byte count does not match
    /// `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let texel = TextureFormat::R8G8B8A8_UNORM.bytes_per_pixel() as usize;
        let expected = width as usize * height as usize * texel;
        if bytes.len() != expected {
            crate::engine_bail_resource!("galaxy2d::Raster",
                "Raster {}x{} expects {} bytes, got {}",
                width, height, expected, bytes.len());
        }
        let pixels: Vec<Color> = bytemuck::cast_slice::<u8, Color>(bytes).to_vec();
        Ok(Self { width, height, pixels })
    }

    /// Raster filled with a single color
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Raster whose pixels are produced by `f(x, y)`
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at (x, y), `None` outside the raster
    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Overwrite a pixel. Returns false if (x, y) is outside the raster.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = color;
        true
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Raw RGBA8 bytes (zero-copy view)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels.as_slice())
    }

    /// Texture descriptor that uploads this raster as-is
    pub fn texture_desc(&self, name: &str) -> TextureDesc {
        TextureDesc {
            name: name.to_string(),
            width: self.width,
            height: self.height,
            format: TextureFormat::R8G8B8A8_UNORM,
            data: Some(self.as_bytes().to_vec()),
        }
    }
}

#[cfg(test)]
#[path = "raster_tests.rs"]
mod tests;
