/// Renderer trait - blit/fill/clip interface consumed by scroll layers

use std::sync::Arc;
use glam::UVec2;
use crate::error::Result;
use crate::renderer::{Texture, TextureDesc, Rect2D, BlitFlip, Color};

/// Main renderer trait
///
/// Central interface between the scene code and a raster backend.
/// Scroll layers only ever copy rectangles out of textures, fill solid
/// rectangles and restrict drawing with a clip rectangle; everything else
/// (pixel formats, presentation, GPU resources) stays inside the backend.
pub trait Renderer: Send + Sync {
    /// Create a texture
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor (size, format, initial pixels)
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Copy `src` (texture pixels) into `dst` (render target pixels)
    ///
    /// When `src` and `dst` differ in size the copy is scaled. `flip` mirrors
    /// the source rectangle before it is written. Output is restricted to
    /// the current clip rectangle.
    fn blit(
        &mut self,
        texture: &Arc<dyn Texture>,
        src: Rect2D,
        dst: Rect2D,
        flip: BlitFlip,
    ) -> Result<()>;

    /// Fill `dst` with a solid color (restricted to the clip rectangle)
    fn fill_rect(&mut self, dst: Rect2D, color: Color) -> Result<()>;

    /// Restrict subsequent blits and fills to `rect`
    fn set_clip_rect(&mut self, rect: Rect2D) -> Result<()>;

    /// Remove the clip rectangle (full render target)
    fn clear_clip_rect(&mut self) -> Result<()>;

    /// Size of the current render target in pixels
    fn viewport_size(&self) -> UVec2;
}
