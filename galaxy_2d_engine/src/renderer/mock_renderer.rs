/// Mock Renderer for unit tests (no backend required)
///
/// Records every command it receives and can replay them into a CPU
/// `Raster`, so layer tests can check both the issued blits and the
/// resulting pixels.

use std::sync::Arc;
use glam::UVec2;

use crate::error::{Error, Result};
use crate::renderer::{
    Renderer, Texture, TextureDesc, TextureInfo, Rect2D, BlitFlip, Color,
};
use crate::resource::Raster;

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub pixels: Vec<Color>,
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Recorded commands
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    Blit {
        texture: String,
        src: Rect2D,
        dst: Rect2D,
        flip: BlitFlip,
    },
    Fill {
        dst: Rect2D,
        color: Color,
    },
    SetClip(Rect2D),
    ClearClip,
}

// ============================================================================
// Mock Renderer
// ============================================================================

pub struct MockRenderer {
    pub viewport: UVec2,
    pub commands: Vec<MockCommand>,
    pub fail_texture_creation: bool,
    textures: Vec<Arc<MockTexture>>,
}

impl MockRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: UVec2::new(width, height),
            commands: Vec::new(),
            fail_texture_creation: false,
            textures: Vec::new(),
        }
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// (src, dst, flip) of every recorded blit
    pub fn blits(&self) -> Vec<(Rect2D, Rect2D, BlitFlip)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                MockCommand::Blit { src, dst, flip, .. } => Some((*src, *dst, *flip)),
                _ => None,
            })
            .collect()
    }

    /// (dst, color) of every recorded fill
    pub fn fills(&self) -> Vec<(Rect2D, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                MockCommand::Fill { dst, color } => Some((*dst, *color)),
                _ => None,
            })
            .collect()
    }

    /// Replay all recorded commands onto a transparent viewport-sized raster
    pub fn rasterize(&self) -> Raster {
        let mut target = Raster::solid(self.viewport.x, self.viewport.y, Color::TRANSPARENT);
        self.replay(|x, y, color| {
            target.set_pixel(x as i64, y as i64, color);
        });
        target
    }

    /// Number of blits/fills that wrote each pixel (row-major, viewport-sized)
    pub fn coverage(&self) -> Vec<u32> {
        let width = self.viewport.x as usize;
        let mut counts = vec![0u32; width * self.viewport.y as usize];
        self.replay(|x, y, _| {
            counts[y as usize * width + x as usize] += 1;
        });
        counts
    }

    fn find_texture(&self, name: &str) -> Option<&Arc<MockTexture>> {
        self.textures.iter().find(|t| t.info.name == name)
    }

    fn replay(&self, mut write: impl FnMut(i32, i32, Color)) {
        let full = Rect2D::from_size(self.viewport);
        let mut clip = full;

        for command in &self.commands {
            match command {
                MockCommand::SetClip(rect) => clip = rect.intersect(&full).unwrap_or_default(),
                MockCommand::ClearClip => clip = full,
                MockCommand::Fill { dst, color } => {
                    if let Some(area) = dst.intersect(&clip) {
                        for y in area.y..area.bottom() {
                            for x in area.x..area.right() {
                                write(x, y, *color);
                            }
                        }
                    }
                }
                MockCommand::Blit { texture, src, dst, flip } => {
                    let Some(texture) = self.find_texture(texture) else { continue };
                    let Some(area) = dst.intersect(&clip) else { continue };
                    let tex_w = texture.info.width as i64;
                    let tex_h = texture.info.height as i64;
                    for y in area.y..area.bottom() {
                        let mut v = (y - dst.y) as i64 * src.height as i64 / dst.height as i64;
                        if flip.contains(BlitFlip::VERTICAL) {
                            v = src.height as i64 - 1 - v;
                        }
                        let sy = (src.y as i64 + v).clamp(0, tex_h - 1);
                        for x in area.x..area.right() {
                            let mut u = (x - dst.x) as i64 * src.width as i64 / dst.width as i64;
                            if flip.contains(BlitFlip::HORIZONTAL) {
                                u = src.width as i64 - 1 - u;
                            }
                            let sx = (src.x as i64 + u).clamp(0, tex_w - 1);
                            write(x, y, texture.pixels[(sy * tex_w + sx) as usize]);
                        }
                    }
                }
            }
        }
    }
}

impl Renderer for MockRenderer {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if self.fail_texture_creation {
            return Err(Error::OutOfMemory);
        }
        let info = TextureInfo {
            name: desc.name,
            width: desc.width,
            height: desc.height,
            format: desc.format,
        };
        let pixels = match &desc.data {
            Some(bytes) => {
                if bytes.len() as u64 != info.byte_size() {
                    crate::engine_bail!("galaxy2d::mock",
                        "create_texture: '{}' has {} bytes, expected {}",
                        info.name, bytes.len(), info.byte_size());
                }
                bytemuck::cast_slice::<u8, Color>(bytes).to_vec()
            }
            None => vec![Color::TRANSPARENT; desc.width as usize * desc.height as usize],
        };
        let texture = Arc::new(MockTexture { info, pixels });
        self.textures.push(texture.clone());
        Ok(texture)
    }

    fn blit(
        &mut self,
        texture: &Arc<dyn Texture>,
        src: Rect2D,
        dst: Rect2D,
        flip: BlitFlip,
    ) -> Result<()> {
        if src.is_empty() || dst.is_empty() {
            crate::engine_bail!("galaxy2d::mock",
                "blit: empty rectangle (src {:?} dst {:?})", src, dst);
        }
        self.commands.push(MockCommand::Blit {
            texture: texture.info().name.clone(),
            src,
            dst,
            flip,
        });
        Ok(())
    }

    fn fill_rect(&mut self, dst: Rect2D, color: Color) -> Result<()> {
        self.commands.push(MockCommand::Fill { dst, color });
        Ok(())
    }

    fn set_clip_rect(&mut self, rect: Rect2D) -> Result<()> {
        self.commands.push(MockCommand::SetClip(rect));
        Ok(())
    }

    fn clear_clip_rect(&mut self) -> Result<()> {
        self.commands.push(MockCommand::ClearClip);
        Ok(())
    }

    fn viewport_size(&self) -> UVec2 {
        self.viewport
    }
}

#[cfg(test)]
#[path = "mock_renderer_tests.rs"]
mod tests;
