/// Renderer module - backend-facing traits and plain rendering types

pub mod renderer;
pub mod texture;
pub mod color;
pub mod rect;

#[cfg(test)]
pub mod mock_renderer;

pub use renderer::*;
pub use texture::*;
pub use color::*;
pub use rect::*;
