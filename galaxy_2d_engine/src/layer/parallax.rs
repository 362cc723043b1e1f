/// Parallax - how fast a layer scrolls relative to the camera

use glam::{BVec2, Vec2};
use crate::scene_space::SceneSpace;

/// Scroll behaviour of a layer, resolved once into a per-axis ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Parallax {
    /// Scroll so the layer's edges meet the viewport's edges when the camera
    /// reaches the scene's edges (bounded axes), or scroll proportionally to
    /// layer/scene size (wrapping axes)
    LockedToViewport,
    /// Scroll 1:1 with the camera
    #[default]
    FullScroll,
    /// Literal per-axis ratios
    ExplicitRatio(f32, f32),
}

impl Parallax {
    /// Resolve into the ratio applied to the camera offset.
    ///
    /// * `layer_size` - layer size in drawn (scaled) pixels
    /// * `scene` - scene the camera scrolls through
    /// * `viewport` - size of the screen the layer is drawn into
    /// * `wrap` - the layer's own wrap flags
    pub fn resolve(&self, layer_size: Vec2, scene: &SceneSpace, viewport: Vec2, wrap: BVec2) -> Vec2 {
        match *self {
            Parallax::FullScroll => Vec2::ONE,
            Parallax::ExplicitRatio(x, y) => Vec2::new(x, y),
            Parallax::LockedToViewport => {
                let scene_size = scene.dimensions();
                Vec2::new(
                    locked_axis_ratio(layer_size.x, scene_size.x, viewport.x, wrap.x),
                    locked_axis_ratio(layer_size.y, scene_size.y, viewport.y, wrap.y),
                )
            }
        }
    }
}

fn locked_axis_ratio(layer: f32, scene: f32, viewport: f32, wrap: bool) -> f32 {
    if wrap {
        return if scene > 0.0 { layer / scene } else { 0.0 };
    }
    let range = scene - viewport;
    if range <= 0.0 {
        return 0.0;
    }
    ((layer - viewport) / range).max(0.0)
}

#[cfg(test)]
#[path = "parallax_tests.rs"]
mod tests;
