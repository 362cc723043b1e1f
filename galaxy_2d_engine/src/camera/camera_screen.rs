/// CameraScreen — scroll state of one viewport.
///
/// Offsets on wrapping axes are never wrapped here: layers wrap at draw
/// time, and `seam_cross_count` turns the offset back into a continuous
/// (unwrapped) coordinate.

use glam::{BVec2, IVec2, Vec2};
use crate::scene_space::{SceneBox, SceneSpace, AXIS_X, AXIS_Y};
use super::camera_config::{CameraConfig, FrameTime};

#[derive(Debug, Clone, PartialEq)]
pub struct CameraScreen {
    /// Top-left of the viewport in scene space, before shake
    offset: Vec2,
    /// `offset` plus this frame's shake, clamped like `offset`
    render_offset: Vec2,
    /// Desired look-at center
    scroll_target: Vec2,
    has_target: bool,
    scroll_speed: f32,
    /// Per-axis one-frame flag: the target jumped across a seam
    target_wrapped: BVec2,
    seam_cross_count: IVec2,
    shake_magnitude: f32,
    shake_offset: Vec2,
    /// UI-reserved border subtracted from the centering region
    occlusion: Vec2,
    viewport_size: Vec2,
    /// Change of the unwrapped offset during the last update
    delta_offset: Vec2,
}

impl CameraScreen {
    pub fn new(viewport_size: Vec2, scroll_speed: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            render_offset: Vec2::ZERO,
            scroll_target: Vec2::ZERO,
            has_target: false,
            scroll_speed,
            target_wrapped: BVec2::FALSE,
            seam_cross_count: IVec2::ZERO,
            shake_magnitude: 0.0,
            shake_offset: Vec2::ZERO,
            occlusion: Vec2::ZERO,
            viewport_size,
            delta_offset: Vec2::ZERO,
        }
    }

    // ===== ACCESSORS =====

    pub fn offset(&self) -> Vec2 { self.offset }

    /// Offset layers should be drawn with (includes shake)
    pub fn render_offset(&self) -> Vec2 { self.render_offset }

    pub fn scroll_target(&self) -> Vec2 { self.scroll_target }

    pub fn scroll_speed(&self) -> f32 { self.scroll_speed }

    pub fn target_wrapped(&self) -> BVec2 { self.target_wrapped }

    pub fn seam_cross_count(&self) -> IVec2 { self.seam_cross_count }

    pub fn shake_magnitude(&self) -> f32 { self.shake_magnitude }

    pub fn shake_offset(&self) -> Vec2 { self.shake_offset }

    pub fn occlusion(&self) -> Vec2 { self.occlusion }

    pub fn viewport_size(&self) -> Vec2 { self.viewport_size }

    pub fn delta_offset(&self) -> Vec2 { self.delta_offset }

    /// Area of the scene this screen shows (pre-shake)
    pub fn visible_box(&self) -> SceneBox {
        SceneBox::new(self.offset, self.viewport_size)
    }

    /// `offset + seam_cross_count * scene dimensions`
    pub fn unwrapped_offset(&self, scene: &SceneSpace) -> Vec2 {
        self.offset + self.seam_cross_count.as_vec2() * scene.dimensions()
    }

    // ===== MUTATION (driven by CameraMan) =====

    pub(crate) fn set_scroll_target(&mut self, scene: &SceneSpace, point: Vec2, speed: f32, wrapped: bool) {
        if self.has_target {
            let delta = point - self.scroll_target;
            for axis in [AXIS_X, AXIS_Y] {
                if !scene.axis_wraps(axis) {
                    continue;
                }
                if wrapped || delta[axis].abs() > scene.axis_dimension(axis) / 2.0 {
                    set_axis(&mut self.target_wrapped, axis, true);
                }
            }
        }
        self.scroll_target = point;
        self.scroll_speed = speed;
        self.has_target = true;
    }

    pub(crate) fn set_offset(&mut self, scene: &SceneSpace, offset: Vec2) {
        self.offset = clamp_offset(offset, scene, self.viewport_size);
        self.render_offset = self.offset;
    }

    pub(crate) fn set_viewport_size(&mut self, scene: &SceneSpace, viewport_size: Vec2) {
        self.viewport_size = viewport_size;
        self.set_offset(scene, self.offset);
    }

    pub(crate) fn set_occlusion(&mut self, occlusion: Vec2) {
        self.occlusion = occlusion;
    }

    pub(crate) fn set_shake_magnitude(&mut self, magnitude: f32) {
        self.shake_magnitude = magnitude.max(0.0);
    }

    pub(crate) fn add_shake_magnitude(&mut self, magnitude: f32) {
        self.set_shake_magnitude(self.shake_magnitude + magnitude);
    }

    /// Advance one frame
    ///
    /// `shake_direction` is a unit vector chosen by the caller.
    pub(crate) fn update(
        &mut self,
        scene: &SceneSpace,
        config: &CameraConfig,
        frame: &FrameTime,
        shake_direction: Vec2,
    ) {
        let previous = self.unwrapped_offset(scene);

        // ========== SHAKE ==========
        let decayed = self.shake_magnitude.min(config.max_shake_magnitude())
            - config.shake_decay * frame.elapsed_seconds();
        self.shake_magnitude = decayed.max(0.0);
        self.shake_offset = shake_direction * self.shake_magnitude * config.shake_strength;

        // ========== SEAM CORRECTION ==========
        if frame.sim_frame_drawn && self.target_wrapped.any() {
            for axis in [AXIS_X, AXIS_Y] {
                if !axis_flag(self.target_wrapped, axis) || !scene.axis_wraps(axis) {
                    continue;
                }
                let dimension = scene.axis_dimension(axis);
                let direction = if self.scroll_target[axis] < dimension / 2.0 { 1 } else { -1 };
                self.offset[axis] -= direction as f32 * dimension;
                self.seam_cross_count[axis] += direction;
                crate::engine_debug!("galaxy2d::CameraScreen",
                    "Seam crossed on axis {} (direction {}, count {})",
                    axis, direction, self.seam_cross_count[axis]);
            }
            self.target_wrapped = BVec2::FALSE;
        }

        // ========== SMOOTHING ==========
        let offset_target = self.scroll_target - self.viewport_size / 2.0 - self.occlusion / 2.0;
        if offset_target.floor() != self.offset.floor() {
            let t = (self.scroll_speed * frame.elapsed_ms * config.scroll_time_scale).min(1.0);
            self.offset += (offset_target - self.offset) * t;
        }

        // ========== BOUNDS ==========
        self.offset = clamp_offset(self.offset, scene, self.viewport_size);
        self.render_offset = clamp_offset(self.offset + self.shake_offset, scene, self.viewport_size);
        self.delta_offset = self.unwrapped_offset(scene) - previous;
    }
}

/// Clamp bounded axes to `[0, scene - viewport]` (0 when the viewport is
/// larger); wrapping axes are left unbounded.
fn clamp_offset(offset: Vec2, scene: &SceneSpace, viewport_size: Vec2) -> Vec2 {
    let clamp_axis = |value: f32, axis: usize| {
        if scene.axis_wraps(axis) {
            return value;
        }
        let max = (scene.axis_dimension(axis) - viewport_size[axis]).max(0.0);
        value.clamp(0.0, max)
    };
    Vec2::new(clamp_axis(offset.x, AXIS_X), clamp_axis(offset.y, AXIS_Y))
}

fn axis_flag(flags: BVec2, axis: usize) -> bool {
    if axis == AXIS_X { flags.x } else { flags.y }
}

fn set_axis(flags: &mut BVec2, axis: usize, value: bool) {
    if axis == AXIS_X { flags.x = value } else { flags.y = value }
}

#[cfg(test)]
#[path = "camera_screen_tests.rs"]
mod tests;
