/// SceneSpace — dimensions and wrap topology of a loaded world.
///
/// Read (never owned) by layers and cameras. Replaced as a whole when a
/// world is (re)loaded.

use glam::{BVec2, Vec2};
use crate::error::Result;
use super::scene_box::SceneBox;
use super::wrap::{wrap_coordinate, force_bounds, shortest_axis_distance};

/// Axis index of X in per-axis helpers
pub const AXIS_X: usize = 0;
/// Axis index of Y in per-axis helpers
pub const AXIS_Y: usize = 1;

/// Scene width/height plus independent wrap flags per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSpace {
    width: u32,
    height: u32,
    wrap: BVec2,
}

impl SceneSpace {
    /// Create a scene space
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if either dimension is zero.
    pub fn new(width: u32, height: u32, wrap_x: bool, wrap_y: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            crate::engine_bail_config!(
                "galaxy2d::SceneSpace",
                "Scene dimensions must be positive, got {}x{}", width, height
            );
        }
        Ok(Self { width, height, wrap: BVec2::new(wrap_x, wrap_y) })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn wraps_x(&self) -> bool {
        self.wrap.x
    }

    pub fn wraps_y(&self) -> bool {
        self.wrap.y
    }

    /// Wrap flags of both axes
    pub fn wraps(&self) -> BVec2 {
        self.wrap
    }

    pub fn dimensions(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Dimension of one axis (`AXIS_X` or `AXIS_Y`)
    pub fn axis_dimension(&self, axis: usize) -> f32 {
        if axis == AXIS_X { self.width as f32 } else { self.height as f32 }
    }

    /// Wrap flag of one axis (`AXIS_X` or `AXIS_Y`)
    pub fn axis_wraps(&self, axis: usize) -> bool {
        if axis == AXIS_X { self.wrap.x } else { self.wrap.y }
    }

    /// Wrap `pos` in place on wrapping axes. Returns true if it moved.
    pub fn wrap_position(&self, pos: &mut Vec2) -> bool {
        let (x, wrapped_x) = wrap_coordinate(pos.x, self.width as f32, self.wrap.x);
        let (y, wrapped_y) = wrap_coordinate(pos.y, self.height as f32, self.wrap.y);
        *pos = Vec2::new(x, y);
        wrapped_x || wrapped_y
    }

    /// Wrapped copy of `pos`
    pub fn wrapped(&self, pos: Vec2) -> Vec2 {
        let mut pos = pos;
        self.wrap_position(&mut pos);
        pos
    }

    /// Wrap on wrapping axes, clamp to `[0, dimension - 1]` on the others.
    /// Returns true if `pos` changed.
    pub fn force_bounds(&self, pos: &mut Vec2) -> bool {
        let (x, changed_x) = force_bounds(pos.x, self.width as f32, self.wrap.x);
        let (y, changed_y) = force_bounds(pos.y, self.height as f32, self.wrap.y);
        *pos = Vec2::new(x, y);
        changed_x || changed_y
    }

    /// Whether `point` lies inside the scene on every bounded axis,
    /// allowing `margin` pixels beyond the edges. Wrapping axes always pass.
    pub fn is_within_bounds(&self, point: Vec2, margin: f32) -> bool {
        let inside = |value: f32, dimension: f32, wrap: bool| {
            wrap || (value >= -margin && value < dimension + margin)
        };
        inside(point.x, self.width as f32, self.wrap.x)
            && inside(point.y, self.height as f32, self.wrap.y)
    }

    /// Minimal displacement from `a` to `b` under this scene's wrapping.
    ///
    /// Basis for proximity checks everywhere in the engine: continuous as
    /// either point crosses a seam, and `shortest_distance(a, b) ==
    /// -shortest_distance(b, a)`.
    pub fn shortest_distance(&self, a: Vec2, b: Vec2) -> Vec2 {
        Vec2::new(
            shortest_axis_distance(a.x, b.x, self.width as f32, self.wrap.x),
            shortest_axis_distance(a.y, b.y, self.height as f32, self.wrap.y),
        )
    }

    /// Copies of `scene_box` covering every position it occupies.
    ///
    /// The box corner is first wrapped into the scene; for each wrapping
    /// axis where the box then crosses the far edge, a copy shifted back by
    /// one scene dimension is added. Yields 1, 2 or 4 boxes.
    pub fn wrap_box(&self, scene_box: &SceneBox) -> Vec<SceneBox> {
        let corner = self.wrapped(scene_box.corner());
        let max = corner + scene_box.size();

        let mut xs = vec![corner.x];
        if self.wrap.x && max.x > self.width as f32 {
            xs.push(corner.x - self.width as f32);
        }
        let mut ys = vec![corner.y];
        if self.wrap.y && max.y > self.height as f32 {
            ys.push(corner.y - self.height as f32);
        }

        let mut boxes = Vec::with_capacity(xs.len() * ys.len());
        for &y in &ys {
            for &x in &xs {
                boxes.push(SceneBox::new(Vec2::new(x, y), scene_box.size()));
            }
        }
        boxes
    }

    /// Shortest distance from `point` to `scene_box` under this scene's
    /// wrapping, 0 when the point is inside any replica of the box.
    pub fn distance_to_box(&self, point: Vec2, scene_box: &SceneBox) -> f32 {
        let point = self.wrapped(point);
        let images = |value: f32, dimension: f32, wrap: bool| {
            if wrap { vec![value - dimension, value, value + dimension] } else { vec![value] }
        };
        let xs = images(point.x, self.width as f32, self.wrap.x);
        let ys = images(point.y, self.height as f32, self.wrap.y);

        let mut best = f32::INFINITY;
        for replica in self.wrap_box(scene_box) {
            for &y in &ys {
                for &x in &xs {
                    best = best.min(replica.distance_to(Vec2::new(x, y)));
                }
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "scene_space_tests.rs"]
mod tests;
