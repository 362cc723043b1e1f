/// Axis-aligned box in scene coordinates.

use glam::Vec2;

/// Axis-aligned box (top-left corner + non-negative size).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneBox {
    corner: Vec2,
    size: Vec2,
}

impl SceneBox {
    /// Create a box from a corner and a size.
    ///
    /// Negative sizes are flipped so the stored corner is always the
    /// top-left one.
    pub fn new(corner: Vec2, size: Vec2) -> Self {
        let min = corner.min(corner + size);
        Self { corner: min, size: size.abs() }
    }

    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self::new(a.min(b), (b - a).abs())
    }

    pub fn corner(&self) -> Vec2 {
        self.corner
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Exclusive bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.corner + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.corner + self.size * 0.5
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Same box moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self { corner: self.corner + delta, size: self.size }
    }

    /// Half-open containment test
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.corner.x && point.x < max.x && point.y >= self.corner.y && point.y < max.y
    }

    /// Point of the box nearest to `point` (the point itself when inside)
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.corner, self.max())
    }

    /// Euclidean distance from `point` to the box, 0 inside
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.closest_point(point).distance(point)
    }
}
