/// Integer pixel rectangles used for blits, fills and clipping

use glam::{IVec2, UVec2};

/// 2D rectangle in render-target pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect2D {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect2D {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(size: UVec2) -> Self {
        Self::new(0, 0, size.x, size.y)
    }

    /// True if the rectangle covers no pixel
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn corner(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlapping part of two rectangles, `None` if they do not overlap
    pub fn intersect(&self, other: &Rect2D) -> Option<Rect2D> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect2D::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

bitflags::bitflags! {
    /// Mirroring applied to the source rectangle of a blit
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BlitFlip: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL = 0b10;
    }
}
