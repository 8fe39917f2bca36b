use crate::core::Vec2;

/// Bounding box of the tracked drawing surface, in screen pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    #[inline]
    pub fn right(&self) -> f32 { self.left + self.width }

    #[inline]
    pub fn bottom(&self) -> f32 { self.top + self.height }

    #[inline]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Inclusive containment; a zero-area surface contains nothing
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.has_area() && x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Screen point to simulation space: [-1,1]², y up. `None` without area.
    pub fn normalize(&self, x: f32, y: f32) -> Option<Vec2> {
        if !self.has_area() {
            return None;
        }
        let nx = (x - self.left) / self.width;
        let ny = (y - self.top) / self.height;
        Some(Vec2::new(
            (nx * 2.0 - 1.0).clamp(-1.0, 1.0),
            (-(ny * 2.0 - 1.0)).clamp(-1.0, 1.0),
        ))
    }
}
