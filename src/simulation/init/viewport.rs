/// Largest device pixel ratio the backing store is sized for
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Drawing surface size in CSS pixels plus the capped device pixel ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    /// `max(1, floor(size))` per axis; ratio in (0, 2], 1 when unusable.
    pub fn from_css(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let axis = |v: f32| if v.is_finite() && v >= 1.0 { v.floor() as u32 } else { 1 };
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        Self { width: axis(width), height: axis(height), pixel_ratio }
    }

    /// Canvas backing-store size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}
