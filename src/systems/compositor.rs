//! Compositor - velocity field -> packed ABGR pixels
//!
//! The output buffer is grid-sized, row 0 at the top of the image. Grid rows
//! run bottom-up (y up), so rows are flipped on the way out.

use crate::domain::{Palette, Rgba};
use crate::spatial::VectorField;

#[derive(Clone, Debug)]
pub struct Compositor {
    palette: Palette,
    background: Rgba,
}

impl Compositor {
    pub fn new(palette: Palette, background: Rgba) -> Self {
        Self { palette, background }
    }

    /// Background from a hex string; unreadable input is transparent black.
    pub fn background_from_hex(hex: &str, alpha: f32) -> Rgba {
        let alpha = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
        match Rgba::from_hex(hex) {
            Some(c) => Rgba { a: alpha, ..c },
            None => {
                log::warn!("compositor: unreadable background {:?}, using transparent", hex);
                Rgba::TRANSPARENT
            }
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Colour for one velocity magnitude
    #[inline]
    pub fn shade(&self, magnitude: f32) -> Rgba {
        let t = if magnitude.is_finite() { magnitude.clamp(0.0, 1.0) } else { 0.0 };
        let c = self.palette.sample(t);
        let bg = self.background;
        Rgba {
            r: bg.r + (c.r - bg.r) * t,
            g: bg.g + (c.g - bg.g) * t,
            b: bg.b + (c.b - bg.b) * t,
            a: bg.a + (1.0 - bg.a) * t,
        }
    }

    /// Fill `out` with one pixel per grid cell. `out` is resized to match.
    pub fn composite(&self, velocity: &VectorField, out: &mut Vec<u32>) {
        let (w, h) = velocity.dimensions();
        let (w, h) = (w as usize, h as usize);
        out.resize(w * h, 0);

        let cells = velocity.cells();
        for (row, src) in cells.chunks_exact(w).enumerate() {
            let dst_start = (h - 1 - row) * w;
            let dst = &mut out[dst_start..dst_start + w];
            for (px, v) in dst.iter_mut().zip(src) {
                *px = self.shade(v.length()).to_abgr();
            }
        }
    }
}
