//! Pointer impulse injection

use crate::core::Vec2;
use crate::domain::BoundaryMode;
use crate::spatial::{FieldValue, VectorField};

use super::StepContext;

/// One radial impulse, in clip space ([-1,1]², y up)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceSplat {
    pub center: Vec2,
    /// Half-size of the affected square
    pub half_extent: Vec2,
    pub force: Vec2,
}

impl ForceSplat {
    /// Build the splat for the current pointer sample.
    ///
    /// `cursor_size` is in grid cells across (clip half-extent
    /// `cursor_size * cell_scale`). The centre is pulled in so the splat keeps
    /// two cells clear of the edge; for a cursor wider than the grid the
    /// bounds cross and the upper bound wins.
    pub fn from_pointer(
        coords: Vec2,
        diff: Vec2,
        mouse_force: f32,
        cursor_size: f32,
        cell_scale: Vec2,
    ) -> Self {
        let half_extent = cell_scale * cursor_size;
        let clamp_axis = |v: f32, half: f32, px: f32| {
            let lo = -1.0 + half + px * 2.0;
            let hi = 1.0 - half - px * 2.0;
            v.max(lo).min(hi)
        };
        Self {
            center: Vec2::new(
                clamp_axis(coords.x, half_extent.x, cell_scale.x),
                clamp_axis(coords.y, half_extent.y, cell_scale.y),
            ),
            half_extent,
            force: diff * 0.5 * mouse_force,
        }
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.force.is_zero() || self.half_extent.x <= 0.0 || self.half_extent.y <= 0.0
    }
}

/// Add `force * (1 - |c|)²` to every cell under the splat, where `c` is the
/// cell centre in splat-local coordinates ([-1,1]² across the square).
/// Existing momentum is kept.
pub fn apply_external_force(ctx: &StepContext, splat: &ForceSplat, dst: &mut VectorField) {
    if splat.is_noop() {
        return;
    }
    let (w, h) = dst.dimensions();
    let bounded = ctx.boundary == BoundaryMode::Bounded;

    let (x0, x1) = covered_cells(splat.center.x, splat.half_extent.x, w);
    let (y0, y1) = covered_cells(splat.center.y, splat.half_extent.y, h);

    for y in y0..=y1 {
        for x in x0..=x1 {
            if bounded && dst.is_border(x, y) {
                continue;
            }
            let clip = Vec2::new(
                (x as f32 + 0.5) / w as f32 * 2.0 - 1.0,
                (y as f32 + 0.5) / h as f32 * 2.0 - 1.0,
            );
            let local = Vec2::new(
                (clip.x - splat.center.x) / splat.half_extent.x,
                (clip.y - splat.center.y) / splat.half_extent.y,
            );
            if local.x.abs() > 1.0 || local.y.abs() > 1.0 {
                continue;
            }
            let falloff = 1.0 - local.length().min(1.0);
            let falloff = falloff * falloff;
            let v = dst.read(x, y) + splat.force * falloff;
            dst.write(x, y, v.quantize(ctx.precision));
        }
    }
}

/// Inclusive cell range whose centres may fall inside `center ± half` on one axis
fn covered_cells(center: f32, half: f32, extent: u32) -> (u32, u32) {
    let to_cell = |clip: f32| (clip + 1.0) * 0.5 * extent as f32 - 0.5;
    let last = extent as i64 - 1;
    let lo = (to_cell(center - half).floor() as i64).clamp(0, last) as u32;
    let hi = (to_cell(center + half).ceil() as i64).clamp(0, last) as u32;
    (lo, hi)
}
