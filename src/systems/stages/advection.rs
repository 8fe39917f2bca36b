//! Semi-Lagrangian advection with optional BFECC correction

use crate::spatial::VectorField;

use super::boundary::write_cells;
use super::{aspect_ratio, StepContext};

/// Transport `source` along `velocity` into `dst`.
///
/// Each cell traces back by `velocity * dt` (aspect corrected) and samples
/// `source` there. With `bfecc` the trace is run back and forth first and
/// half the round-trip error is removed from the start point, which keeps
/// small vortices from smearing out. Self-advection passes the same field
/// as `velocity` and `source`.
pub fn advect(
    ctx: &StepContext,
    velocity: &VectorField,
    source: &VectorField,
    bfecc: bool,
    dst: &mut VectorField,
) {
    debug_assert!(velocity.same_shape(dst) && source.same_shape(dst));
    let (w, h) = dst.dimensions();
    let step = aspect_ratio(w, h) * ctx.dt;

    write_cells(ctx, dst, |x, y| {
        let uv = velocity.uv(x, y);
        if !bfecc {
            let back = uv - velocity.sample(uv).scale(step);
            return source.sample(back);
        }

        let back = uv - velocity.sample(uv).scale(step);
        let forth = back + velocity.sample(back).scale(step);
        let error = forth - uv;
        let corrected = uv - error * 0.5;
        let back2 = corrected - velocity.sample(corrected).scale(step);
        source.sample(back2)
    });
}
