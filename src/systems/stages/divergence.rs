use crate::spatial::{ScalarField, VectorField};

use super::boundary::write_cells;
use super::StepContext;

/// Central-difference divergence of `velocity`, scaled by `1/dt`
pub fn compute_divergence(ctx: &StepContext, velocity: &VectorField, dst: &mut ScalarField) {
    debug_assert!(velocity.same_shape(dst));
    let inv_dt = ctx.inv_dt();
    write_cells(ctx, dst, |x, y| {
        let (xi, yi) = (x as i32, y as i32);
        let x0 = velocity.get_clamped(xi - 1, yi).x;
        let x1 = velocity.get_clamped(xi + 1, yi).x;
        let y0 = velocity.get_clamped(xi, yi - 1).y;
        let y1 = velocity.get_clamped(xi, yi + 1).y;
        (x1 - x0 + y1 - y0) * 0.5 * inv_dt
    });
}
