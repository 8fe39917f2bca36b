//! Pressure Poisson solve
//!
//! Fixed number of Jacobi passes per frame; no convergence test, so the
//! per-frame cost never varies.

use crate::spatial::{PingPong, ScalarField};

use super::boundary::write_cells;
use super::StepContext;

/// The stencil pairs with the central differences of the divergence and
/// gradient kernels, which are two cells wide.
const STRIDE: i32 = 2;

/// Relax `pressure` towards `∇²p = divergence`. Returns the index of the
/// buffer written last.
pub fn solve_pressure(
    ctx: &StepContext,
    iterations: u32,
    divergence: &ScalarField,
    pressure: &mut PingPong<f32>,
) -> usize {
    assert_eq!(divergence.dimensions(), pressure.dimensions(), "pressure buffers must match the divergence grid");

    for i in 0..iterations.max(1) {
        let (src, dst) = pressure.pass(i);
        write_cells(ctx, dst, |x, y| {
            let (xi, yi) = (x as i32, y as i32);
            let sum = src.get_clamped(xi + STRIDE, yi)
                + src.get_clamped(xi - STRIDE, yi)
                + src.get_clamped(xi, yi + STRIDE)
                + src.get_clamped(xi, yi - STRIDE);
            sum * 0.25 - divergence.read(x, y)
        });
    }

    pressure.last_written().unwrap_or(0)
}
