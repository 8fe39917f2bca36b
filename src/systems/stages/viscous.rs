//! Implicit viscous diffusion by Jacobi relaxation

use crate::core::Vec2;
use crate::spatial::{PingPong, VectorField};

use super::boundary::write_cells;
use super::StepContext;

/// Neighbour stride of the relaxation stencil, in cells
const STRIDE: i32 = 2;

/// Relax `scratch` towards the viscous solution for `velocity`.
///
/// Each pass computes `(4·old + ν·dt·Σ neighbours) / (4·(1 + ν·dt))` with
/// `old` from `velocity` and neighbours from the current estimate. Passes
/// ping-pong through `scratch`, starting from whatever it held last frame.
/// Returns the index of the buffer holding the result.
pub fn diffuse_velocity(
    ctx: &StepContext,
    viscosity: f32,
    iterations: u32,
    velocity: &VectorField,
    scratch: &mut PingPong<Vec2>,
) -> usize {
    assert_eq!(velocity.dimensions(), scratch.dimensions(), "viscous buffers must match the velocity grid");
    let weight = viscosity * ctx.dt;
    let norm = 1.0 / (4.0 * (1.0 + weight));

    for i in 0..iterations.max(1) {
        let (src, dst) = scratch.pass(i);
        write_cells(ctx, dst, |x, y| {
            let (xi, yi) = (x as i32, y as i32);
            let old = velocity.read(x, y);
            let sum = src.get_clamped(xi + STRIDE, yi)
                + src.get_clamped(xi - STRIDE, yi)
                + src.get_clamped(xi, yi + STRIDE)
                + src.get_clamped(xi, yi - STRIDE);
            (old * 4.0 + sum * weight) * norm
        });
    }

    scratch.last_written().unwrap_or(0)
}
