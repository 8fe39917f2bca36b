use crate::core::Vec2;
use crate::spatial::{ScalarField, VectorField};

use super::boundary::write_cells;
use super::StepContext;

/// Make `velocity` divergence free: `v - ∇p · dt` into `dst`
pub fn subtract_pressure_gradient(
    ctx: &StepContext,
    pressure: &ScalarField,
    velocity: &VectorField,
    dst: &mut VectorField,
) {
    assert!(pressure.same_shape(dst) && velocity.same_shape(dst), "projection fields must share one grid");
    let dt = ctx.dt;
    write_cells(ctx, dst, |x, y| {
        let (xi, yi) = (x as i32, y as i32);
        let p0 = pressure.get_clamped(xi + 1, yi);
        let p1 = pressure.get_clamped(xi - 1, yi);
        let p2 = pressure.get_clamped(xi, yi + 1);
        let p3 = pressure.get_clamped(xi, yi - 1);
        let grad = Vec2::new(p0 - p1, p2 - p3) * 0.5;
        velocity.read(x, y) - grad * dt
    });
}
