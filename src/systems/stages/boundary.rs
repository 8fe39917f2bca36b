//! Cell iteration honouring the boundary mode

use crate::domain::BoundaryMode;
use crate::spatial::{FieldValue, GridField};

use super::StepContext;

/// Overwrite every cell of `dst` with `kernel(x, y)`.
///
/// In `Bounded` mode the outer ring is written as zero instead. Every write
/// is rounded to the session's buffer precision.
#[inline]
pub fn write_cells<T, F>(ctx: &StepContext, dst: &mut GridField<T>, mut kernel: F)
where
    T: FieldValue,
    F: FnMut(u32, u32) -> T,
{
    let (w, h) = dst.dimensions();
    let bounded = ctx.boundary == BoundaryMode::Bounded;
    let precision = ctx.precision;
    for y in 0..h {
        for x in 0..w {
            let value = if bounded && dst.is_border(x, y) {
                T::default()
            } else {
                kernel(x, y).quantize(precision)
            };
            dst.write(x, y, value);
        }
    }
}
