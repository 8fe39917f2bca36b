use super::*;

impl<T: FieldValue> GridField<T> {
    /// Bilinear sample at texture coordinate `uv`, clamp-to-edge.
    ///
    /// Cell centres sit at `(i + 0.5) / width`, so sampling exactly at a
    /// centre returns that cell unchanged.
    pub fn sample(&self, uv: Vec2) -> T {
        let (x0, x1, tx) = axis_taps(uv.x, self.width);
        let (y0, y1, ty) = axis_taps(uv.y, self.height);
        let w = self.width as usize;

        let c00 = *fast!(self.cells, [y0 * w + x0]);
        let c10 = *fast!(self.cells, [y0 * w + x1]);
        let c01 = *fast!(self.cells, [y1 * w + x0]);
        let c11 = *fast!(self.cells, [y1 * w + x1]);

        let top = c00 * (1.0 - tx) + c10 * tx;
        let bottom = c01 * (1.0 - tx) + c11 * tx;
        top * (1.0 - ty) + bottom * ty
    }
}

/// Two texel indices and the blend weight along one axis
#[inline(always)]
fn axis_taps(coord: f32, extent: u32) -> (usize, usize, f32) {
    let max = (extent - 1) as f32;
    let texel = coord * extent as f32 - 0.5;
    let texel = if texel.is_finite() { texel.clamp(0.0, max) } else { 0.0 };
    let i0 = texel.floor() as usize;
    let i1 = (i0 + 1).min(extent as usize - 1);
    (i0, i1, texel - i0 as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_samples_are_exact() {
        let mut f = ScalarField::new(4, 4);
        for (i, c) in f.cells_mut().iter_mut().enumerate() {
            *c = i as f32;
        }
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(f.sample(f.uv(x, y)), f.get(x, y));
            }
        }
    }

    #[test]
    fn midpoint_between_cells_blends() {
        let mut f = ScalarField::new(2, 1);
        f.set(0, 0, 0.0);
        f.set(1, 0, 2.0);
        assert!((f.sample(Vec2::new(0.5, 0.5)) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn outside_coordinates_clamp() {
        let mut f = VectorField::new(2, 2);
        f.set(0, 0, Vec2::new(1.0, 1.0));
        assert_eq!(f.sample(Vec2::new(-3.0, -3.0)), Vec2::new(1.0, 1.0));
        assert_eq!(f.sample(Vec2::new(f32::NAN, 0.0)), Vec2::new(1.0, 1.0));
    }
}
