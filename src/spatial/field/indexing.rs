use super::*;

impl<T: FieldValue> GridField<T> {
    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "index: out of bounds ({}, {}) for {}x{} field",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize) * (self.width as usize) + (x as usize)
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let x = (idx % self.width as usize) as u32;
        let y = (idx / self.width as usize) as u32;
        (x, y)
    }

    /// True for the outermost ring of cells
    #[inline]
    pub fn is_border(&self, x: u32, y: u32) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Index of (x, y) with each coordinate clamped into the field
    #[inline(always)]
    pub fn clamped_index(&self, x: i32, y: i32) -> usize {
        let cx = x.clamp(0, self.width as i32 - 1) as usize;
        let cy = y.clamp(0, self.height as i32 - 1) as usize;
        cy * (self.width as usize) + cx
    }

    /// Neighbour read with clamp-to-edge
    #[inline(always)]
    pub fn get_clamped(&self, x: i32, y: i32) -> T {
        *fast!(self.cells, [self.clamped_index(x, y)])
    }

    /// Texture coordinate of a cell centre
    #[inline]
    pub fn uv(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) / self.width as f32,
            (y as f32 + 0.5) / self.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_coords_round_trip() {
        let f = ScalarField::new(5, 3);
        assert_eq!(f.index(4, 2), 14);
        assert_eq!(f.coords(14), (4, 2));
    }

    #[test]
    fn clamped_reads_stick_to_edges() {
        let mut f = ScalarField::new(3, 2);
        f.set(0, 0, 1.0);
        f.set(2, 1, 9.0);
        assert_eq!(f.get_clamped(-5, -1), 1.0);
        assert_eq!(f.get_clamped(10, 10), 9.0);
    }

    #[test]
    fn degenerate_sizes_become_one_cell() {
        let f = VectorField::new(0, 0);
        assert_eq!(f.dimensions(), (1, 1));
        assert!(f.is_border(0, 0));
        assert_eq!(f.get_clamped(1, -1), Vec2::ZERO);
        assert_eq!(f.uv(0, 0), Vec2::new(0.5, 0.5));
    }
}
