//! Zero-cost field indexing
//!
//! Stage kernels touch every cell of every buffer several times per frame,
//! so indexing goes through `fast!`:
//! - Debug: ordinary bounds-checked indexing (panics with the bad index)
//! - Release: `get_unchecked` / `get_unchecked_mut`
//!
//! Callers are responsible for passing indices produced by
//! `GridField::index` / `GridField::clamped_index`, which are always in range.
//!
//! ```rust
//! use liquid_ether_engine::fast;
//!
//! let cells = vec![0.0f32, 0.5, 1.0];
//! let v = *fast!(cells, [1]);
//! assert_eq!(v, 0.5);
//!
//! let mut pressure = vec![0.0f32; 4];
//! fast!(pressure, [3] = 2.0);
//! assert_eq!(pressure[3], 2.0);
//! ```

/// Bounds-checked in debug builds, unchecked in release builds.
#[macro_export]
macro_rules! fast {
    // Read: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe {
                *$slice.get_unchecked_mut($index) = $val;
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::Vec2;

    #[test]
    fn reads_vector_cells() {
        let cells = vec![Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)];
        let v = *fast!(cells, [1]);
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 4.0);
    }

    #[test]
    fn writes_scalar_cells() {
        let mut cells = vec![0.0f32; 8];
        fast!(cells, [7] = -1.5);
        assert_eq!(cells[7], -1.5);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn out_of_range_panics_in_debug() {
        let cells = vec![0.0f32; 3];
        let _ = *fast!(cells, [3]);
    }
}
