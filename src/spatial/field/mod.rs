//! GridField - dense row-major 2-D buffer of scalar or vector samples
//!
//! Addressed either by integer cell (x, y) or by normalized texture
//! coordinate in [0,1]² with edge clamping. Dimensions are fixed at
//! construction; a resize builds new fields instead of mutating old ones.

use std::ops::{Add, Mul};

use crate::core::Vec2;
use crate::domain::BufferPrecision;

mod indexing;
mod ping_pong;
mod sampling;

pub use ping_pong::PingPong;

/// Sample type a field can hold and filter bilinearly
pub trait FieldValue: Copy + Default + Add<Output = Self> + Mul<f32, Output = Self> {
    /// Round to what a buffer of `precision` would store
    fn quantize(self, precision: BufferPrecision) -> Self;
}

impl FieldValue for f32 {
    #[inline(always)]
    fn quantize(self, precision: BufferPrecision) -> Self {
        precision.store(self)
    }
}

impl FieldValue for Vec2 {
    #[inline(always)]
    fn quantize(self, precision: BufferPrecision) -> Self {
        Vec2::new(precision.store(self.x), precision.store(self.y))
    }
}

pub type ScalarField = GridField<f32>;
pub type VectorField = GridField<Vec2>;

#[derive(Clone, Debug)]
pub struct GridField<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: FieldValue> GridField<T> {
    /// Zero-filled field; each dimension is at least 1.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![T::default(); (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.cells.len() }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) { (self.width, self.height) }

    /// Size of one cell in texture coordinates
    #[inline]
    pub fn cell_scale(&self) -> Vec2 {
        Vec2::new(1.0 / self.width as f32, 1.0 / self.height as f32)
    }

    #[inline]
    pub fn cells(&self) -> &[T] { &self.cells }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [T] { &mut self.cells }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Sample at cell (x, y). Panics when the cell is outside the field.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> T {
        assert!(self.contains(x, y), "cell ({x}, {y}) outside {}x{} field", self.width, self.height);
        self.cells[self.index(x, y)]
    }

    /// Store at cell (x, y). Panics when the cell is outside the field.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        assert!(self.contains(x, y), "cell ({x}, {y}) outside {}x{} field", self.width, self.height);
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    /// Kernel read; callers iterate `0..width` x `0..height`
    #[inline(always)]
    pub(crate) fn read(&self, x: u32, y: u32) -> T {
        debug_assert!(self.contains(x, y));
        *fast!(self.cells, [self.index(x, y)])
    }

    /// Kernel write; callers iterate `0..width` x `0..height`
    #[inline(always)]
    pub(crate) fn write(&mut self, x: u32, y: u32, value: T) {
        debug_assert!(self.contains(x, y));
        let idx = self.index(x, y);
        fast!(self.cells, [idx] = value);
    }

    pub fn fill(&mut self, value: T) {
        self.cells.iter_mut().for_each(|c| *c = value);
    }

    pub fn same_shape<U>(&self, other: &GridField<U>) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl VectorField {
    /// Largest |v| over the field
    pub fn max_magnitude(&self) -> f32 {
        self.cells.iter().fold(0.0f32, |m, v| m.max(v.length()))
    }
}
