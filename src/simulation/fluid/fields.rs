use crate::core::Vec2;
use crate::spatial::{PingPong, ScalarField, VectorField};

/// Every buffer one step touches, all of the same grid size
///
/// `vel_0` holds the divergence-free velocity between frames, `vel_1` the
/// advected + forced velocity inside a step.
#[derive(Clone, Debug)]
pub struct FieldSet {
    pub(crate) vel_0: VectorField,
    pub(crate) vel_1: VectorField,
    pub(crate) viscous: PingPong<Vec2>,
    pub(crate) divergence: ScalarField,
    pub(crate) pressure: PingPong<f32>,
}

impl FieldSet {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            vel_0: VectorField::new(width, height),
            vel_1: VectorField::new(width, height),
            viscous: PingPong::new(width, height),
            divergence: ScalarField::new(width, height),
            pressure: PingPong::new(width, height),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.vel_0.dimensions()
    }

    pub fn velocity(&self) -> &VectorField {
        &self.vel_0
    }

    pub fn velocity_mut(&mut self) -> &mut VectorField {
        &mut self.vel_0
    }

    pub fn divergence(&self) -> &ScalarField {
        &self.divergence
    }

    pub fn viscous(&self) -> &PingPong<Vec2> {
        &self.viscous
    }

    pub fn pressure(&self) -> &PingPong<f32> {
        &self.pressure
    }

    /// Approximate heap footprint of all buffers
    pub fn memory_bytes(&self) -> usize {
        let cells = self.vel_0.size();
        let vec = std::mem::size_of::<Vec2>();
        let scalar = std::mem::size_of::<f32>();
        cells * (vec * 4 + scalar * 3)
    }

    pub fn clear(&mut self) {
        self.vel_0.fill(Vec2::ZERO);
        self.vel_1.fill(Vec2::ZERO);
        self.viscous.clear();
        self.divergence.fill(0.0);
        self.pressure.clear();
    }
}
