//! Simulation stages
//!
//! One step is a fixed pipeline of six kernels. Each kernel reads one set of
//! buffers and writes a different one; the pipeline order guarantees a
//! buffer has exactly one writer per step.
//!
//! Advection -> ExternalForce -> Viscous (optional) -> Divergence
//!           -> Poisson -> Pressure

use crate::core::Vec2;
use crate::domain::{BoundaryMode, BufferPrecision};

pub mod advection;
pub mod boundary;
pub mod divergence;
pub mod external_force;
pub mod poisson;
pub mod pressure;
pub mod viscous;

pub use advection::advect;
pub use divergence::compute_divergence;
pub use external_force::{apply_external_force, ForceSplat};
pub use poisson::solve_pressure;
pub use pressure::subtract_pressure_gradient;
pub use viscous::diffuse_velocity;

/// Per-step constants shared by every kernel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepContext {
    pub dt: f32,
    pub boundary: BoundaryMode,
    pub precision: BufferPrecision,
}

impl StepContext {
    pub fn new(dt: f32, boundary: BoundaryMode, precision: BufferPrecision) -> Self {
        Self { dt, boundary, precision }
    }

    /// `1/dt`, or zero for a non-positive step
    #[inline]
    pub fn inv_dt(&self) -> f32 {
        if self.dt > 0.0 { 1.0 / self.dt } else { 0.0 }
    }
}

/// The closed set of pipeline stages, in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Advection,
    ExternalForce,
    Viscous,
    Divergence,
    Poisson,
    Pressure,
}

impl Stage {
    pub const PIPELINE: [Stage; 6] = [
        Stage::Advection,
        Stage::ExternalForce,
        Stage::Viscous,
        Stage::Divergence,
        Stage::Poisson,
        Stage::Pressure,
    ];
}

/// Aspect correction so a trace step covers the same distance in x and y
#[inline]
pub fn aspect_ratio(width: u32, height: u32) -> Vec2 {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    let m = w.max(h);
    Vec2::new(m / w, m / h)
}
