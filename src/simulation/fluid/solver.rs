//! FluidSolver - owns the field set and runs the stage pipeline
//!
//! Grid size is derived from the viewport: `max(1, round(resolution * px))`
//! per axis. A resize replaces the whole field set at once, so no stage ever
//! sees buffers of mixed sizes.

use crate::core::Vec2;
use crate::domain::{BufferPrecision, SimulationOptions};
use crate::spatial::VectorField;
use crate::systems::stages::{
    advect, apply_external_force, compute_divergence, diffuse_velocity, solve_pressure,
    subtract_pressure_gradient, ForceSplat, Stage, StepContext,
};

use super::fields::FieldSet;
use super::PerfTimer;

/// Wall time of each stage in the last step, milliseconds
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageTimings {
    ms: [f64; 6],
}

impl StageTimings {
    #[inline]
    pub fn get(&self, stage: Stage) -> f64 {
        self.ms[stage as usize]
    }

    #[inline]
    fn record(&mut self, stage: Stage, ms: f64) {
        self.ms[stage as usize] = ms;
    }

    pub fn total(&self) -> f64 {
        self.ms.iter().sum()
    }
}

/// Cells along one grid axis at most
pub const MAX_GRID_AXIS: u32 = 4096;

/// Grid cells for a viewport of `width` x `height` pixels
pub fn grid_size(resolution: f32, width: u32, height: u32) -> (u32, u32) {
    let axis = |px: u32| {
        let cells = (resolution * px as f32).round();
        if cells.is_finite() && cells >= 1.0 { (cells.min(MAX_GRID_AXIS as f32)) as u32 } else { 1 }
    };
    (axis(width), axis(height))
}

#[derive(Clone, Debug)]
pub struct FluidSolver {
    options: SimulationOptions,
    precision: BufferPrecision,
    viewport: (u32, u32),
    fields: FieldSet,
    /// Viscous buffer feeding divergence/projection this step, if any
    viscous_out: Option<usize>,
    pressure_out: usize,
}

impl FluidSolver {
    pub fn new(options: SimulationOptions, precision: BufferPrecision, width: u32, height: u32) -> Self {
        let options = options.sanitized();
        let (gw, gh) = grid_size(options.resolution, width, height);
        Self {
            options,
            precision,
            viewport: (width, height),
            fields: FieldSet::new(gw, gh),
            viscous_out: None,
            pressure_out: 0,
        }
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Swap options. A changed resolution reallocates the grid.
    pub fn set_options(&mut self, options: SimulationOptions) {
        let resolution_changed = options.resolution != self.options.resolution;
        self.options = options.sanitized();
        if resolution_changed {
            let (w, h) = self.viewport;
            self.resize(w, h);
        }
    }

    pub fn precision(&self) -> BufferPrecision {
        self.precision
    }

    #[inline]
    pub fn grid_dimensions(&self) -> (u32, u32) {
        self.fields.dimensions()
    }

    /// `(1/w, 1/h)` of the grid
    #[inline]
    pub fn cell_scale(&self) -> Vec2 {
        self.fields.velocity().cell_scale()
    }

    pub fn velocity(&self) -> &VectorField {
        self.fields.velocity()
    }

    pub fn velocity_mut(&mut self) -> &mut VectorField {
        self.fields.velocity_mut()
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn context(&self) -> StepContext {
        StepContext::new(self.options.dt, self.options.boundary, self.precision)
    }

    /// Splat for a pointer sample with the current force / cursor settings
    pub fn splat_for(&self, coords: Vec2, diff: Vec2) -> ForceSplat {
        ForceSplat::from_pointer(
            coords,
            diff,
            self.options.mouse_force,
            self.options.cursor_size,
            self.cell_scale(),
        )
    }

    /// Re-derive the grid for a new viewport. Returns true when the buffers
    /// were reallocated (their contents start from rest).
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.viewport = (width, height);
        let (gw, gh) = grid_size(self.options.resolution, width, height);
        if (gw, gh) == self.fields.dimensions() {
            return false;
        }
        self.fields = FieldSet::new(gw, gh);
        self.viscous_out = None;
        self.pressure_out = 0;
        log::debug!("solver: grid {}x{} for viewport {}x{}", gw, gh, width, height);
        true
    }

    /// Bring the fluid to rest without touching the grid size
    pub fn clear(&mut self) {
        self.fields.clear();
        self.viscous_out = None;
        self.pressure_out = 0;
    }

    /// Release buffers down to a single cell
    pub fn release(&mut self) {
        self.fields = FieldSet::new(1, 1);
        self.viscous_out = None;
        self.pressure_out = 0;
    }

    /// One full simulation step. When `timings` is given each stage is timed.
    pub fn step(&mut self, splat: &ForceSplat, mut timings: Option<&mut StageTimings>) {
        let ctx = self.context();
        self.viscous_out = None;
        self.fields.viscous.reset_write_counts();
        self.fields.pressure.reset_write_counts();

        for stage in Stage::PIPELINE {
            if stage == Stage::Viscous && !self.options.is_viscous {
                continue;
            }
            match timings.as_deref_mut() {
                Some(t) => {
                    let t0 = PerfTimer::start();
                    self.run_stage(stage, &ctx, splat);
                    t.record(stage, t0.elapsed_ms());
                }
                None => self.run_stage(stage, &ctx, splat),
            }
        }
    }

    fn run_stage(&mut self, stage: Stage, ctx: &StepContext, splat: &ForceSplat) {
        let opts = self.options;
        let FieldSet { vel_0, vel_1, viscous, divergence, pressure } = &mut self.fields;

        match stage {
            Stage::Advection => {
                let src = &*vel_0;
                advect(ctx, src, src, opts.bfecc, vel_1);
            }
            Stage::ExternalForce => apply_external_force(ctx, splat, vel_1),
            Stage::Viscous => {
                let out = diffuse_velocity(ctx, opts.viscosity, opts.iterations_viscous, vel_1, viscous);
                self.viscous_out = Some(out);
            }
            Stage::Divergence => {
                let vel = match self.viscous_out {
                    Some(i) => viscous.buffer(i),
                    None => &*vel_1,
                };
                compute_divergence(ctx, vel, divergence);
            }
            Stage::Poisson => {
                self.pressure_out = solve_pressure(ctx, opts.iterations_poisson, divergence, pressure);
            }
            Stage::Pressure => {
                let vel = match self.viscous_out {
                    Some(i) => viscous.buffer(i),
                    None => &*vel_1,
                };
                subtract_pressure_gradient(ctx, pressure.buffer(self.pressure_out), vel, vel_0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BoundaryMode;

    fn solver(width: u32, height: u32) -> FluidSolver {
        FluidSolver::new(SimulationOptions::default(), BufferPrecision::Full, width, height)
    }

    #[test]
    fn grid_follows_resolution_and_never_collapses() {
        assert_eq!(grid_size(0.5, 800, 600), (400, 300));
        assert_eq!(grid_size(0.5, 1, 1), (1, 1));
        assert_eq!(grid_size(0.5, 3, 5), (2, 3));
        assert_eq!(grid_size(0.25, 0, 0), (1, 1));
    }

    #[test]
    fn oversized_requests_stay_allocatable() {
        assert_eq!(grid_size(1000.0, 1000, 1000), (MAX_GRID_AXIS, MAX_GRID_AXIS));
        assert_eq!(grid_size(1.0, 100_000, 10), (MAX_GRID_AXIS, 10));

        let mut s = solver(200, 100);
        s.set_options(SimulationOptions { resolution: 1000.0, ..*s.options() });
        assert_eq!(s.options().resolution, 1.0);
        assert_eq!(s.grid_dimensions(), (200, 100));
    }

    #[test]
    fn resize_reallocates_only_on_change() {
        let mut s = solver(100, 50);
        assert_eq!(s.grid_dimensions(), (50, 25));
        s.velocity_mut().fill(Vec2::new(1.0, 0.0));
        assert!(!s.resize(99, 50));
        assert_eq!(s.velocity().get(0, 0), Vec2::new(1.0, 0.0));

        assert!(s.resize(200, 40));
        assert_eq!(s.grid_dimensions(), (100, 20));
        assert_eq!(s.fields().divergence().dimensions(), (100, 20));
        assert_eq!(s.fields().pressure().dimensions(), (100, 20));
        assert_eq!(s.fields().viscous().dimensions(), (100, 20));
        assert!(s.velocity().cells().iter().all(|v| v.is_zero()));
    }

    #[test]
    fn step_counts_scratch_writes() {
        let mut s = solver(16, 16);
        let splat = s.splat_for(Vec2::ZERO, Vec2::new(0.1, 0.0));
        s.step(&splat, None);
        let [a, b] = s.fields().pressure().write_counts();
        assert_eq!(a + b, 32);
        let [a, b] = s.fields().viscous().write_counts();
        assert_eq!(a + b, 32);
    }

    #[test]
    fn inviscid_step_skips_viscous_buffers() {
        let options = SimulationOptions { is_viscous: false, ..SimulationOptions::default() };
        let mut s = FluidSolver::new(options, BufferPrecision::Full, 16, 16);
        let mut timings = StageTimings::default();
        let splat = s.splat_for(Vec2::ZERO, Vec2::new(0.1, 0.0));
        s.step(&splat, Some(&mut timings));
        assert_eq!(s.fields().viscous().write_counts(), [0, 0]);
        assert_eq!(timings.get(Stage::Viscous), 0.0);
        assert!(timings.total() >= 0.0);
    }

    #[test]
    fn bounded_walls_stay_still() {
        let options = SimulationOptions {
            boundary: BoundaryMode::Bounded,
            cursor_size: 10.0,
            ..SimulationOptions::default()
        };
        let mut s = FluidSolver::new(options, BufferPrecision::Full, 40, 40);
        let splat = s.splat_for(Vec2::new(-0.9, 0.0), Vec2::new(0.2, 0.1));
        s.step(&splat, None);
        let v = s.velocity();
        let (w, h) = v.dimensions();
        for x in 0..w {
            assert!(v.get(x, 0).is_zero() && v.get(x, h - 1).is_zero());
        }
        assert!(v.max_magnitude() > 0.0);
    }

    #[test]
    fn resolution_change_through_options_resizes() {
        let mut s = solver(100, 100);
        s.set_options(SimulationOptions { resolution: 0.25, ..*s.options() });
        assert_eq!(s.grid_dimensions(), (25, 25));
    }
}
