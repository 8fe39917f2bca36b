use wasm_bindgen::prelude::*;

use crate::systems::stages::Stage;

use super::solver::StageTimings;

/// Snapshot of the last frame (zeros while metrics are off)
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) frame_ms: f64,
    /// Host time since the previous frame (0 on the first frame after a suspension)
    pub(super) frame_interval_ms: f64,
    pub(super) input_ms: f64,
    pub(super) advection_ms: f64,
    pub(super) force_ms: f64,
    pub(super) viscous_ms: f64,
    pub(super) divergence_ms: f64,
    pub(super) poisson_ms: f64,
    pub(super) pressure_ms: f64,
    pub(super) composite_ms: f64,
    pub(super) grid_width: u32,
    pub(super) grid_height: u32,
    pub(super) grid_cells: u32,
    pub(super) viscous_writes: u32,
    pub(super) pressure_writes: u32,
    pub(super) max_velocity: f32,
    pub(super) memory_bytes: u32,
    pub(super) frame: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    pub(super) fn record_stages(&mut self, t: &StageTimings) {
        self.advection_ms = t.get(Stage::Advection);
        self.force_ms = t.get(Stage::ExternalForce);
        self.viscous_ms = t.get(Stage::Viscous);
        self.divergence_ms = t.get(Stage::Divergence);
        self.poisson_ms = t.get(Stage::Poisson);
        self.pressure_ms = t.get(Stage::Pressure);
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn frame_ms(&self) -> f64 { self.frame_ms }
    #[wasm_bindgen(getter)]
    pub fn frame_interval_ms(&self) -> f64 { self.frame_interval_ms }
    #[wasm_bindgen(getter)]
    pub fn input_ms(&self) -> f64 { self.input_ms }
    #[wasm_bindgen(getter)]
    pub fn advection_ms(&self) -> f64 { self.advection_ms }
    #[wasm_bindgen(getter)]
    pub fn force_ms(&self) -> f64 { self.force_ms }
    #[wasm_bindgen(getter)]
    pub fn viscous_ms(&self) -> f64 { self.viscous_ms }
    #[wasm_bindgen(getter)]
    pub fn divergence_ms(&self) -> f64 { self.divergence_ms }
    #[wasm_bindgen(getter)]
    pub fn poisson_ms(&self) -> f64 { self.poisson_ms }
    #[wasm_bindgen(getter)]
    pub fn pressure_ms(&self) -> f64 { self.pressure_ms }
    #[wasm_bindgen(getter)]
    pub fn composite_ms(&self) -> f64 { self.composite_ms }
    #[wasm_bindgen(getter)]
    pub fn grid_width(&self) -> u32 { self.grid_width }
    #[wasm_bindgen(getter)]
    pub fn grid_height(&self) -> u32 { self.grid_height }
    #[wasm_bindgen(getter)]
    pub fn grid_cells(&self) -> u32 { self.grid_cells }
    #[wasm_bindgen(getter)]
    pub fn viscous_writes(&self) -> u32 { self.viscous_writes }
    #[wasm_bindgen(getter)]
    pub fn pressure_writes(&self) -> u32 { self.pressure_writes }
    #[wasm_bindgen(getter)]
    pub fn max_velocity(&self) -> f32 { self.max_velocity }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u32 { self.frame }
}
