//! EtherCore - one running fluid background session
//!
//! Owns every piece of mutable state: solver buffers, pointer and autopilot
//! state, clock, scheduler and the output pixels. Nothing here is global;
//! the wasm facade wraps exactly one core.
//!
//! Per frame: autopilot -> pointer -> clock -> stages -> compositor.

use crate::domain::{Capabilities, EngineConfig, ResolvedConfig};
use crate::systems::compositor::Compositor;
use crate::systems::input::{AutoPilotDriver, PointerTracker, SurfaceRect};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "fluid/fields.rs"]
mod fields;
#[path = "fluid/solver.rs"]
mod solver;
#[path = "clock/frame_clock.rs"]
mod frame_clock;
#[path = "schedule/scheduler.rs"]
mod scheduler;
#[path = "init/viewport.rs"]
mod viewport;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "step/step.rs"]
mod step;
mod facade;

pub use facade::LiquidEther;
pub use fields::FieldSet;
pub use frame_clock::FrameClock;
pub use perf_stats::PerfStats;
pub use scheduler::FrameScheduler;
pub use solver::{grid_size, FluidSolver, StageTimings, MAX_GRID_AXIS};
pub use viewport::{Viewport, MAX_PIXEL_RATIO};

use perf_timer::PerfTimer;

pub struct EtherCore {
    config: ResolvedConfig,
    capabilities: Capabilities,
    viewport: Viewport,
    solver: FluidSolver,
    compositor: Compositor,
    /// Packed ABGR, one per grid cell, top row first
    pixels: Vec<u32>,
    pointer: PointerTracker,
    autopilot: AutoPilotDriver,
    clock: FrameClock,
    scheduler: FrameScheduler,
    last_interaction_ms: f64,
    frame: u64,
    disposed: bool,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl EtherCore {
    /// Session with the default configuration
    pub fn new(width: f32, height: f32, pixel_ratio: f32, now_ms: f64) -> Self {
        Self::with_config(&EngineConfig::default(), width, height, pixel_ratio, now_ms, None)
    }

    /// `user_agent` feeds the precision fallback; `None` means a desktop host.
    pub fn with_config(
        config: &EngineConfig,
        width: f32,
        height: f32,
        pixel_ratio: f32,
        now_ms: f64,
        user_agent: Option<&str>,
    ) -> Self {
        let viewport = Viewport::from_css(width, height, pixel_ratio);
        init::create_ether_core(config, viewport, now_ms, user_agent)
    }

    pub fn from_config_json(
        json: &str,
        width: f32,
        height: f32,
        pixel_ratio: f32,
        now_ms: f64,
        user_agent: Option<&str>,
    ) -> Result<Self, String> {
        let config = EngineConfig::from_json(json)?;
        Ok(Self::with_config(&config, width, height, pixel_ratio, now_ms, user_agent))
    }

    // === Lifecycle ===

    /// Start the frame loop. Returns true when the host must request a frame.
    pub fn start(&mut self) -> bool {
        self.scheduler.start()
    }

    /// Run one frame if the loop is live. Returns true when the host must
    /// request another frame.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.scheduler.begin_frame() {
            return false;
        }
        if self.scheduler.take_resumed() {
            self.clock.resume(now_ms);
        }
        step::run_frame(self, now_ms);
        self.scheduler.end_frame()
    }

    /// Run the frame body unconditionally (ignores the scheduler)
    pub fn step(&mut self, now_ms: f64) {
        if self.disposed {
            return;
        }
        step::run_frame(self, now_ms);
    }

    pub fn reset(&mut self, now_ms: f64) {
        init::reset(self, now_ms);
    }

    pub fn dispose(&mut self) {
        init::dispose(self);
    }

    pub fn is_disposed(&self) -> bool { self.disposed }

    // === Host signals ===

    pub fn set_document_hidden(&mut self, hidden: bool) -> bool {
        self.scheduler.set_document_hidden(hidden)
    }

    pub fn set_intersecting(&mut self, intersecting: bool) -> bool {
        self.scheduler.set_intersecting(intersecting)
    }

    /// New viewport size. Buffers are rebuilt before this returns; true when
    /// the grid changed.
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) -> bool {
        init::resize(self, Viewport::from_css(width, height, pixel_ratio))
    }

    /// Bounding box of the surface in the coordinates pointer events use
    pub fn set_surface_rect(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.pointer.set_surface(SurfaceRect::new(left, top, width, height));
    }

    // === Input ===

    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        commands::pointer_move(self, x, y, now_ms)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        commands::pointer_down(self, x, y, now_ms)
    }

    /// Pointer released. A lifted touch also leaves the surface; a mouse
    /// button release keeps hovering.
    pub fn pointer_up(&mut self, touch: bool) {
        commands::pointer_up(self, touch);
    }

    pub fn pointer_leave(&mut self) {
        commands::pointer_leave(self);
    }

    // === Settings ===

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last frame's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_mouse_force(&mut self, force: f32) {
        settings::set_mouse_force(self, force);
    }

    pub fn set_cursor_size(&mut self, size: f32) {
        settings::set_cursor_size(self, size);
    }

    pub fn set_viscous(&mut self, enabled: bool, viscosity: f32) {
        settings::set_viscous(self, enabled, viscosity);
    }

    pub fn set_iterations(&mut self, viscous: u32, poisson: u32) {
        settings::set_iterations(self, viscous, poisson);
    }

    pub fn set_bfecc(&mut self, enabled: bool) {
        settings::set_bfecc(self, enabled);
    }

    pub fn set_resolution(&mut self, resolution: f32) {
        settings::set_resolution(self, resolution);
    }

    pub fn set_auto_demo(&mut self, enabled: bool) {
        settings::set_auto_demo(self, enabled);
    }

    pub fn set_auto_speed(&mut self, speed: f32) {
        settings::set_auto_speed(self, speed);
    }

    // === Accessors ===

    pub fn config(&self) -> &ResolvedConfig { &self.config }

    pub fn capabilities(&self) -> Capabilities { self.capabilities }

    pub fn viewport(&self) -> Viewport { self.viewport }

    pub fn solver(&self) -> &FluidSolver { &self.solver }

    pub fn pointer(&self) -> &PointerTracker { &self.pointer }

    pub fn autopilot(&self) -> &AutoPilotDriver { &self.autopilot }

    pub fn clock(&self) -> &FrameClock { &self.clock }

    pub fn scheduler(&self) -> &FrameScheduler { &self.scheduler }

    pub fn last_interaction_ms(&self) -> f64 { self.last_interaction_ms }

    pub fn frame_count(&self) -> u64 { self.frame }

    pub fn grid_width(&self) -> u32 { self.solver.grid_dimensions().0 }

    pub fn grid_height(&self) -> u32 { self.solver.grid_dimensions().1 }

    pub fn pixels(&self) -> &[u32] { &self.pixels }

    /// Get pointer to the pixel buffer (for JS `ImageData` upload)
    pub fn pixels_ptr(&self) -> *const u32 { self.pixels.as_ptr() }

    /// Pixel count (not bytes)
    pub fn pixels_len(&self) -> usize { self.pixels.len() }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
