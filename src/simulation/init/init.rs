use crate::core::Xorshift32;
use crate::domain::{Capabilities, EngineConfig, Palette, ResolvedConfig};
use crate::systems::compositor::Compositor;
use crate::systems::input::{AutoPilotDriver, PointerTracker, SurfaceRect};

use super::frame_clock::FrameClock;
use super::perf_stats::PerfStats;
use super::scheduler::FrameScheduler;
use super::solver::FluidSolver;
use super::viewport::Viewport;
use super::EtherCore;

pub(super) fn create_ether_core(
    config: &EngineConfig,
    viewport: Viewport,
    now_ms: f64,
    user_agent: Option<&str>,
) -> EtherCore {
    let config = config.resolve();
    let capabilities = Capabilities::resolve(config.precision, user_agent);
    let solver = FluidSolver::new(
        config.simulation,
        capabilities.precision,
        viewport.width,
        viewport.height,
    );
    let compositor = Compositor::new(
        Palette::from_stops(&config.colors),
        Compositor::background_from_hex(&config.background_color, config.background_alpha),
    );
    let surface = SurfaceRect::new(0.0, 0.0, viewport.width as f32, viewport.height as f32);
    let pointer = PointerTracker::new(surface, config.takeover_duration_s, config.autopilot.intensity);
    let autopilot = AutoPilotDriver::new(config.autopilot, session_seed(&config, now_ms), now_ms);

    let (gw, gh) = solver.grid_dimensions();
    log::info!(
        "liquid ether: viewport {}x{} @{}x, grid {}x{}, {:?} precision",
        viewport.width,
        viewport.height,
        viewport.pixel_ratio,
        gw,
        gh,
        capabilities.precision
    );

    let mut core = EtherCore {
        config,
        capabilities,
        viewport,
        solver,
        compositor,
        pixels: Vec::new(),
        pointer,
        autopilot,
        clock: FrameClock::new(now_ms),
        scheduler: FrameScheduler::new(),
        // Start counting idle time at creation, so the demo waits a full delay.
        last_interaction_ms: now_ms,
        frame: 0,
        disposed: false,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    };
    recomposite(&mut core);
    core
}

fn session_seed(config: &ResolvedConfig, now_ms: f64) -> u32 {
    config.seed.unwrap_or_else(|| Xorshift32::seed_from_time(now_ms))
}

/// Back to rest: still fluid, fresh pointer and autopilot, zero frames.
pub(super) fn reset(core: &mut EtherCore, now_ms: f64) {
    if core.disposed {
        return;
    }
    core.solver.clear();
    core.pointer.reset();
    core.autopilot = AutoPilotDriver::new(*core.autopilot.options(), session_seed(&core.config, now_ms), now_ms);
    core.clock = FrameClock::new(now_ms);
    core.last_interaction_ms = now_ms;
    core.frame = 0;
    core.perf_stats.reset();
    recomposite(core);
    log::debug!("liquid ether: reset");
}

pub(super) fn resize(core: &mut EtherCore, viewport: Viewport) -> bool {
    if core.disposed {
        return false;
    }
    core.viewport = viewport;
    let surface = core.pointer.surface();
    core.pointer.set_surface(SurfaceRect::new(
        surface.left,
        surface.top,
        viewport.width as f32,
        viewport.height as f32,
    ));
    let changed = core.solver.resize(viewport.width, viewport.height);
    if changed {
        recomposite(core);
    }
    changed
}

/// Release buffers and withdraw from the frame loop for good.
pub(super) fn dispose(core: &mut EtherCore) {
    if core.disposed {
        return;
    }
    core.disposed = true;
    core.scheduler.stop();
    core.solver.release();
    core.pixels = Vec::new();
    log::info!("liquid ether: disposed after {} frames", core.frame);
}

/// Redraw the output from the current velocity (sizes `pixels` to the grid)
pub(super) fn recomposite(core: &mut EtherCore) {
    core.compositor.composite(core.solver.velocity(), &mut core.pixels);
}
