use crate::domain::SimulationOptions;

use super::init::recomposite;
use super::perf_stats::PerfStats;
use super::EtherCore;

pub(super) fn enable_perf_metrics(core: &mut EtherCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &EtherCore) -> PerfStats {
    core.perf_stats.clone()
}

fn update_options(core: &mut EtherCore, f: impl FnOnce(&mut SimulationOptions)) {
    if core.disposed {
        return;
    }
    let mut options = *core.solver.options();
    f(&mut options);
    let (before_w, before_h) = core.solver.grid_dimensions();
    core.solver.set_options(options);
    core.config.simulation = *core.solver.options();
    if core.solver.grid_dimensions() != (before_w, before_h) {
        recomposite(core);
    }
}

pub(super) fn set_mouse_force(core: &mut EtherCore, force: f32) {
    update_options(core, |o| o.mouse_force = force);
}

pub(super) fn set_cursor_size(core: &mut EtherCore, size: f32) {
    update_options(core, |o| o.cursor_size = size);
}

pub(super) fn set_viscous(core: &mut EtherCore, enabled: bool, viscosity: f32) {
    update_options(core, |o| {
        o.is_viscous = enabled;
        o.viscosity = viscosity;
    });
}

pub(super) fn set_iterations(core: &mut EtherCore, viscous: u32, poisson: u32) {
    update_options(core, |o| {
        o.iterations_viscous = viscous;
        o.iterations_poisson = poisson;
    });
}

pub(super) fn set_bfecc(core: &mut EtherCore, enabled: bool) {
    update_options(core, |o| o.bfecc = enabled);
}

pub(super) fn set_resolution(core: &mut EtherCore, resolution: f32) {
    update_options(core, |o| o.resolution = resolution);
}

pub(super) fn set_auto_demo(core: &mut EtherCore, enabled: bool) {
    core.autopilot.set_enabled(enabled);
    core.config.autopilot = *core.autopilot.options();
}

pub(super) fn set_auto_speed(core: &mut EtherCore, speed: f32) {
    core.autopilot.set_speed(speed);
    core.config.autopilot = *core.autopilot.options();
}
