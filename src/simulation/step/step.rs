use super::init::recomposite;
use super::solver::StageTimings;
use super::{EtherCore, PerfTimer};

pub(super) fn run_frame(core: &mut EtherCore, now_ms: f64) {
    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.reset();
    }
    let frame_start = if perf_on { Some(PerfTimer::start()) } else { None };

    // === INPUT ===
    // Autopilot writes the pointer before the pointer computes this frame's diff.
    let input_start = if perf_on { Some(PerfTimer::start()) } else { None };
    core.autopilot.update(&mut core.pointer, core.last_interaction_ms, now_ms);
    core.pointer.update(now_ms);
    core.clock.tick(now_ms);
    let splat = core.solver.splat_for(core.pointer.coords(), core.pointer.diff());
    if let Some(t0) = input_start {
        core.perf_stats.input_ms = t0.elapsed_ms();
    }

    // === STAGES ===
    if perf_on {
        let mut timings = StageTimings::default();
        core.solver.step(&splat, Some(&mut timings));
        core.perf_stats.record_stages(&timings);
    } else {
        core.solver.step(&splat, None);
    }

    // === COMPOSITE ===
    if perf_on {
        let ((), ms) = PerfTimer::measure(|| recomposite(core));
        core.perf_stats.composite_ms = ms;
    } else {
        recomposite(core);
    }

    core.frame += 1;

    if let Some(t0) = frame_start {
        let (w, h) = core.solver.grid_dimensions();
        let fields = core.solver.fields();
        let [va, vb] = fields.viscous().write_counts();
        let [pa, pb] = fields.pressure().write_counts();
        let stats = &mut core.perf_stats;
        stats.grid_width = w;
        stats.grid_height = h;
        stats.grid_cells = w.saturating_mul(h);
        stats.viscous_writes = va + vb;
        stats.pressure_writes = pa + pb;
        stats.max_velocity = fields.velocity().max_magnitude();
        stats.memory_bytes = fields.memory_bytes().min(u32::MAX as usize) as u32;
        stats.frame = core.frame.min(u32::MAX as u64) as u32;
        stats.frame_interval_ms = core.clock.delta() * 1000.0;
        stats.frame_ms = t0.elapsed_ms();
    }
}
