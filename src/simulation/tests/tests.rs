use super::*;
use crate::core::Vec2;
use crate::domain::BufferPrecision;

fn quiet_core(width: f32, height: f32) -> EtherCore {
    let config = EngineConfig { auto_demo: false, ..EngineConfig::default() };
    EtherCore::with_config(&config, width, height, 1.0, 0.0, None)
}

#[test]
fn new_core_starts_at_rest_with_background_pixels() {
    let core = EtherCore::new(800.0, 600.0, 1.0, 0.0);
    assert_eq!((core.grid_width(), core.grid_height()), (400, 300));
    assert_eq!(core.pixels_len(), 400 * 300);
    // Default background is transparent black.
    assert!(core.pixels().iter().all(|p| *p == 0));
    assert_eq!(core.capabilities().precision, BufferPrecision::Full);
}

#[test]
fn ios_user_agent_selects_half_precision() {
    let core = EtherCore::with_config(
        &EngineConfig::default(),
        64.0,
        64.0,
        3.0,
        0.0,
        Some("Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)"),
    );
    assert_eq!(core.capabilities().precision, BufferPrecision::Half);
    assert_eq!(core.viewport().pixel_ratio, MAX_PIXEL_RATIO);
}

#[test]
fn hidden_document_suspends_frames() {
    let mut core = quiet_core(64.0, 64.0);
    assert!(core.start());
    assert!(core.frame(16.0));
    assert_eq!(core.frame_count(), 1);

    assert!(!core.set_document_hidden(true));
    assert!(!core.frame(32.0));
    assert_eq!(core.frame_count(), 1);

    assert!(core.set_document_hidden(false));
    assert!(core.frame(48.0));
    assert_eq!(core.frame_count(), 2);
}

#[test]
fn offscreen_surface_suspends_frames() {
    let mut core = quiet_core(64.0, 64.0);
    core.start();
    assert!(!core.set_intersecting(false));
    assert!(!core.frame(16.0));
    assert!(core.set_intersecting(true));
    assert!(!core.set_intersecting(true));
}

#[test]
fn resize_rebuilds_grid_and_pixels_together() {
    let mut core = quiet_core(800.0, 600.0);
    assert!(core.resize(200.0, 100.0, 1.0));
    assert_eq!((core.grid_width(), core.grid_height()), (100, 50));
    assert_eq!(core.pixels_len(), 100 * 50);
    assert_eq!(core.pointer().surface().width, 200.0);

    assert!(!core.resize(200.4, 100.9, 1.0));
    assert!(core.resize(0.0, 0.0, 1.0));
    assert_eq!((core.grid_width(), core.grid_height()), (1, 1));
    core.step(16.0);
    assert_eq!(core.pixels_len(), 1);
}

#[test]
fn pointer_outside_surface_is_not_an_interaction() {
    let mut core = quiet_core(100.0, 100.0);
    assert!(!core.pointer_move(150.0, 50.0, 500.0));
    assert_eq!(core.last_interaction_ms(), 0.0);
    assert!(core.pointer_down(50.0, 50.0, 600.0));
    assert_eq!(core.last_interaction_ms(), 600.0);
    core.pointer_up(true);
    assert!(!core.pointer().is_hover_inside());
}

#[test]
fn mouse_release_keeps_hover_and_parks_the_demo() {
    let config = EngineConfig { auto_demo: true, ..EngineConfig::default() };
    let mut core = EtherCore::with_config(&config, 100.0, 100.0, 1.0, 0.0, None);
    assert!(core.pointer_down(50.0, 50.0, 100.0));
    core.pointer_up(false);
    assert!(core.pointer().is_hover_inside());

    core.step(100.0 + 5000.0);
    assert!(!core.autopilot().is_active());

    core.pointer_leave();
    core.step(100.0 + 5016.0);
    assert!(core.autopilot().is_active());
}

#[test]
fn lifted_touch_lets_the_demo_resume() {
    let mut core = EtherCore::new(100.0, 100.0, 1.0, 0.0);
    assert!(core.pointer_down(50.0, 50.0, 100.0));
    core.pointer_up(true);
    core.step(100.0 + 3000.0);
    assert!(core.autopilot().is_active());
}

#[test]
fn clock_restarts_after_suspension() {
    let mut core = quiet_core(64.0, 64.0);
    core.enable_perf_metrics(true);
    core.start();
    assert!(core.frame(16.0));
    assert!(core.frame(32.0));
    assert!((core.get_perf_stats().frame_interval_ms() - 16.0).abs() < 1e-9);

    core.set_document_hidden(true);
    assert!(core.set_document_hidden(false));
    assert!(core.frame(60_000.0));
    assert_eq!(core.clock().delta(), 0.0);
    assert_eq!(core.get_perf_stats().frame_interval_ms(), 0.0);

    assert!(core.frame(60_016.0));
    assert!((core.get_perf_stats().frame_interval_ms() - 16.0).abs() < 1e-9);
}

#[test]
fn surface_rect_offsets_pointer_mapping() {
    let mut core = quiet_core(100.0, 100.0);
    core.set_surface_rect(50.0, 20.0, 100.0, 100.0);
    assert!(!core.pointer_move(10.0, 10.0, 1.0));
    assert!(core.pointer_move(100.0, 70.0, 2.0));
    assert_eq!(core.pointer().coords(), Vec2::ZERO);
}

#[test]
fn reset_returns_to_rest() {
    let mut core = quiet_core(80.0, 80.0);
    core.pointer_move(40.0, 40.0, 0.0);
    core.step(16.0);
    core.pointer_move(60.0, 40.0, 20.0);
    core.step(32.0);
    assert!(core.solver().velocity().max_magnitude() > 0.0);

    core.reset(100.0);
    assert_eq!(core.frame_count(), 0);
    assert_eq!(core.solver().velocity().max_magnitude(), 0.0);
    assert_eq!(core.pointer().coords(), Vec2::ZERO);
    assert_eq!(core.last_interaction_ms(), 100.0);
    assert!(core.pixels().iter().all(|p| *p == 0));
}

#[test]
fn dispose_releases_and_stops() {
    let mut core = quiet_core(64.0, 64.0);
    core.start();
    core.dispose();
    assert!(core.is_disposed());
    assert_eq!(core.pixels_len(), 0);
    assert!(!core.frame(16.0));
    assert!(!core.set_document_hidden(false));
    assert!(!core.pointer_move(10.0, 10.0, 16.0));
    assert!(!core.resize(200.0, 200.0, 1.0));
    core.step(32.0);
    assert_eq!(core.frame_count(), 0);
}

#[test]
fn perf_metrics_cover_every_stage() {
    let mut core = quiet_core(64.0, 32.0);
    core.enable_perf_metrics(true);
    core.step(16.0);
    let stats = core.get_perf_stats();
    assert_eq!(stats.grid_cells(), 32 * 16);
    assert_eq!(stats.pressure_writes(), 32);
    assert_eq!(stats.viscous_writes(), 32);
    assert_eq!(stats.frame(), 1);
    assert!(stats.frame_ms() >= 0.0);
    assert!(stats.memory_bytes() > 0);

    core.enable_perf_metrics(false);
    assert_eq!(core.get_perf_stats(), PerfStats::default());
}

#[test]
fn settings_are_sanitized_and_applied() {
    let mut core = quiet_core(100.0, 100.0);
    core.set_iterations(0, 4);
    assert_eq!(core.solver().options().iterations_viscous, 1);
    assert_eq!(core.solver().options().iterations_poisson, 4);

    core.set_mouse_force(-3.0);
    assert_eq!(core.solver().options().mouse_force, 0.0);

    core.set_resolution(0.25);
    assert_eq!((core.grid_width(), core.grid_height()), (25, 25));
    assert_eq!(core.pixels_len(), 25 * 25);
    assert_eq!(core.config().simulation.resolution, 0.25);

    core.set_resolution(1000.0);
    assert_eq!((core.grid_width(), core.grid_height()), (100, 100));
    assert_eq!(core.config().simulation.resolution, 1.0);

    core.set_auto_speed(f32::NAN);
    assert_eq!(core.autopilot().options().speed, 0.5);
}

#[test]
fn disabled_autopilot_never_drives() {
    let mut core = quiet_core(100.0, 100.0);
    for i in 1..=300 {
        core.step(i as f64 * 16.0);
    }
    assert!(!core.autopilot().is_active());
    assert!(!core.pointer().is_auto_active());

    core.set_auto_demo(true);
    core.step(5000.0);
    assert!(core.autopilot().is_active());
}
