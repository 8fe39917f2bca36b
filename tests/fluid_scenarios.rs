use liquid_ether_engine::core::Vec2;
use liquid_ether_engine::domain::{BufferPrecision, SimulationOptions};
use liquid_ether_engine::simulation::FluidSolver;
use liquid_ether_engine::{EngineConfig, EtherCore};

fn core_without_demo(width: f32, height: f32) -> EtherCore {
    let config = EngineConfig { auto_demo: false, ..EngineConfig::default() };
    EtherCore::with_config(&config, width, height, 1.0, 0.0, None)
}

#[test]
fn centre_impulse_peaks_near_centre() {
    let mut core = core_without_demo(800.0, 600.0);
    assert_eq!((core.grid_width(), core.grid_height()), (400, 300));

    core.pointer_move(400.0, 300.0, 0.0);
    core.step(16.0);
    core.pointer_move(410.0, 300.0, 20.0);
    core.step(32.0);

    let velocity = core.solver().velocity();
    let (w, h) = velocity.dimensions();
    let mut best = (0u32, 0u32, 0.0f32);
    for y in 0..h {
        for x in 0..w {
            let m = velocity.get(x, y).length();
            if m > best.2 {
                best = (x, y, m);
            }
        }
    }
    let (bx, by, peak) = best;
    assert!(peak > 0.0);
    assert!((bx as i32 - 200).abs() < 60, "peak at x={bx}");
    assert!((by as i32 - 150).abs() < 45, "peak at y={by}");

    for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        assert!(velocity.get(x, y).length() < 1e-4, "corner ({x},{y}) moved");
    }
}

#[test]
fn every_grid_size_keeps_its_shape() {
    let sizes = [(1, 1), (1, 7), (7, 1), (2, 2), (3, 5), (16, 9)];
    for (w, h) in sizes {
        let options = SimulationOptions { resolution: 1.0, ..SimulationOptions::default() };
        let mut solver = FluidSolver::new(options, BufferPrecision::Full, w, h);
        assert_eq!(solver.grid_dimensions(), (w, h));
        let splat = solver.splat_for(Vec2::new(0.3, -0.2), Vec2::new(0.05, 0.02));
        for _ in 0..3 {
            solver.step(&splat, None);
        }
        assert_eq!(solver.grid_dimensions(), (w, h));
        assert_eq!(solver.velocity().size(), (w * h) as usize);
        assert!(solver.velocity().cells().iter().all(|v| v.x.is_finite() && v.y.is_finite()));
    }
}

#[test]
fn half_precision_session_stays_finite() {
    let config = EngineConfig { auto_demo: false, ..EngineConfig::default() };
    let mut core = EtherCore::with_config(&config, 120.0, 80.0, 1.0, 0.0, Some("iPhone"));
    core.pointer_move(60.0, 40.0, 0.0);
    for i in 1..10 {
        core.pointer_move(60.0 + i as f32 * 4.0, 40.0, i as f64 * 16.0 - 4.0);
        core.step(i as f64 * 16.0);
    }
    let v = core.solver().velocity();
    assert!(v.max_magnitude() > 0.0);
    assert!(v.cells().iter().all(|c| c.x.is_finite() && c.y.is_finite()));
}

#[test]
fn autopilot_wakes_after_resume_delay() {
    let mut core = EtherCore::new(400.0, 300.0, 1.0, 0.0);
    let mut now = 0.0;
    while now < 2990.0 {
        now += 16.0;
        core.step(now);
        assert!(!core.autopilot().is_active(), "active early at {now}");
    }
    core.step(3000.0);
    assert!(core.autopilot().is_active());
    assert!(core.pointer().is_auto_active());

    // Keeps moving towards its waypoint once the ramp is under way.
    let mut last = core.autopilot().distance_to_target();
    for i in 1..=20 {
        core.step(3000.0 + i as f64 * 16.0);
        let d = core.autopilot().distance_to_target();
        if d > last {
            // Only a fresh waypoint may increase the distance.
            assert!(last < 0.02);
        }
        last = d;
    }
    assert_ne!(core.pointer().coords(), Vec2::ZERO);
}

#[test]
fn user_move_takes_over_from_autopilot() {
    let mut core = EtherCore::new(400.0, 300.0, 1.0, 0.0);
    let mut now = 3000.0;
    core.step(now);
    for _ in 0..30 {
        now += 16.0;
        core.step(now);
    }
    assert!(core.pointer().is_auto_active());
    let from = core.pointer().coords();

    assert!(core.pointer_move(400.0, 0.0, now));
    assert!(core.pointer().has_user_control());
    assert!(core.pointer().is_takeover_active());
    assert!(core.pointer().is_auto_active());
    assert!(!core.autopilot().is_active());

    core.step(now);
    assert_eq!(core.pointer().coords(), from);

    core.step(now + 125.0);
    assert!(core.pointer().is_auto_active());

    core.step(now + 250.0);
    assert_eq!(core.pointer().coords(), Vec2::new(1.0, 1.0));
    assert_eq!(core.pointer().diff(), Vec2::ZERO);
    assert!(!core.pointer().is_auto_active());
    assert!(!core.pointer().is_takeover_active());

    // Hovering keeps the demo parked long after the delay.
    core.step(now + 10_000.0);
    assert!(!core.autopilot().is_active());
}
