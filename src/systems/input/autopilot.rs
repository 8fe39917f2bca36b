//! AutoPilotDriver - synthetic pointer motion while nobody is interacting
//!
//! Idle while disabled, while the user interacted within `resume_delay_ms`,
//! or while the pointer hovers the surface. Otherwise Active: glide towards
//! a random waypoint, easing in over `ramp_duration_s` after activation.
//! Leaving Active is immediate (no deceleration).

use crate::core::{smoothstep, Vec2, Xorshift32};
use crate::domain::AutoPilotOptions;

use super::pointer::PointerTracker;

/// Waypoint counts as reached below this distance (normalized units)
pub const ARRIVAL_EPSILON: f32 = 0.01;

/// Frame gaps longer than this (seconds) are treated as one nominal frame
const MAX_FRAME_GAP_S: f32 = 0.2;
const NOMINAL_FRAME_S: f32 = 0.016;

/// What a single `update` did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoPilotStep {
    Disabled,
    Idle,
    /// Waypoint reached, a new one was picked, no movement this frame
    Retargeted,
    Moved,
}

#[derive(Clone, Debug)]
pub struct AutoPilotDriver {
    options: AutoPilotOptions,
    active: bool,
    current: Vec2,
    target: Vec2,
    activation_ms: f64,
    last_update_ms: f64,
    rng: Xorshift32,
}

impl AutoPilotDriver {
    pub fn new(options: AutoPilotOptions, seed: u32, now_ms: f64) -> Self {
        let mut driver = Self {
            options: options.sanitized(),
            active: false,
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            activation_ms: 0.0,
            last_update_ms: now_ms,
            rng: Xorshift32::new(seed),
        };
        driver.pick_new_target();
        driver
    }

    pub fn options(&self) -> &AutoPilotOptions {
        &self.options
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.options.enabled = enabled;
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.options = AutoPilotOptions { speed, ..self.options }.sanitized();
    }

    #[inline]
    pub fn is_active(&self) -> bool { self.active }

    #[inline]
    pub fn current(&self) -> Vec2 { self.current }

    #[inline]
    pub fn target(&self) -> Vec2 { self.target }

    #[inline]
    pub fn distance_to_target(&self) -> f32 {
        self.current.distance(self.target)
    }

    /// Uniform waypoint inside the inset square `[-(1-margin), 1-margin]²`
    pub fn pick_new_target(&mut self) {
        let extent = 1.0 - self.options.margin;
        self.target = Vec2::new(self.rng.next_signed() * extent, self.rng.next_signed() * extent);
    }

    /// Drop to Idle right away and hand the pointer back.
    pub fn force_stop(&mut self, pointer: &mut PointerTracker) {
        self.active = false;
        pointer.end_auto();
    }

    pub fn update(
        &mut self,
        pointer: &mut PointerTracker,
        last_interaction_ms: f64,
        now_ms: f64,
    ) -> AutoPilotStep {
        if !self.options.enabled {
            if self.active {
                self.force_stop(pointer);
            }
            return AutoPilotStep::Disabled;
        }
        if now_ms - last_interaction_ms < self.options.resume_delay_ms || pointer.is_hover_inside() {
            if self.active {
                self.force_stop(pointer);
            }
            return AutoPilotStep::Idle;
        }

        if !self.active {
            self.active = true;
            self.current = pointer.coords();
            self.last_update_ms = now_ms;
            self.activation_ms = now_ms;
            pointer.begin_auto();
            log::debug!("autopilot: active from ({:.3}, {:.3})", self.current.x, self.current.y);
        }

        let mut dt = ((now_ms - self.last_update_ms) / 1000.0) as f32;
        self.last_update_ms = now_ms;
        if dt > MAX_FRAME_GAP_S {
            dt = NOMINAL_FRAME_S;
        }
        let dt = dt.max(0.0);

        let to_target = self.target - self.current;
        let dist = to_target.length();
        if dist < ARRIVAL_EPSILON {
            self.pick_new_target();
            return AutoPilotStep::Retargeted;
        }

        let ramp_ms = self.options.ramp_duration_s as f64 * 1000.0;
        let ramp = if ramp_ms > 0.0 {
            smoothstep(((now_ms - self.activation_ms) / ramp_ms).min(1.0) as f32)
        } else {
            1.0
        };

        let step = (self.options.speed * dt * ramp).min(dist);
        self.current += to_target.normalize() * step;
        pointer.set_normalized(self.current.x, self.current.y);
        AutoPilotStep::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::input::SurfaceRect;

    fn pointer() -> PointerTracker {
        PointerTracker::new(SurfaceRect::new(0.0, 0.0, 100.0, 100.0), 0.25, 2.2)
    }

    fn options() -> AutoPilotOptions {
        AutoPilotOptions {
            enabled: true,
            speed: 0.5,
            intensity: 2.2,
            resume_delay_ms: 3000.0,
            ramp_duration_s: 0.6,
            margin: 0.2,
        }
    }

    #[test]
    fn waits_for_resume_delay() {
        let mut p = pointer();
        let mut auto = AutoPilotDriver::new(options(), 1, 0.0);
        assert_eq!(auto.update(&mut p, 0.0, 2999.0), AutoPilotStep::Idle);
        assert!(!auto.is_active());
        assert_ne!(auto.update(&mut p, 0.0, 3000.0), AutoPilotStep::Idle);
        assert!(auto.is_active());
        assert!(p.is_auto_active());
    }

    #[test]
    fn disabled_driver_never_moves() {
        let mut p = pointer();
        let mut auto = AutoPilotDriver::new(AutoPilotOptions { enabled: false, ..options() }, 1, 0.0);
        assert_eq!(auto.update(&mut p, 0.0, 1e6), AutoPilotStep::Disabled);
        assert_eq!(p.coords(), Vec2::ZERO);
    }

    #[test]
    fn hovering_pointer_keeps_it_idle() {
        let mut p = pointer();
        p.pointer_move(50.0, 50.0, 0.0);
        let mut auto = AutoPilotDriver::new(options(), 1, 0.0);
        assert_eq!(auto.update(&mut p, -10_000.0, 0.0), AutoPilotStep::Idle);
    }

    #[test]
    fn ramp_starts_from_rest() {
        let mut p = pointer();
        let mut auto = AutoPilotDriver::new(options(), 3, 0.0);
        auto.target = Vec2::new(0.8, 0.8);
        auto.update(&mut p, -5000.0, 0.0);
        // Activation frame has dt = 0 and ramp = 0.
        assert_eq!(auto.current(), Vec2::ZERO);

        auto.update(&mut p, -5000.0, 16.0);
        let early = auto.current().length();

        let mut now = 16.0;
        while now < 700.0 {
            now += 16.0;
            auto.update(&mut p, -5000.0, now);
        }
        let before = auto.current();
        assert_eq!(auto.update(&mut p, -5000.0, now + 16.0), AutoPilotStep::Moved);
        let late = auto.current().distance(before);

        assert!(early < late, "early step {early} should be shorter than ramped step {late}");
        assert!((late - 0.5 * 0.016).abs() < 1e-4);
        assert_eq!(p.coords(), auto.current());
    }

    #[test]
    fn force_stop_is_immediate() {
        let mut p = pointer();
        let mut auto = AutoPilotDriver::new(options(), 1, 0.0);
        auto.update(&mut p, -5000.0, 0.0);
        assert!(auto.is_active());
        auto.force_stop(&mut p);
        assert!(!auto.is_active());
        assert!(!p.is_auto_active());
    }

    #[test]
    fn suspended_tab_gap_is_capped() {
        let mut p = pointer();
        let opts = AutoPilotOptions { ramp_duration_s: 0.0, ..options() };
        let mut auto = AutoPilotDriver::new(opts, 9, 0.0);
        auto.target = Vec2::new(-0.7, 0.1);
        auto.update(&mut p, -5000.0, 0.0);
        let before = auto.current();
        auto.update(&mut p, -5000.0, 10_000.0);
        let moved = auto.current().distance(before);
        assert!((moved - 0.5 * NOMINAL_FRAME_S).abs() < 1e-5);
    }

    #[test]
    fn closes_in_on_each_waypoint_then_picks_one_inside_the_margin() {
        let mut p = pointer();
        let opts = options();
        let extent = 1.0 - opts.margin;
        let mut auto = AutoPilotDriver::new(opts, 7, 0.0);

        // Activation frame: dt = 0 and ramp = 0, nothing moves.
        assert_eq!(auto.update(&mut p, -5000.0, 0.0), AutoPilotStep::Moved);

        let mut retargets = 0;
        for frame in 1..20_000u32 {
            let before = auto.distance_to_target();
            match auto.update(&mut p, -5000.0, frame as f64 * 16.0) {
                AutoPilotStep::Moved => {
                    let after = auto.distance_to_target();
                    assert!(after < before, "frame {frame}: {after} >= {before}");
                }
                AutoPilotStep::Retargeted => {
                    retargets += 1;
                    assert!(before < ARRIVAL_EPSILON, "retargeted at distance {before}");
                    let t = auto.target();
                    assert!(t.x.abs() <= extent && t.y.abs() <= extent, "target {t:?} outside margin");
                }
                other => panic!("unexpected {other:?} while active"),
            }
        }
        assert!(retargets > 10, "only {retargets} waypoints reached");
    }
}
