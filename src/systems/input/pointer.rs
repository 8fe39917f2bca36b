//! PointerTracker - normalized pointer position, per-frame displacement and
//! the eased hand-off from the autopilot back to the real pointer.
//!
//! Positions live in simulation space: [-1,1]², y up. All timing is driven
//! by the host's frame timestamps (milliseconds), never by a wall clock read
//! from in here.

use crate::core::{smoothstep, Vec2};

use super::surface::SurfaceRect;

/// Eased transition of pointer authority from autopilot to user
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Takeover {
    pub from: Vec2,
    pub to: Vec2,
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl Takeover {
    /// Linear progress, ≥ 1 once the transition is over
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).max(0.0) as f32
    }

    /// Eased position at `now_ms`
    pub fn position(&self, now_ms: f64) -> Vec2 {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            self.to
        } else {
            self.from.lerp(self.to, smoothstep(t))
        }
    }
}

#[derive(Clone, Debug)]
pub struct PointerTracker {
    surface: SurfaceRect,
    coords: Vec2,
    coords_old: Vec2,
    diff: Vec2,
    /// A real position has been set since the last reset
    has_position: bool,
    /// `coords_old` holds a real sample, so `diff` is meaningful
    primed: bool,
    hover_inside: bool,
    has_user_control: bool,
    auto_active: bool,
    auto_intensity: f32,
    takeover: Option<Takeover>,
    takeover_duration_ms: f64,
}

impl PointerTracker {
    pub fn new(surface: SurfaceRect, takeover_duration_s: f32, auto_intensity: f32) -> Self {
        Self {
            surface,
            coords: Vec2::ZERO,
            coords_old: Vec2::ZERO,
            diff: Vec2::ZERO,
            has_position: false,
            primed: false,
            hover_inside: false,
            has_user_control: false,
            auto_active: false,
            auto_intensity,
            takeover: None,
            takeover_duration_ms: (takeover_duration_s.max(0.0) as f64) * 1000.0,
        }
    }

    pub fn set_surface(&mut self, surface: SurfaceRect) {
        self.surface = surface;
    }

    pub fn surface(&self) -> SurfaceRect {
        self.surface
    }

    /// Back to the freshly constructed state (surface is kept)
    pub fn reset(&mut self) {
        *self = Self {
            surface: self.surface,
            auto_intensity: self.auto_intensity,
            takeover_duration_ms: self.takeover_duration_ms,
            ..Self::new(SurfaceRect::default(), 0.0, 0.0)
        };
    }

    // === Position injection ===

    /// Screen coordinates relative to the surface. Ignored for a zero-area surface.
    pub fn set_position(&mut self, screen_x: f32, screen_y: f32) -> bool {
        match self.surface.normalize(screen_x, screen_y) {
            Some(p) => {
                self.coords = p;
                self.has_position = true;
                true
            }
            None => false,
        }
    }

    /// Already-normalized position (autopilot path)
    pub fn set_normalized(&mut self, nx: f32, ny: f32) {
        let clamp = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        self.coords = Vec2::new(clamp(nx), clamp(ny));
        self.has_position = true;
    }

    // === Host events ===

    /// Pointer / touch move. Returns true when the event landed inside the
    /// surface, i.e. counts as a user interaction.
    pub fn pointer_move(&mut self, screen_x: f32, screen_y: f32, now_ms: f64) -> bool {
        self.track(screen_x, screen_y, now_ms)
    }

    /// Pointer-down / touch-start; same authority rules as a move.
    pub fn pointer_down(&mut self, screen_x: f32, screen_y: f32, now_ms: f64) -> bool {
        self.track(screen_x, screen_y, now_ms)
    }

    /// Pointer-up / touch-end / leaving the document
    pub fn pointer_leave(&mut self) {
        self.hover_inside = false;
    }

    fn track(&mut self, screen_x: f32, screen_y: f32, now_ms: f64) -> bool {
        self.hover_inside = self.surface.contains(screen_x, screen_y);
        if !self.hover_inside {
            return false;
        }

        if let Some(takeover) = self.takeover.as_mut() {
            // Follow the real pointer; authority passes once the blend finishes.
            if let Some(to) = self.surface.normalize(screen_x, screen_y) {
                takeover.to = to;
            }
            self.has_user_control = true;
            return true;
        }

        if self.auto_active && !self.has_user_control {
            if let Some(to) = self.surface.normalize(screen_x, screen_y) {
                self.takeover = Some(Takeover {
                    from: self.coords,
                    to,
                    start_ms: now_ms,
                    duration_ms: self.takeover_duration_ms,
                });
                self.has_user_control = true;
                return true;
            }
        }

        self.set_position(screen_x, screen_y);
        self.has_user_control = true;
        true
    }

    // === Autopilot hand-over ===

    /// Autopilot took the wheel; a later user move starts a fresh takeover.
    pub fn begin_auto(&mut self) {
        self.auto_active = true;
        self.has_user_control = false;
    }

    /// Autopilot let go. While a takeover runs the flag is cleared by `update`.
    pub fn end_auto(&mut self) {
        if self.takeover.is_none() {
            self.auto_active = false;
        }
    }

    // === Per-frame ===

    /// Recompute displacement for this frame.
    pub fn update(&mut self, now_ms: f64) {
        if let Some(takeover) = self.takeover {
            if takeover.progress(now_ms) >= 1.0 {
                self.takeover = None;
                self.auto_active = false;
                self.coords = takeover.to;
                self.coords_old = takeover.to;
                self.has_position = true;
                self.primed = true;
                self.diff = Vec2::ZERO;
                return;
            }
            self.coords = takeover.position(now_ms);
        }

        if self.primed {
            self.diff = self.coords - self.coords_old;
        } else {
            // First sample: the previous position is only a placeholder.
            self.diff = Vec2::ZERO;
            self.primed = self.has_position;
        }
        self.coords_old = self.coords;

        if self.auto_active && self.takeover.is_none() {
            self.diff = self.diff * self.auto_intensity;
        }
    }

    // === Accessors ===

    #[inline]
    pub fn coords(&self) -> Vec2 { self.coords }

    #[inline]
    pub fn diff(&self) -> Vec2 { self.diff }

    #[inline]
    pub fn is_hover_inside(&self) -> bool { self.hover_inside }

    #[inline]
    pub fn has_user_control(&self) -> bool { self.has_user_control }

    #[inline]
    pub fn is_auto_active(&self) -> bool { self.auto_active }

    #[inline]
    pub fn takeover(&self) -> Option<&Takeover> { self.takeover.as_ref() }

    #[inline]
    pub fn is_takeover_active(&self) -> bool { self.takeover.is_some() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> PointerTracker {
        PointerTracker::new(SurfaceRect::new(0.0, 0.0, 200.0, 100.0), 0.25, 2.0)
    }

    #[test]
    fn first_sample_has_no_displacement() {
        let mut p = tracker();
        assert!(p.pointer_move(180.0, 10.0, 0.0));
        p.update(16.0);
        assert_eq!(p.diff(), Vec2::ZERO);

        p.pointer_move(100.0, 50.0, 32.0);
        p.update(32.0);
        assert!((p.diff().x - (-0.8)).abs() < 1e-6);
        assert!((p.diff().y - (-0.8)).abs() < 1e-6);
    }

    #[test]
    fn zero_area_surface_ignores_positions() {
        let mut p = PointerTracker::new(SurfaceRect::new(0.0, 0.0, 0.0, 0.0), 0.25, 1.0);
        assert!(!p.set_position(10.0, 10.0));
        assert!(!p.pointer_move(0.0, 0.0, 0.0));
        assert_eq!(p.coords(), Vec2::ZERO);
    }

    #[test]
    fn outside_event_only_clears_hover() {
        let mut p = tracker();
        p.pointer_move(50.0, 50.0, 0.0);
        assert!(p.is_hover_inside());
        assert!(!p.pointer_move(500.0, 50.0, 1.0));
        assert!(!p.is_hover_inside());
        assert_eq!(p.coords(), Vec2::new(-0.5, 0.0));
    }

    #[test]
    fn normalized_input_is_clamped() {
        let mut p = tracker();
        p.set_normalized(3.0, -7.0);
        assert_eq!(p.coords(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn takeover_eases_from_auto_position_to_pointer() {
        let mut p = tracker();
        p.begin_auto();
        p.set_normalized(-0.5, 0.5);
        p.update(0.0);

        assert!(p.pointer_move(200.0, 100.0, 1000.0));
        assert!(p.has_user_control());
        assert!(p.is_auto_active());
        let t = *p.takeover().expect("takeover should start");
        assert_eq!(t.from, Vec2::new(-0.5, 0.5));
        assert_eq!(t.to, Vec2::new(1.0, -1.0));

        // t = 0: still at `from`
        p.update(1000.0);
        assert_eq!(p.coords(), t.from);

        // halfway: smoothstep(0.5) = 0.5
        p.update(1125.0);
        assert!((p.coords().x - 0.25).abs() < 1e-5);
        assert!(p.is_auto_active());

        // done: exactly `to`, no displacement, autopilot flag released
        p.update(1250.0);
        assert_eq!(p.coords(), t.to);
        assert_eq!(p.diff(), Vec2::ZERO);
        assert!(!p.is_auto_active());
        assert!(!p.is_takeover_active());

        p.update(1266.0);
        assert_eq!(p.diff(), Vec2::ZERO);
    }

    #[test]
    fn auto_displacement_is_scaled_by_intensity() {
        let mut p = tracker();
        p.begin_auto();
        p.set_normalized(0.1, 0.0);
        p.update(0.0);
        p.set_normalized(0.2, 0.0);
        p.update(16.0);
        assert!((p.diff().x - 0.2).abs() < 1e-6);
    }

    #[test]
    fn reset_forgets_everything_but_surface() {
        let mut p = tracker();
        p.pointer_move(10.0, 10.0, 0.0);
        p.update(0.0);
        p.reset();
        assert_eq!(p.coords(), Vec2::ZERO);
        assert!(!p.has_user_control());
        assert!(!p.is_hover_inside());
        assert_eq!(p.surface(), SurfaceRect::new(0.0, 0.0, 200.0, 100.0));
        p.pointer_move(100.0, 50.0, 1.0);
        p.update(1.0);
        assert_eq!(p.diff(), Vec2::ZERO);
    }
}
