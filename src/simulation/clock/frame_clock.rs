//! FrameClock - elapsed time and per-frame delta from host timestamps

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    last_ms: f64,
    elapsed_s: f64,
    delta_s: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new(now_ms: f64) -> Self {
        Self { last_ms: now_ms, elapsed_s: 0.0, delta_s: 0.0, frames: 0 }
    }

    /// Advance to `now_ms`. Timestamps that run backwards give a zero delta.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let delta = if now_ms.is_finite() { ((now_ms - self.last_ms) / 1000.0).max(0.0) } else { 0.0 };
        if now_ms.is_finite() {
            self.last_ms = now_ms;
        }
        self.delta_s = delta;
        self.elapsed_s += delta;
        self.frames += 1;
        delta
    }

    /// Restart from `now_ms` without a catch-up delta (after a suspension)
    pub fn resume(&mut self, now_ms: f64) {
        if now_ms.is_finite() {
            self.last_ms = now_ms;
        }
        self.delta_s = 0.0;
    }

    #[inline]
    pub fn delta(&self) -> f64 { self.delta_s }

    #[inline]
    pub fn elapsed(&self) -> f64 { self.elapsed_s }

    #[inline]
    pub fn frames(&self) -> u64 { self.frames }
}
