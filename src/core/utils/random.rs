/// Seeded xorshift32 generator
///
/// All randomness in the engine (autopilot waypoints) goes through this so a
/// session is reproducible from its configured seed.
#[derive(Clone, Debug)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub fn new(seed: u32) -> Self {
        // Zero is a fixed point of xorshift.
        let state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { state }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        xorshift32(&mut self.state)
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in [-1, 1)
    #[inline]
    pub fn next_signed(&mut self) -> f32 {
        self.next_f32() * 2.0 - 1.0
    }

    /// Seed folded from a host timestamp, for sessions without a fixed seed
    pub fn seed_from_time(now_ms: f64) -> u32 {
        let bits = now_ms.to_bits();
        let mut state = (bits ^ (bits >> 32)) as u32 | 1;
        xorshift32(&mut state)
    }
}

#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}
