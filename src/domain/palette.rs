//! Palette - 1-D colour lookup built from a short list of colour stops
//!
//! Behaves like a `n x 1` texture with linear filtering and clamp-to-edge
//! wrapping: stop `i` sits at the centre of texel `i`.

/// Linear colour with components in [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const TRANSPARENT: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb` / `#rrggbb` (leading `#` optional). Alpha is 1.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        let parse = |s: &str| u8::from_str_radix(s, 16).ok();
        let (r, g, b) = match digits.len() {
            3 => {
                let r = parse(&digits[0..1])?;
                let g = parse(&digits[1..2])?;
                let b = parse(&digits[2..3])?;
                (r * 17, g * 17, b * 17)
            }
            6 => (
                parse(&digits[0..2])?,
                parse(&digits[2..4])?,
                parse(&digits[4..6])?,
            ),
            _ => return None,
        };
        Some(Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0))
    }

    #[inline]
    pub fn lerp(&self, to: Rgba, t: f32) -> Self {
        Self {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }

    /// Pack as ABGR (`0xAABBGGRR`), i.e. bytes R,G,B,A in little-endian memory
    #[inline]
    pub fn to_abgr(&self) -> u32 {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (q(self.a) << 24) | (q(self.b) << 16) | (q(self.g) << 8) | q(self.r)
    }
}

#[derive(Clone, Debug)]
pub struct Palette {
    stops: Vec<Rgba>,
}

impl Palette {
    /// Build the lookup table. Unparseable stops become white; an empty list
    /// becomes two white stops and a single stop is duplicated.
    pub fn from_stops<S: AsRef<str>>(stops: &[S]) -> Self {
        let mut parsed: Vec<Rgba> = stops
            .iter()
            .map(|s| {
                let s = s.as_ref();
                Rgba::from_hex(s).unwrap_or_else(|| {
                    log::warn!("palette: unreadable colour {:?}, using white", s);
                    Rgba::WHITE
                })
            })
            .collect();

        match parsed.len() {
            0 => parsed = vec![Rgba::WHITE, Rgba::WHITE],
            1 => parsed.push(parsed[0]),
            _ => {}
        }
        Self::from_colors(parsed)
    }

    pub fn from_colors(stops: Vec<Rgba>) -> Self {
        // Stored stops are 8-bit, like the texture the effect was tuned against.
        let stops = stops
            .into_iter()
            .map(|c| Rgba::new(quantize_u8(c.r), quantize_u8(c.g), quantize_u8(c.b), 1.0))
            .collect();
        Self { stops }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[Rgba] {
        &self.stops
    }

    /// Linear lookup at `t` in [0, 1] (clamped)
    pub fn sample(&self, t: f32) -> Rgba {
        let n = self.stops.len();
        if n == 0 {
            return Rgba::WHITE;
        }
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let texel = (t * n as f32 - 0.5).clamp(0.0, (n - 1) as f32);
        let i0 = texel.floor() as usize;
        let i1 = (i0 + 1).min(n - 1);
        let frac = texel - i0 as f32;
        self.stops[i0].lerp(self.stops[i1], frac)
    }
}

#[inline]
fn quantize_u8(c: f32) -> f32 {
    (c.clamp(0.0, 1.0) * 255.0).round() / 255.0
}
