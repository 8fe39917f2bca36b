//! Device capability resolution
//!
//! Runs once at session init. Some mobile GPUs cannot render into 32-bit
//! float targets, so the effect falls back to half precision there. The
//! result is a fixed descriptor; stages consult it on every write.

use super::config::PrecisionPreference;

/// Largest finite IEEE binary16 value
const HALF_MAX: f32 = 65504.0;
/// Smallest positive normal IEEE binary16 value
const HALF_MIN_NORMAL: f32 = 6.103_515_6e-5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BufferPrecision {
    #[default]
    Full,
    Half,
}

impl BufferPrecision {
    /// Round a value the way a buffer of this precision would store it
    #[inline(always)]
    pub fn store(self, v: f32) -> f32 {
        match self {
            BufferPrecision::Full => v,
            BufferPrecision::Half => to_half_precision(v),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub precision: BufferPrecision,
}

impl Capabilities {
    pub fn resolve(preference: PrecisionPreference, user_agent: Option<&str>) -> Self {
        let precision = match preference {
            PrecisionPreference::Full => BufferPrecision::Full,
            PrecisionPreference::Half => BufferPrecision::Half,
            PrecisionPreference::Auto => {
                if user_agent.map(lacks_float_targets).unwrap_or(false) {
                    log::info!("capabilities: float render targets unavailable, using half precision");
                    BufferPrecision::Half
                } else {
                    BufferPrecision::Full
                }
            }
        };
        Self { precision }
    }
}

fn lacks_float_targets(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    ["ipad", "iphone", "ipod"].iter().any(|d| ua.contains(d))
}

/// Round to the nearest binary16-representable value (ties away from zero),
/// saturating at ±65504 and flushing subnormals to zero.
pub fn to_half_precision(v: f32) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    let clamped = v.clamp(-HALF_MAX, HALF_MAX);
    if clamped.abs() < HALF_MIN_NORMAL {
        return 0.0;
    }
    // Drop the 13 low mantissa bits with rounding; a carry correctly bumps the exponent.
    let rounded = f32::from_bits((clamped.to_bits() + 0x0000_1000) & 0xFFFF_E000);
    rounded.clamp(-HALF_MAX, HALF_MAX)
}
