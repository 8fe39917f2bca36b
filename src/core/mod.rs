//! Core helpers shared by every layer: indexing macros, math, randomness, logging.

// Macros first so `fast!` is visible to the modules below.
#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;

#[path = "math/vec2.rs"]
pub mod vec2;
#[path = "utils/random.rs"]
pub mod random;
#[path = "utils/console_log.rs"]
pub mod console_log;

pub use vec2::{smoothstep, Vec2};
pub use random::Xorshift32;
