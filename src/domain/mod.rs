//! Domain data: configuration, colour palette, device capabilities.

pub mod capabilities;
pub mod config;
pub mod palette;

pub use capabilities::{BufferPrecision, Capabilities};
pub use config::{
    AutoPilotOptions, BoundaryMode, EngineConfig, PrecisionPreference, ResolvedConfig,
    SimulationOptions,
};
pub use palette::{Palette, Rgba};
