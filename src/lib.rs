//! Liquid Ether Engine - real-time incompressible fluid background in WASM
//!
//! Architecture:
//! - core/          - Macros, math, RNG, console logging
//! - domain/        - Configuration, palette, device capabilities
//! - spatial/       - Grid fields and ping-pong pairs
//! - systems/       - Input control, simulation stages, compositor
//! - simulation/    - Session orchestration and the wasm facade

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine (console logging + panic hook)
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    core::console_log::install(level);
    log::info!("liquid ether engine {} initialized", version());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Default configuration as JSON, for hosts that want to show or patch it
#[wasm_bindgen]
pub fn default_config_json() -> String {
    serde_json::to_string(&domain::EngineConfig::default()).unwrap_or_default()
}

// Re-export main types
pub use domain::{BoundaryMode, EngineConfig, PrecisionPreference};
pub use simulation::{EtherCore, LiquidEther, PerfStats};
