//! Engine configuration
//!
//! `EngineConfig` mirrors the host configuration surface (camelCase JSON,
//! every field optional). `resolve()` runs once at session init and turns it
//! into the sanitised option blocks the rest of the engine consumes.

use serde::{Deserialize, Serialize};

pub const DEFAULT_COLORS: [&str; 3] = ["#9333ea", "#c026d3", "#c084fc"];

pub const DEFAULT_MOUSE_FORCE: f32 = 20.0;
pub const DEFAULT_CURSOR_SIZE: f32 = 100.0;
pub const DEFAULT_VISCOSITY: f32 = 30.0;
pub const DEFAULT_ITERATIONS: u32 = 32;
pub const DEFAULT_DT: f32 = 0.014;
pub const DEFAULT_RESOLUTION: f32 = 0.5;
/// One cell per viewport pixel at most
pub const MAX_RESOLUTION: f32 = 1.0;

pub const DEFAULT_AUTO_SPEED: f32 = 0.5;
pub const DEFAULT_AUTO_INTENSITY: f32 = 2.2;
pub const DEFAULT_AUTO_RESUME_DELAY_MS: f64 = 3000.0;
pub const DEFAULT_AUTO_RAMP_DURATION_S: f32 = 0.6;
pub const DEFAULT_AUTO_MARGIN: f32 = 0.2;
pub const DEFAULT_TAKEOVER_DURATION_S: f32 = 0.25;

/// How the outermost ring of cells is treated by every stage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Every cell is solved, samples past the edge clamp to the edge
    #[default]
    Open,
    /// The one-cell band is held at zero (closed wall)
    Bounded,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionPreference {
    #[default]
    Auto,
    Full,
    Half,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub colors: Vec<String>,
    pub mouse_force: f32,
    pub cursor_size: f32,
    pub is_viscous: bool,
    pub viscous: f32,
    pub iterations_viscous: u32,
    pub iterations_poisson: u32,
    pub dt: f32,
    #[serde(rename = "BFECC")]
    pub bfecc: bool,
    pub resolution: f32,
    pub boundary: BoundaryMode,
    pub auto_demo: bool,
    pub auto_speed: f32,
    pub auto_intensity: f32,
    /// Seconds
    pub takeover_duration: f32,
    /// Milliseconds
    pub auto_resume_delay: f64,
    /// Seconds
    pub auto_ramp_duration: f32,
    /// Fraction of the half-range kept clear when picking waypoints
    pub auto_margin: f32,
    pub background_color: String,
    pub background_alpha: f32,
    pub precision: PrecisionPreference,
    /// Autopilot RNG seed; derived from the creation time when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            mouse_force: DEFAULT_MOUSE_FORCE,
            cursor_size: DEFAULT_CURSOR_SIZE,
            is_viscous: true,
            viscous: DEFAULT_VISCOSITY,
            iterations_viscous: DEFAULT_ITERATIONS,
            iterations_poisson: DEFAULT_ITERATIONS,
            dt: DEFAULT_DT,
            bfecc: true,
            resolution: DEFAULT_RESOLUTION,
            boundary: BoundaryMode::Open,
            auto_demo: true,
            auto_speed: DEFAULT_AUTO_SPEED,
            auto_intensity: DEFAULT_AUTO_INTENSITY,
            takeover_duration: DEFAULT_TAKEOVER_DURATION_S,
            auto_resume_delay: DEFAULT_AUTO_RESUME_DELAY_MS,
            auto_ramp_duration: DEFAULT_AUTO_RAMP_DURATION_S,
            auto_margin: DEFAULT_AUTO_MARGIN,
            background_color: "#000000".to_string(),
            background_alpha: 0.0,
            precision: PrecisionPreference::Auto,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    pub fn resolve(&self) -> ResolvedConfig {
        let simulation = SimulationOptions {
            resolution: self.resolution,
            dt: self.dt,
            mouse_force: self.mouse_force,
            cursor_size: self.cursor_size,
            is_viscous: self.is_viscous,
            viscosity: self.viscous,
            iterations_viscous: self.iterations_viscous,
            iterations_poisson: self.iterations_poisson,
            boundary: self.boundary,
            bfecc: self.bfecc,
        }
        .sanitized();

        let autopilot = AutoPilotOptions {
            enabled: self.auto_demo,
            speed: self.auto_speed,
            intensity: self.auto_intensity,
            resume_delay_ms: self.auto_resume_delay,
            ramp_duration_s: self.auto_ramp_duration,
            margin: self.auto_margin,
        }
        .sanitized();

        let takeover_duration_s = if self.takeover_duration.is_finite() && self.takeover_duration >= 0.0 {
            self.takeover_duration
        } else {
            DEFAULT_TAKEOVER_DURATION_S
        };

        ResolvedConfig {
            simulation,
            autopilot,
            takeover_duration_s,
            colors: self.colors.clone(),
            background_color: self.background_color.clone(),
            background_alpha: finite_or(self.background_alpha, 0.0).clamp(0.0, 1.0),
            precision: self.precision,
            seed: self.seed,
        }
    }
}

/// Output of `EngineConfig::resolve`, fixed for the life of a session
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub simulation: SimulationOptions,
    pub autopilot: AutoPilotOptions,
    pub takeover_duration_s: f32,
    pub colors: Vec<String>,
    pub background_color: String,
    pub background_alpha: f32,
    pub precision: PrecisionPreference,
    pub seed: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationOptions {
    /// Grid cells per viewport pixel
    pub resolution: f32,
    pub dt: f32,
    pub mouse_force: f32,
    /// Cursor influence, in pixel-equivalents of the grid
    pub cursor_size: f32,
    pub is_viscous: bool,
    pub viscosity: f32,
    pub iterations_viscous: u32,
    pub iterations_poisson: u32,
    pub boundary: BoundaryMode,
    pub bfecc: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        EngineConfig::default().resolve().simulation
    }
}

impl SimulationOptions {
    /// Replace values the kernels cannot work with.
    ///
    /// Iteration counts are at least 1; `dt`, `resolution` and `cursor_size`
    /// must be finite and positive (else the default); `resolution` is capped
    /// at `MAX_RESOLUTION`; force and viscosity are clamped to be non-negative.
    pub fn sanitized(mut self) -> Self {
        self.resolution = positive_or(self.resolution, DEFAULT_RESOLUTION).min(MAX_RESOLUTION);
        self.dt = positive_or(self.dt, DEFAULT_DT);
        self.cursor_size = positive_or(self.cursor_size, DEFAULT_CURSOR_SIZE);
        self.mouse_force = finite_or(self.mouse_force, DEFAULT_MOUSE_FORCE).max(0.0);
        self.viscosity = finite_or(self.viscosity, DEFAULT_VISCOSITY).max(0.0);
        self.iterations_viscous = self.iterations_viscous.max(1);
        self.iterations_poisson = self.iterations_poisson.max(1);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoPilotOptions {
    pub enabled: bool,
    /// Normalized units per second
    pub speed: f32,
    /// Multiplier applied to pointer displacement while driving
    pub intensity: f32,
    pub resume_delay_ms: f64,
    pub ramp_duration_s: f32,
    /// Fraction of the half-range kept clear at the edges when picking waypoints
    pub margin: f32,
}

impl Default for AutoPilotOptions {
    fn default() -> Self {
        EngineConfig::default().resolve().autopilot
    }
}

impl AutoPilotOptions {
    pub fn sanitized(mut self) -> Self {
        self.speed = finite_or(self.speed, DEFAULT_AUTO_SPEED).max(0.0);
        self.intensity = finite_or(self.intensity, DEFAULT_AUTO_INTENSITY).max(0.0);
        self.resume_delay_ms = if self.resume_delay_ms.is_finite() && self.resume_delay_ms > 0.0 {
            self.resume_delay_ms
        } else {
            DEFAULT_AUTO_RESUME_DELAY_MS
        };
        self.ramp_duration_s = finite_or(self.ramp_duration_s, 0.0).max(0.0);
        self.margin = finite_or(self.margin, DEFAULT_AUTO_MARGIN).clamp(0.0, 0.99);
        self
    }
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

#[inline]
fn positive_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}
