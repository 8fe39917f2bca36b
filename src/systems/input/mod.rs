//! Input control layer: surface mapping, pointer tracking, autopilot.

pub mod autopilot;
pub mod pointer;
pub mod surface;

pub use autopilot::{AutoPilotDriver, AutoPilotStep, ARRIVAL_EPSILON};
pub use pointer::{PointerTracker, Takeover};
pub use surface::SurfaceRect;
