//! Spatial storage: uniform 2-D fields and their ping-pong pairs.

pub mod field;

pub use field::{FieldValue, GridField, PingPong, ScalarField, VectorField};
