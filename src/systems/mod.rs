//! Systems: input control, simulation stages, compositing.

pub mod compositor;
pub mod input;
pub mod stages;
