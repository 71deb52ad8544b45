//! Core domain models for pipeline descriptors
//!
//! This module defines the data structures handed to the consuming packaging
//! framework: steps, flows, and the descriptors that bind them together.

pub mod descriptor;
pub mod flow;
pub mod presets;
pub mod step;

pub use descriptor::*;
pub use flow::*;
pub use step::*;
