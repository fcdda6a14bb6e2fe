//! # Reference Data
//!
//! Static catalog of implant systems and their standard abutment screws.
//! The calculation layer reads default parameters (diameter, pitch, nut
//! factor, yield strength, recommended torque) from here and never
//! mutates it.

pub mod implant_systems;

// Re-export catalog types
pub use implant_systems::{catalog, ImplantEntry, ImplantSystemDb, ScrewSpec};
