//! # preload_core - Implant Screw Preload Calculation Engine
//!
//! `preload_core` computes dental-implant screw preload from torque
//! measurements with a clean, LLM-friendly API. All inputs and outputs are
//! JSON-serializable, making it ideal for integration with AI assistants
//! via MCP or similar protocols.
//!
//! Two estimation methods are implemented: the conventional nut-factor
//! formula over a single torque measurement, and the two-measurement
//! analytic method that derives preload from a tightening/removal torque
//! pair with far tighter uncertainty. The stress, safety-factor, and risk
//! chain sits on top of either estimate.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All composite types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Unit-Tagged**: Distinct newtypes for N·cm, N, cm, mm, mm², MPa
//!
//! ## Quick Start
//!
//! ```rust
//! use preload_core::calculations::preload::calculate_preload;
//! use preload_core::units::{Centimeters, NewtonCentimeters};
//!
//! // Screw seated at 35 N·cm, removal measured at 28.9 N·cm, 0.4 mm pitch
//! let preload = calculate_preload(
//!     NewtonCentimeters(35.0),
//!     NewtonCentimeters(28.9),
//!     Centimeters(0.04),
//! ).unwrap();
//! assert!(preload.0 > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Preload, torque/stress, and method-comparison calculations
//! - [`materials`] - Implant-system catalog (read-only reference data)
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{ComparisonInput, ComparisonResult, RiskAssessment, RiskLevel};
pub use errors::{CalcError, CalcResult};
pub use materials::{catalog, ImplantEntry, ImplantSystemDb, ScrewSpec};
