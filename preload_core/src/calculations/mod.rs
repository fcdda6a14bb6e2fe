//! # Screw-Joint Calculations
//!
//! This module contains the preload calculation surface. The leaf
//! formulas are free pure functions returning `CalcResult`; the composite
//! comparison follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`preload`] - Two-measurement (tightening/removal torque) preload model
//! - [`torque`] - Conventional nut-factor estimate, stress, safety factor, risk
//! - [`comparison`] - Both methods side by side, per screw and per catalog

pub mod comparison;
pub mod preload;
pub mod torque;

// Re-export commonly used types
pub use comparison::{CatalogAnalysis, ComparisonInput, ComparisonResult};
pub use torque::{RiskAssessment, RiskLevel};
