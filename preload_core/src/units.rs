//! # Unit Types
//!
//! Type-safe wrappers for the physical quantities used in screw-joint
//! mechanics. These provide compile-time safety against unit confusion
//! while remaining lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Implant screw mechanics uses a small, fixed set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Unit Conventions
//!
//! The calculation surface follows the conventions of the implant
//! literature:
//! - Torque: newton-centimetres (N·cm)
//! - Force / preload: newtons (N)
//! - Thread pitch and screw diameter: centimetres (cm) in the preload
//!   formulas, millimetres (mm) in the tensile-area formula
//! - Tensile stress area: square millimetres (mm²)
//! - Stress / yield strength: megapascals (MPa); 1 N/mm² = 1 MPa
//!
//! The centimetre/millimetre split is inherited from the published
//! formulas and is exactly the kind of silent hazard these wrappers
//! exist to surface: `Centimeters` and `Millimeters` are distinct types,
//! and crossing between them requires an explicit conversion.
//!
//! ## Example
//!
//! ```rust
//! use preload_core::units::{Centimeters, Millimeters};
//!
//! let pitch = Millimeters(0.4);
//! let pitch_cm: Centimeters = pitch.into();
//! assert_eq!(pitch_cm.0, 0.04);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Torque Units
// ============================================================================

/// Torque in newton-centimetres (N·cm)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonCentimeters(pub f64);

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons (N)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Millimeters> for Centimeters {
    fn from(mm: Millimeters) -> Self {
        Centimeters(mm.0 / 10.0)
    }
}

impl From<Centimeters> for Millimeters {
    fn from(cm: Centimeters) -> Self {
        Millimeters(cm.0 * 10.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (MPa). Numerically identical to N/mm².
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(NewtonCentimeters);
impl_arithmetic!(Newtons);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(SquareMillimeters);
impl_arithmetic!(Megapascals);
