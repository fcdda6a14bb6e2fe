//! # Conventional Torque/Stress Model
//!
//! Estimates preload from a single torque measurement via the nut-factor
//! formula, converts preload to stress, and assesses mechanical safety
//! against the screw material's yield strength.
//!
//! ## Formulas
//!
//! ```text
//! F   = T / (K · d)                 preload from torque
//! σ   = F / A_t                     stress (N/mm² = MPa)
//! SF  = σ_yield / σ                 safety factor
//! A_t = (π/4) · (d − 0.9382·p)²     tensile stress area
//! ```
//!
//! Note the unit split: the nut-factor formula takes the screw diameter in
//! centimetres, while [`calculate_tensile_area`] takes nominal diameter and
//! pitch in millimetres, both inherited from the published forms. The
//! distinct [`Centimeters`]/[`Millimeters`] parameter types keep the two
//! from being crossed silently.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Centimeters, Megapascals, Millimeters, NewtonCentimeters, Newtons, SquareMillimeters};
use std::f64::consts::PI;

/// Default nut factor for lubricated or coated screws.
///
/// Typical values run 0.15–0.3; unlubricated screws are closer to 0.3.
pub const DEFAULT_K_FACTOR: f64 = 0.2;

/// Default minimum acceptable safety factor for risk banding.
pub const DEFAULT_MIN_SAFETY_FACTOR: f64 = 1.5;

/// Risk band for a screw joint, classified from its safety factor.
///
/// Three bands are canonical: Low (SF > 3.0), Medium (min ≤ SF ≤ 3.0),
/// High (SF < min).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Comfortable margin over yield
    Low,
    /// Acceptable but worth monitoring
    Medium,
    /// Below the minimum acceptable margin
    High,
}

impl RiskLevel {
    /// All risk levels, ordered from safest to least safe
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Fixed clinical recommendation for this band.
    ///
    /// The High-band text contains the phrase "not recommended"; callers
    /// pattern-match on that substring, so it must stay.
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Safe for use with standard protocol",
            RiskLevel::Medium => "Safe for use, but consider more frequent check-ups",
            RiskLevel::High => {
                "Not recommended, consider alternative implant system or reduced loading"
            }
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Risk classification with its recommendation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk band
    pub level: RiskLevel,
    /// Fixed recommendation text for the band
    pub recommendation: String,
}

/// Estimate preload from tightening torque using the nut-factor formula.
///
/// `F = T / (K · d)` with the diameter in centimetres.
///
/// # Errors
///
/// Returns `InvalidInput` when `screw_diameter ≤ 0` or `k_factor ≤ 0`.
///
/// # Example
///
/// ```rust
/// use preload_core::calculations::torque::{estimate_preload_from_torque, DEFAULT_K_FACTOR};
/// use preload_core::units::{Centimeters, NewtonCentimeters};
///
/// let preload = estimate_preload_from_torque(
///     NewtonCentimeters(35.0),
///     Centimeters(0.2),
///     DEFAULT_K_FACTOR,
/// ).unwrap();
/// assert!((preload.0 - 875.0).abs() < 1e-9);
/// ```
pub fn estimate_preload_from_torque(
    torque: NewtonCentimeters,
    screw_diameter: Centimeters,
    k_factor: f64,
) -> CalcResult<Newtons> {
    if screw_diameter.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "screw_diameter_cm",
            screw_diameter.0.to_string(),
            "Screw diameter must be positive",
        ));
    }
    if k_factor <= 0.0 {
        return Err(CalcError::invalid_input(
            "k_factor",
            k_factor.to_string(),
            "k_factor must be positive",
        ));
    }

    Ok(Newtons(torque.0 / (k_factor * screw_diameter.0)))
}

/// Calculate axial stress in the screw from preload.
///
/// `σ = F / A`, with the area in mm² so the result lands in MPa directly
/// (1 N/mm² = 1 MPa). The preload itself is not validated: a negative
/// preload yields a negative stress, which [`calculate_safety_factor`]
/// then rejects.
///
/// # Errors
///
/// Returns `InvalidInput` when `tensile_area ≤ 0`.
pub fn calculate_stress_from_preload(
    preload: Newtons,
    tensile_area: SquareMillimeters,
) -> CalcResult<Megapascals> {
    if tensile_area.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "tensile_area_mm2",
            tensile_area.0.to_string(),
            "Tensile area must be positive",
        ));
    }

    Ok(Megapascals(preload.0 / tensile_area.0))
}

/// Safety factor against yield: `SF = σ_yield / σ`.
///
/// Zero stress is rejected rather than producing an infinite safety
/// factor; the result is always finite.
///
/// # Errors
///
/// Returns `InvalidInput` when `stress ≤ 0` or `yield_strength ≤ 0`.
pub fn calculate_safety_factor(
    stress: Megapascals,
    yield_strength: Megapascals,
) -> CalcResult<f64> {
    if stress.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "stress_mpa",
            stress.0.to_string(),
            "Stress must be positive",
        ));
    }
    if yield_strength.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "yield_strength_mpa",
            yield_strength.0.to_string(),
            "Yield strength must be positive",
        ));
    }

    Ok(yield_strength.0 / stress.0)
}

/// Classify loosening/failure risk from the safety factor.
///
/// Bands: `SF > 3.0` Low; `min_safety_factor ≤ SF ≤ 3.0` Medium;
/// `SF < min_safety_factor` High. A safety factor of exactly zero is
/// accepted and classified High.
///
/// # Errors
///
/// Returns `InvalidInput` when `safety_factor < 0`.
pub fn assess_risk(safety_factor: f64, min_safety_factor: f64) -> CalcResult<RiskAssessment> {
    if safety_factor < 0.0 {
        return Err(CalcError::invalid_input(
            "safety_factor",
            safety_factor.to_string(),
            "Safety factor must be positive",
        ));
    }

    let level = if safety_factor > 3.0 {
        RiskLevel::Low
    } else if safety_factor >= min_safety_factor {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };

    Ok(RiskAssessment {
        level,
        recommendation: level.recommendation().to_string(),
    })
}

/// [`assess_risk`] with the default minimum safety factor of 1.5.
pub fn assess_risk_default(safety_factor: f64) -> CalcResult<RiskAssessment> {
    assess_risk(safety_factor, DEFAULT_MIN_SAFETY_FACTOR)
}

/// Tensile stress area of a threaded fastener.
///
/// `A_t = (π/4) · (d − 0.9382·p)²` with **millimetre** inputs, unlike the
/// centimetre-based formulas elsewhere in this crate. There is no floor on
/// the effective diameter: a pitch large relative to the diameter drives
/// `(d − 0.9382·p)` negative, and the squared term still returns a
/// non-negative area. That is a known modelling edge case of the published
/// formula, kept as-is.
///
/// # Errors
///
/// Returns `InvalidInput` when either input is ≤ 0.
pub fn calculate_tensile_area(
    nominal_diameter: Millimeters,
    thread_pitch: Millimeters,
) -> CalcResult<SquareMillimeters> {
    if nominal_diameter.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "nominal_diameter_mm",
            nominal_diameter.0.to_string(),
            "Nominal diameter must be positive",
        ));
    }
    if thread_pitch.0 <= 0.0 {
        return Err(CalcError::invalid_input(
            "thread_pitch_mm",
            thread_pitch.0.to_string(),
            "Thread pitch must be positive",
        ));
    }

    let effective_diameter = nominal_diameter.0 - 0.9382 * thread_pitch.0;
    Ok(SquareMillimeters(
        PI / 4.0 * effective_diameter * effective_diameter,
    ))
}

/// Acceptable tightening-torque band around a manufacturer's nominal value.
///
/// Applies the conventional-method uncertainty (25% lubricated, 35% not)
/// multiplicatively to the nominal torque.
pub fn calculate_torque_range(
    nominal_torque: NewtonCentimeters,
    is_lubricated: bool,
) -> (NewtonCentimeters, NewtonCentimeters) {
    let uncertainty: f64 = if is_lubricated { 25.0 } else { 35.0 };
    let uncertainty_factor = uncertainty / 100.0;

    let min_torque = NewtonCentimeters(nominal_torque.0 * (1.0 - uncertainty_factor));
    let max_torque = NewtonCentimeters(nominal_torque.0 * (1.0 + uncertainty_factor));

    (min_torque, max_torque)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preload_from_torque() {
        // F = 35 / (0.2 * 0.2) = 875 N
        let preload = estimate_preload_from_torque(
            NewtonCentimeters(35.0),
            Centimeters(0.2),
            DEFAULT_K_FACTOR,
        )
        .unwrap();
        assert!((preload.0 - 875.0).abs() < 1e-9);
    }

    #[test]
    fn test_preload_from_torque_unlubricated_k() {
        let lubricated = estimate_preload_from_torque(
            NewtonCentimeters(35.0),
            Centimeters(0.2),
            0.2,
        )
        .unwrap();
        let unlubricated = estimate_preload_from_torque(
            NewtonCentimeters(35.0),
            Centimeters(0.2),
            0.3,
        )
        .unwrap();
        // Higher friction eats more of the applied torque
        assert!(unlubricated.0 < lubricated.0);
    }

    #[test]
    fn test_preload_from_torque_rejects_bad_inputs() {
        assert!(estimate_preload_from_torque(
            NewtonCentimeters(35.0),
            Centimeters(0.0),
            0.2
        )
        .is_err());
        assert!(estimate_preload_from_torque(
            NewtonCentimeters(35.0),
            Centimeters(0.2),
            0.0
        )
        .is_err());
        assert!(estimate_preload_from_torque(
            NewtonCentimeters(35.0),
            Centimeters(-0.2),
            0.2
        )
        .is_err());
    }

    #[test]
    fn test_stress_from_preload() {
        let stress =
            calculate_stress_from_preload(Newtons(875.0), SquareMillimeters(2.0)).unwrap();
        assert!((stress.0 - 437.5).abs() < 1e-9);
    }

    #[test]
    fn test_stress_propagates_negative_preload() {
        // Preload sign is not validated here; the safety-factor guard
        // downstream rejects the negative stress
        let stress =
            calculate_stress_from_preload(Newtons(-100.0), SquareMillimeters(2.0)).unwrap();
        assert!(stress.0 < 0.0);
        assert!(calculate_safety_factor(stress, Megapascals(950.0)).is_err());
    }

    #[test]
    fn test_stress_rejects_nonpositive_area() {
        assert!(calculate_stress_from_preload(Newtons(875.0), SquareMillimeters(0.0)).is_err());
        assert!(calculate_stress_from_preload(Newtons(875.0), SquareMillimeters(-2.0)).is_err());
    }

    #[test]
    fn test_safety_factor() {
        let sf = calculate_safety_factor(Megapascals(400.0), Megapascals(950.0)).unwrap();
        assert!((sf - 2.375).abs() < 1e-9);
    }

    #[test]
    fn test_safety_factor_rejects_zero_stress() {
        // Zero stress would mean an infinite safety factor; rejected so the
        // result stays finite
        assert!(calculate_safety_factor(Megapascals(0.0), Megapascals(950.0)).is_err());
        assert!(calculate_safety_factor(Megapascals(400.0), Megapascals(0.0)).is_err());
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(assess_risk_default(4.0).unwrap().level, RiskLevel::Low);
        assert_eq!(assess_risk_default(2.0).unwrap().level, RiskLevel::Medium);
        assert_eq!(assess_risk_default(1.0).unwrap().level, RiskLevel::High);
    }

    #[test]
    fn test_risk_band_boundaries() {
        // 3.0 is Medium (Low requires strictly greater); 1.5 is Medium;
        // zero is accepted and High
        assert_eq!(assess_risk_default(3.0).unwrap().level, RiskLevel::Medium);
        assert_eq!(assess_risk_default(1.5).unwrap().level, RiskLevel::Medium);
        assert_eq!(assess_risk_default(0.0).unwrap().level, RiskLevel::High);
    }

    #[test]
    fn test_risk_rejects_negative_safety_factor() {
        assert!(assess_risk_default(-1.0).is_err());
    }

    #[test]
    fn test_high_risk_recommendation_wording() {
        let assessment = assess_risk_default(1.0).unwrap();
        assert!(assessment
            .recommendation
            .to_lowercase()
            .contains("not recommended"));
    }

    #[test]
    fn test_custom_min_safety_factor() {
        // Raising the floor reclassifies a borderline joint
        assert_eq!(assess_risk(1.8, 1.5).unwrap().level, RiskLevel::Medium);
        assert_eq!(assess_risk(1.8, 2.0).unwrap().level, RiskLevel::High);
    }

    #[test]
    fn test_tensile_area() {
        // A_t = (π/4)(2.0 - 0.9382*0.4)² = 2.0728 mm²
        let area = calculate_tensile_area(Millimeters(2.0), Millimeters(0.4)).unwrap();
        assert!((area.0 - 2.0728).abs() < 0.001);
    }

    #[test]
    fn test_tensile_area_oversized_pitch() {
        // Pitch large enough to drive the effective diameter negative:
        // the squared term still gives a non-negative area
        let area = calculate_tensile_area(Millimeters(0.5), Millimeters(1.0)).unwrap();
        assert!(area.0 > 0.0);
    }

    #[test]
    fn test_tensile_area_rejects_nonpositive_inputs() {
        assert!(calculate_tensile_area(Millimeters(0.0), Millimeters(0.4)).is_err());
        assert!(calculate_tensile_area(Millimeters(2.0), Millimeters(0.0)).is_err());
        assert!(calculate_tensile_area(Millimeters(-2.0), Millimeters(0.4)).is_err());
    }

    #[test]
    fn test_torque_range() {
        let (min, max) = calculate_torque_range(NewtonCentimeters(35.0), false);
        assert!((min.0 - 22.75).abs() < 1e-9);
        assert!((max.0 - 47.25).abs() < 1e-9);

        let (min, max) = calculate_torque_range(NewtonCentimeters(35.0), true);
        assert!((min.0 - 26.25).abs() < 1e-9);
        assert!((max.0 - 43.75).abs() < 1e-9);
    }

    #[test]
    fn test_positive_chain_is_finite() {
        // estimate -> stress -> safety factor stays finite and positive
        // across a spread of positive inputs
        let cases = [
            (10.0, 0.16, 0.15, 1.4, 0.3),
            (35.0, 0.2, 0.2, 2.0, 0.4),
            (45.0, 0.25, 0.3, 2.5, 0.45),
        ];
        for (torque, d_cm, k, d_mm, p_mm) in cases {
            let preload = estimate_preload_from_torque(
                NewtonCentimeters(torque),
                Centimeters(d_cm),
                k,
            )
            .unwrap();
            let area = calculate_tensile_area(Millimeters(d_mm), Millimeters(p_mm)).unwrap();
            let stress = calculate_stress_from_preload(preload, area).unwrap();
            let sf = calculate_safety_factor(stress, Megapascals(950.0)).unwrap();
            assert!(sf.is_finite() && sf > 0.0);
        }
    }

    #[test]
    fn test_risk_assessment_serialization() {
        let assessment = assess_risk_default(2.0).unwrap();
        let json = serde_json::to_string(&assessment).unwrap();
        let roundtrip: RiskAssessment = serde_json::from_str(&json).unwrap();
        assert_eq!(assessment, roundtrip);
    }
}
