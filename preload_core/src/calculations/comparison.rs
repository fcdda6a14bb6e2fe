//! # Method Comparison
//!
//! Runs the conventional single-measurement estimate and the
//! two-measurement analytic calculation side by side for one screw, and
//! over a whole implant-system catalog.
//!
//! The conventional method knows only the applied torque and carries
//! 25-35% uncertainty; the two-measurement method adds the removal torque
//! and narrows that to a fixed 9%. The comparison quantifies what the
//! second measurement buys: overlapping preload bands, the uncertainty
//! reduction, and the per-method stress, safety factor, and risk band.
//!
//! ## Example
//!
//! ```rust
//! use preload_core::calculations::comparison::{ComparisonInput, calculate};
//!
//! let input = ComparisonInput {
//!     label: "Generic Standard".to_string(),
//!     tightening_torque_ncm: 35.0,
//!     removal_torque_ncm: 29.5,
//!     diameter_mm: 2.0,
//!     thread_pitch_mm: 0.4,
//!     k_factor: 0.2,
//!     yield_strength_mpa: 950.0,
//!     is_lubricated: false,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("conventional: {:.0} N +/- {}%", result.conventional.preload_n,
//!     result.conventional.uncertainty_percent);
//! println!("analytic: {:.0} N +/- {}%", result.analytic.preload_n,
//!     result.analytic.uncertainty_percent);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::preload::{
    calculate_preload, calculate_preload_range, estimate_uncertainty,
    ANALYTIC_UNCERTAINTY_PERCENT,
};
use crate::calculations::torque::{
    assess_risk_default, calculate_safety_factor, calculate_stress_from_preload,
    calculate_tensile_area, estimate_preload_from_torque, RiskAssessment,
};
use crate::errors::{CalcError, CalcResult};
use crate::materials::implant_systems::{ImplantEntry, ImplantSystemDb};
use crate::units::{Megapascals, Millimeters, NewtonCentimeters, Newtons, SquareMillimeters};

/// Input parameters for a single-screw method comparison.
///
/// Geometry comes in catalog units (millimetres); the conversion to the
/// centimetre-based torque formulas happens inside [`calculate`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Generic Standard",
///   "tightening_torque_ncm": 35.0,
///   "removal_torque_ncm": 29.5,
///   "diameter_mm": 2.0,
///   "thread_pitch_mm": 0.4,
///   "k_factor": 0.2,
///   "yield_strength_mpa": 950.0,
///   "is_lubricated": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    /// User label for this comparison (e.g., the screw or case name)
    pub label: String,

    /// Applied tightening torque (N·cm)
    pub tightening_torque_ncm: f64,

    /// Measured removal torque (N·cm)
    pub removal_torque_ncm: f64,

    /// Nominal screw diameter (mm)
    pub diameter_mm: f64,

    /// Thread pitch (mm)
    pub thread_pitch_mm: f64,

    /// Nut factor (dimensionless)
    pub k_factor: f64,

    /// Screw material yield strength (MPa)
    pub yield_strength_mpa: f64,

    /// Whether the screw is lubricated (drives conventional uncertainty)
    pub is_lubricated: bool,
}

impl ComparisonInput {
    /// Build a comparison input from a catalog entry, estimating the
    /// removal torque as a fraction of the recommended tightening torque.
    pub fn from_entry(entry: &ImplantEntry, removal_factor: f64, is_lubricated: bool) -> Self {
        let torque = entry.screw.recommended_torque_ncm;
        ComparisonInput {
            label: entry.display_name(),
            tightening_torque_ncm: torque,
            removal_torque_ncm: torque * removal_factor,
            diameter_mm: entry.screw.diameter_mm,
            thread_pitch_mm: entry.screw.thread_pitch_mm,
            k_factor: entry.screw.k_factor,
            yield_strength_mpa: entry.screw.yield_strength_mpa,
            is_lubricated,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.diameter_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "diameter_mm",
                self.diameter_mm.to_string(),
                "Diameter must be positive",
            ));
        }
        if self.thread_pitch_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "thread_pitch_mm",
                self.thread_pitch_mm.to_string(),
                "Thread pitch must be positive",
            ));
        }
        if self.k_factor <= 0.0 {
            return Err(CalcError::invalid_input(
                "k_factor",
                self.k_factor.to_string(),
                "k_factor must be positive",
            ));
        }
        if self.yield_strength_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "yield_strength_mpa",
                self.yield_strength_mpa.to_string(),
                "Yield strength must be positive",
            ));
        }
        if self.tightening_torque_ncm <= self.removal_torque_ncm {
            return Err(CalcError::invalid_input(
                "removal_torque_ncm",
                self.removal_torque_ncm.to_string(),
                "Removal torque must be below the tightening torque",
            ));
        }
        Ok(())
    }
}

/// One method's estimate: preload with its uncertainty band, and the
/// stress/safety chain derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodEstimate {
    /// Estimated preload (N)
    pub preload_n: f64,

    /// Method uncertainty (percent)
    pub uncertainty_percent: f64,

    /// Lower preload bound (N)
    pub preload_min_n: f64,

    /// Upper preload bound (N)
    pub preload_max_n: f64,

    /// Axial stress at the estimated preload (MPa)
    pub stress_mpa: f64,

    /// Safety factor against yield
    pub safety_factor: f64,

    /// Risk band for the safety factor
    pub risk: RiskAssessment,
}

/// Results from a single-screw method comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Label copied from the input
    pub label: String,

    /// Tensile stress area used by both methods (mm²)
    pub tensile_area_mm2: f64,

    /// Conventional single-measurement estimate
    pub conventional: MethodEstimate,

    /// Two-measurement analytic estimate
    pub analytic: MethodEstimate,

    /// Whether the analytic preload falls inside the conventional band
    pub analytic_within_conventional_range: bool,

    /// Relative uncertainty reduction, percent:
    /// `(conv − analytic) / conv · 100`
    pub uncertainty_reduction_percent: f64,

    /// Preload difference relative to the conventional estimate, percent:
    /// `(conv − analytic) / conv · 100`
    pub preload_difference_percent: f64,
}

fn method_estimate(
    preload: Newtons,
    uncertainty_percent: f64,
    tensile_area: SquareMillimeters,
    yield_strength: Megapascals,
) -> CalcResult<MethodEstimate> {
    let (min, max) = calculate_preload_range(preload, uncertainty_percent);
    let stress = calculate_stress_from_preload(preload, tensile_area)?;
    let safety_factor = calculate_safety_factor(stress, yield_strength)?;
    let risk = assess_risk_default(safety_factor)?;

    Ok(MethodEstimate {
        preload_n: preload.0,
        uncertainty_percent,
        preload_min_n: min.0,
        preload_max_n: max.0,
        stress_mpa: stress.0,
        safety_factor,
        risk,
    })
}

/// Run both estimation methods for one screw.
///
/// # Errors
///
/// Returns `InvalidInput` when the input fails [`ComparisonInput::validate`].
pub fn calculate(input: &ComparisonInput) -> CalcResult<ComparisonResult> {
    input.validate()?;

    let tightening = NewtonCentimeters(input.tightening_torque_ncm);
    let removal = NewtonCentimeters(input.removal_torque_ncm);
    let diameter = Millimeters(input.diameter_mm);
    let pitch = Millimeters(input.thread_pitch_mm);
    let yield_strength = Megapascals(input.yield_strength_mpa);

    let tensile_area = calculate_tensile_area(diameter, pitch)?;

    let conventional_preload =
        estimate_preload_from_torque(tightening, diameter.into(), input.k_factor)?;
    let (conventional_uncertainty, _) = estimate_uncertainty(tightening, input.is_lubricated);
    let conventional = method_estimate(
        conventional_preload,
        conventional_uncertainty,
        tensile_area,
        yield_strength,
    )?;

    let analytic_preload = calculate_preload(tightening, removal, pitch.into())?;
    let analytic = method_estimate(
        analytic_preload,
        ANALYTIC_UNCERTAINTY_PERCENT,
        tensile_area,
        yield_strength,
    )?;

    let within_range = conventional.preload_min_n <= analytic.preload_n
        && analytic.preload_n <= conventional.preload_max_n;
    let uncertainty_reduction = (conventional_uncertainty - ANALYTIC_UNCERTAINTY_PERCENT)
        / conventional_uncertainty
        * 100.0;
    let preload_difference = (conventional.preload_n - analytic.preload_n)
        / conventional.preload_n
        * 100.0;

    Ok(ComparisonResult {
        label: input.label.clone(),
        tensile_area_mm2: tensile_area.0,
        conventional,
        analytic,
        analytic_within_conventional_range: within_range,
        uncertainty_reduction_percent: uncertainty_reduction,
        preload_difference_percent: preload_difference,
    })
}

/// One catalog entry's comparison row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRow {
    /// System name as stored in the catalog
    pub system: String,

    /// Model name as stored in the catalog
    pub model: String,

    /// Connection geometry, carried through for reporting
    pub connection_type: String,

    /// Full per-screw comparison
    pub result: ComparisonResult,
}

/// Aggregate figures over a catalog analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSummary {
    /// Number of catalog entries analyzed
    pub entry_count: usize,

    /// Mean conventional preload (N)
    pub mean_conventional_preload_n: f64,

    /// Mean analytic preload (N)
    pub mean_analytic_preload_n: f64,

    /// Mean uncertainty reduction (percent)
    pub mean_uncertainty_reduction_percent: f64,

    /// Mean preload difference (percent)
    pub mean_preload_difference_percent: f64,

    /// How many entries had the analytic preload inside the conventional band
    pub entries_within_conventional_range: usize,
}

/// Results of running the comparison across an implant-system catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogAnalysis {
    /// Removal-torque factor the rows were computed with
    pub removal_torque_factor: f64,

    /// Per-entry rows, in stable catalog order
    pub rows: Vec<CatalogRow>,

    /// Aggregates over all rows
    pub summary: CatalogSummary,
}

/// Run the method comparison for every entry in a catalog.
///
/// The removal torque is not in the catalog (it is a per-case
/// measurement), so it is estimated as `removal_factor` times each
/// entry's recommended torque, clinically 0.70-0.95.
///
/// # Errors
///
/// Returns `InvalidInput` when `removal_factor` is outside `(0, 1)`, or
/// when a catalog entry fails spec validation.
pub fn analyze_catalog(
    db: &ImplantSystemDb,
    removal_factor: f64,
    is_lubricated: bool,
) -> CalcResult<CatalogAnalysis> {
    if removal_factor <= 0.0 || removal_factor >= 1.0 {
        return Err(CalcError::invalid_input(
            "removal_factor",
            removal_factor.to_string(),
            "Removal torque factor must be strictly between 0 and 1",
        ));
    }

    let mut rows = Vec::with_capacity(db.len());
    let mut sum_conventional = 0.0;
    let mut sum_analytic = 0.0;
    let mut sum_reduction = 0.0;
    let mut sum_difference = 0.0;
    let mut within_range = 0;

    for entry in db.entries() {
        entry.screw.validate()?;

        let input = ComparisonInput::from_entry(entry, removal_factor, is_lubricated);
        let result = calculate(&input)?;

        sum_conventional += result.conventional.preload_n;
        sum_analytic += result.analytic.preload_n;
        sum_reduction += result.uncertainty_reduction_percent;
        sum_difference += result.preload_difference_percent;
        if result.analytic_within_conventional_range {
            within_range += 1;
        }

        rows.push(CatalogRow {
            system: entry.system.clone(),
            model: entry.model.clone(),
            connection_type: entry.connection_type.clone(),
            result,
        });
    }

    let count = rows.len();
    let denom = count.max(1) as f64;
    let summary = CatalogSummary {
        entry_count: count,
        mean_conventional_preload_n: sum_conventional / denom,
        mean_analytic_preload_n: sum_analytic / denom,
        mean_uncertainty_reduction_percent: sum_reduction / denom,
        mean_preload_difference_percent: sum_difference / denom,
        entries_within_conventional_range: within_range,
    };

    Ok(CatalogAnalysis {
        removal_torque_factor: removal_factor,
        rows,
        summary,
    })
}
