//! Implant Systems Catalog
//!
//! Reference screw specifications for commercial dental implant systems.
//! This module provides the data structures and lookup functions the
//! calculation layer reads its default parameters from.
//!
//! ## Data Shape
//!
//! Each catalog entry maps a (system, model) pair to one standard abutment
//! screw with exactly six scalar fields: nominal diameter (mm), thread
//! pitch (mm), material (informational string), yield strength (MPa), nut
//! factor, and manufacturer-recommended torque (N·cm). The calculation
//! layer never interprets anything beyond these fields, and the catalog is
//! read-only after construction.
//!
//! ## Example
//!
//! ```rust
//! use preload_core::materials::implant_systems::catalog;
//!
//! let entry = catalog().lookup("Straumann", "Bone_Level").unwrap();
//! assert!(entry.screw.recommended_torque_ncm > 0.0);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{CalcError, CalcResult};
use crate::units::{Centimeters, Megapascals, Millimeters, NewtonCentimeters};

/// Specification of a single abutment screw.
///
/// Field names serialize to the catalog document's JSON keys
/// (`diameter`, `thread_pitch`, `material`, `yield_strength`, `K_factor`,
/// `recommended_torque`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrewSpec {
    /// Nominal screw diameter (mm)
    #[serde(rename = "diameter")]
    pub diameter_mm: f64,

    /// Thread pitch (mm)
    #[serde(rename = "thread_pitch")]
    pub thread_pitch_mm: f64,

    /// Screw material, informational only
    pub material: String,

    /// Material yield strength (MPa)
    #[serde(rename = "yield_strength")]
    pub yield_strength_mpa: f64,

    /// Nut factor (dimensionless, typ. 0.15-0.3)
    #[serde(rename = "K_factor")]
    pub k_factor: f64,

    /// Manufacturer-recommended tightening torque (N·cm)
    #[serde(rename = "recommended_torque")]
    pub recommended_torque_ncm: f64,
}

impl ScrewSpec {
    /// Validate that every numeric field is positive.
    pub fn validate(&self) -> CalcResult<()> {
        let checks = [
            ("diameter_mm", self.diameter_mm),
            ("thread_pitch_mm", self.thread_pitch_mm),
            ("yield_strength_mpa", self.yield_strength_mpa),
            ("k_factor", self.k_factor),
            ("recommended_torque_ncm", self.recommended_torque_ncm),
        ];
        for (field, value) in checks {
            if value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Screw specification values must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Nominal diameter as a typed millimetre length
    pub fn diameter(&self) -> Millimeters {
        Millimeters(self.diameter_mm)
    }

    /// Nominal diameter in centimetres, as the nut-factor formula takes it
    pub fn diameter_cm(&self) -> Centimeters {
        self.diameter().into()
    }

    /// Thread pitch as a typed millimetre length
    pub fn thread_pitch(&self) -> Millimeters {
        Millimeters(self.thread_pitch_mm)
    }

    /// Thread pitch in centimetres, as the preload formula takes it
    pub fn thread_pitch_cm(&self) -> Centimeters {
        self.thread_pitch().into()
    }

    /// Yield strength as a typed stress
    pub fn yield_strength(&self) -> Megapascals {
        Megapascals(self.yield_strength_mpa)
    }

    /// Recommended tightening torque as a typed torque
    pub fn recommended_torque(&self) -> NewtonCentimeters {
        NewtonCentimeters(self.recommended_torque_ncm)
    }
}

/// One catalog entry: a system/model pair and its standard screw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplantEntry {
    /// Manufacturer/system name (e.g., "Nobel_Biocare")
    pub system: String,

    /// Model or platform line (e.g., "Branemark_External")
    pub model: String,

    /// Implant-abutment connection geometry, informational
    pub connection_type: String,

    /// Standard abutment screw specification
    pub screw: ScrewSpec,
}

impl ImplantEntry {
    /// Human-readable "System Model" name (underscores become spaces)
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.system.replace('_', " "),
            self.model.replace('_', " ")
        )
    }
}

impl std::fmt::Display for ImplantEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {:.1} mm x {:.2} mm, {} N-cm)",
            self.display_name(),
            self.screw.material,
            self.screw.diameter_mm,
            self.screw.thread_pitch_mm,
            self.screw.recommended_torque_ncm
        )
    }
}

/// Implant systems database.
///
/// Holds all entries in memory for fast lookup, indexed by a normalized
/// "SYSTEM/MODEL" key. Lookups are case-insensitive and treat spaces and
/// underscores as equivalent.
#[derive(Debug, Clone, Default)]
pub struct ImplantSystemDb {
    /// Entries indexed by normalized key
    entries: HashMap<String, ImplantEntry>,

    /// Entry keys grouped by normalized system name
    by_system: HashMap<String, Vec<String>>,

    /// Catalog document version (e.g., "1.0.0")
    pub version: Option<String>,
}

/// Normalize a system or model name for keying
fn normalize(name: &str) -> String {
    name.trim().to_uppercase().replace(' ', "_")
}

impl ImplantSystemDb {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry into the database
    pub fn insert(&mut self, entry: ImplantEntry) {
        let system_key = normalize(&entry.system);
        let key = format!("{}/{}", system_key, normalize(&entry.model));

        self.entries.insert(key.clone(), entry);
        self.by_system.entry(system_key).or_default().push(key);
    }

    /// Look up an entry by system and model name.
    ///
    /// Matching is case-insensitive; spaces and underscores are
    /// interchangeable ("Nobel Biocare" finds "Nobel_Biocare").
    pub fn lookup(&self, system: &str, model: &str) -> CalcResult<&ImplantEntry> {
        let key = format!("{}/{}", normalize(system), normalize(model));
        self.entries.get(&key).ok_or_else(|| {
            CalcError::system_not_found(format!("{} {}", system, model))
        })
    }

    /// All entries for one system
    pub fn models_of(&self, system: &str) -> Vec<&ImplantEntry> {
        self.by_system
            .get(&normalize(system))
            .map(|keys| keys.iter().filter_map(|k| self.entries.get(k)).collect())
            .unwrap_or_default()
    }

    /// All normalized system names in the database
    pub fn system_names(&self) -> Vec<&str> {
        self.by_system.keys().map(|s| s.as_str()).collect()
    }

    /// All entries, sorted by system/model key for stable reporting order
    pub fn entries(&self) -> Vec<&ImplantEntry> {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        keys.iter().filter_map(|k| self.entries.get(*k)).collect()
    }

    /// Search for entries whose normalized key starts with a pattern
    pub fn search(&self, pattern: &str) -> Vec<&ImplantEntry> {
        let pattern = normalize(pattern);
        let mut hits: Vec<(&String, &ImplantEntry)> = self
            .entries
            .iter()
            .filter(|(k, _)| k.starts_with(&pattern))
            .collect();
        hits.sort_by(|a, b| a.0.cmp(b.0));
        hits.into_iter().map(|(_, v)| v).collect()
    }

    /// Get the number of entries in the database
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the database is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a catalog document in the upstream JSON shape:
    ///
    /// ```json
    /// {
    ///   "metadata": { "version": "1.0.0" },
    ///   "implant_systems": {
    ///     "Generic": {
    ///       "Standard": {
    ///         "connection_type": "Generic",
    ///         "screws": {
    ///           "standard": {
    ///             "diameter": 2.0,
    ///             "thread_pitch": 0.4,
    ///             "material": "Titanium Alloy",
    ///             "yield_strength": 950,
    ///             "K_factor": 0.2,
    ///             "recommended_torque": 35
    ///           }
    ///         }
    ///       }
    ///     }
    ///   }
    /// }
    /// ```
    ///
    /// Only the "standard" screw of each model is read.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let doc: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| CalcError::serialization_error(e.to_string()))?;

        let mut db = ImplantSystemDb::new();
        db.version = doc.metadata.and_then(|m| m.version);

        for (system, models) in doc.implant_systems {
            for (model, record) in models {
                let screw = record.screws.get("standard").cloned().ok_or_else(|| {
                    CalcError::serialization_error(format!(
                        "model '{}/{}' has no 'standard' screw",
                        system, model
                    ))
                })?;
                db.insert(ImplantEntry {
                    system: system.clone(),
                    model,
                    connection_type: record.connection_type,
                    screw,
                });
            }
        }

        Ok(db)
    }
}

/// Upstream catalog document root
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    metadata: Option<DocumentMetadata>,
    implant_systems: HashMap<String, HashMap<String, ModelRecord>>,
}

#[derive(Debug, Deserialize)]
struct DocumentMetadata {
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelRecord {
    connection_type: String,
    screws: HashMap<String, ScrewSpec>,
}

// ============================================================================
// Built-in Reference Systems (for use without a catalog document)
// ============================================================================

/// Get a database with common implant systems pre-loaded.
///
/// Screw values follow published manufacturer specifications and the
/// usual clinical ranges: torques 20-35 N·cm, diameters 1.8-2.0 mm,
/// pitches 0.35-0.4 mm, titanium-alloy yield strengths 880-1050 MPa.
pub fn builtin_reference_systems() -> ImplantSystemDb {
    let mut db = ImplantSystemDb::new();

    let entries = [
        // (system, model, connection, diameter mm, pitch mm, material, yield MPa, K, torque N·cm)
        ("Nobel_Biocare", "Branemark_External", "External Hex", 2.0, 0.4, "Gold-coated Ti-6Al-4V", 950.0, 0.2, 35.0),
        ("Nobel_Biocare", "Active_Internal", "Internal Conical", 2.0, 0.4, "Ti-6Al-4V ELI", 1034.0, 0.2, 35.0),
        ("Straumann", "Bone_Level", "CrossFit Internal", 1.8, 0.35, "Ti-6Al-4V", 1050.0, 0.2, 35.0),
        ("Straumann", "Tissue_Level", "synOcta Internal Octagon", 1.8, 0.35, "Ti-6Al-4V", 1050.0, 0.2, 35.0),
        ("Dentsply_Astra", "OsseoSpeed_EV", "Internal Conical", 2.0, 0.4, "Ti-6Al-4V", 880.0, 0.25, 25.0),
        ("Camlog", "Screw_Line", "Tube-in-Tube", 1.8, 0.35, "Ti-6Al-4V", 880.0, 0.2, 20.0),
        ("Zimmer_Biomet", "Tapered_Screw_Vent", "Internal Hex", 2.0, 0.4, "Ti-6Al-4V", 950.0, 0.2, 30.0),
        ("Generic", "Standard", "Generic", 2.0, 0.4, "Titanium Alloy", 950.0, 0.2, 35.0),
    ];

    for (system, model, connection, diameter, pitch, material, yield_mpa, k, torque) in entries {
        db.insert(ImplantEntry {
            system: system.to_string(),
            model: model.to_string(),
            connection_type: connection.to_string(),
            screw: ScrewSpec {
                diameter_mm: diameter,
                thread_pitch_mm: pitch,
                material: material.to_string(),
                yield_strength_mpa: yield_mpa,
                k_factor: k,
                recommended_torque_ncm: torque,
            },
        });
    }

    db.version = Some("builtin-reference".to_string());
    db
}

static CATALOG: Lazy<ImplantSystemDb> = Lazy::new(builtin_reference_systems);

/// Shared read-only built-in catalog.
///
/// Built lazily on first access; safe to read from any thread.
pub fn catalog() -> &'static ImplantSystemDb {
    &CATALOG
}
