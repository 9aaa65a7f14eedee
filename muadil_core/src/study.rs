//! # Substitute Study
//!
//! A study takes one reference profile and runs the whole pipeline on it:
//!
//! 1. resolve the reference (catalog row, manual flat bar or custom row)
//! 2. compute its area, weight and section moduli
//! 3. derive the search height H and T-section thickness window
//! 4. run the enabled strategies with the configured tolerance
//!
//! The result is a self-contained, JSON-serializable record. It gets a fresh
//! id and timestamp so exported results can be told apart; nothing is stored.
//!
//! ## Example
//!
//! ```rust
//! use muadil_core::catalog;
//! use muadil_core::profiles::ProfileFamily;
//! use muadil_core::settings::SearchSettings;
//! use muadil_core::study::{Reference, Study};
//!
//! let study = Study::new(Reference::catalog(ProfileFamily::Pipe, "DN 50 SCH 40"));
//! let result = study.run(&SearchSettings::default(), catalog::builtin())?;
//!
//! assert_eq!(result.moduli.wx_mm3, result.moduli.wy_mm3);
//! assert!(result.weight_kg > 30.0);
//! # Ok::<(), muadil_core::errors::CalcError>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::tables::mm;
use crate::catalog::Catalog;
use crate::equations::{positive, SectionModuli};
use crate::errors::{CalcError, CalcResult};
use crate::materials::Material;
use crate::profiles::family::fields::{HEIGHT, THICKNESS};
use crate::profiles::{Dimensions, ProfileFamily, ProfileRow, ThicknessBasis};
use crate::search::tee::ThicknessRange;
use crate::search::{catalog_search, flat_bar_search, tee_search, CandidateRecord, SearchTarget};
use crate::settings::SearchSettings;
use crate::units::{Millimeters, SqMm};
use crate::weight::member_weight;

/// Default member length (mm)
pub const DEFAULT_LENGTH_MM: f64 = 6000.0;

/// The profile a study starts from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source")]
pub enum Reference {
    /// A row of the catalog, by family and name
    Catalog { family: ProfileFamily, name: String },
    /// A flat bar with user-entered dimensions
    FlatBar { height_mm: f64, thickness_mm: f64 },
    /// Any row with user-entered dimensions
    Custom { row: ProfileRow },
}

impl Reference {
    pub fn catalog(family: ProfileFamily, name: impl Into<String>) -> Self {
        Reference::Catalog {
            family,
            name: name.into(),
        }
    }

    pub fn flat_bar(height_mm: f64, thickness_mm: f64) -> Self {
        Reference::FlatBar {
            height_mm,
            thickness_mm,
        }
    }

    /// The concrete row this reference stands for
    pub fn resolve(&self, catalog: &Catalog) -> CalcResult<ProfileRow> {
        match self {
            Reference::Catalog { family, name } => catalog.lookup(*family, name).cloned(),
            Reference::FlatBar {
                height_mm,
                thickness_mm,
            } => Ok(ProfileRow::new(
                ProfileFamily::FlatBar,
                format!("{} x {}", mm(*height_mm), mm(*thickness_mm)),
                Dimensions::new()
                    .with(HEIGHT, *height_mm)
                    .with(THICKNESS, *thickness_mm),
            )),
            Reference::Custom { row } => Ok(row.clone()),
        }
    }
}

/// One strategy's matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchList {
    /// Whether the strategy ran
    pub enabled: bool,
    /// Matches found before any display truncation
    pub total: usize,
    /// Matches, best first
    pub candidates: Vec<CandidateRecord>,
}

impl MatchList {
    fn skipped() -> Self {
        MatchList {
            enabled: false,
            total: 0,
            candidates: Vec::new(),
        }
    }

    fn from_hits(mut hits: Vec<CandidateRecord>, max_results: Option<usize>) -> Self {
        let total = hits.len();
        if let Some(limit) = max_results {
            hits.truncate(limit);
        }
        MatchList {
            enabled: true,
            total,
            candidates: hits,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Everything a study produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyResult {
    pub id: Uuid,
    pub created: DateTime<Utc>,

    /// The resolved reference row
    pub reference: ProfileRow,
    pub material: Material,
    pub length_mm: f64,

    /// Cross-sectional area (mm²)
    pub area_mm2: f64,
    /// Member mass for the given length (kg)
    pub weight_kg: f64,
    /// Reference section moduli, the search target
    pub moduli: SectionModuli,

    /// Tolerance τ the searches used
    pub tolerance: f64,
    /// Height H of the parametric sweeps (mm)
    pub search_height_mm: f64,
    /// Flange/web thickness window of the T-section sweep (mm)
    pub tee_thickness_mm: (f64, f64),

    pub catalog_matches: MatchList,
    pub flat_bar_matches: MatchList,
    pub tee_matches: MatchList,

    /// Version label of the catalog searched
    pub catalog_version: Option<String>,
}

/// Study input: reference, material and member length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    pub reference: Reference,
    #[serde(default)]
    pub material: Material,
    #[serde(default = "default_length_mm")]
    pub length_mm: f64,
}

fn default_length_mm() -> f64 {
    DEFAULT_LENGTH_MM
}

impl Study {
    /// Steel, 6 m
    pub fn new(reference: Reference) -> Self {
        Study {
            reference,
            material: Material::default(),
            length_mm: DEFAULT_LENGTH_MM,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_length_mm(mut self, length_mm: f64) -> Self {
        self.length_mm = length_mm;
        self
    }

    /// Validate inputs
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.length_mm.is_finite() && self.length_mm >= 0.0) {
            return Err(CalcError::invalid_input(
                "length_mm",
                self.length_mm.to_string(),
                "Length must be zero or positive",
            ));
        }
        if positive(self.material.density().0).is_none() {
            return Err(CalcError::invalid_input(
                "material",
                self.material.display_name(),
                "Density must be positive",
            ));
        }
        Ok(())
    }

    /// Run the study against `catalog`
    ///
    /// Fails with [`CalcError::UndefinedGeometry`] when the reference itself
    /// has no valid cross-section, and with `InvalidInput` for bad settings,
    /// length or density. A strategy that cannot run on this reference
    /// contributes an empty list instead of failing the study.
    pub fn run(&self, settings: &SearchSettings, catalog: &Catalog) -> CalcResult<StudyResult> {
        self.validate()?;
        settings.validate()?;

        let reference = self.reference.resolve(catalog)?;
        let moduli = reference.try_moduli()?;
        let area_mm2 = reference.area_mm2().ok_or_else(|| {
            CalcError::undefined_geometry(reference.family.tag(), format!("'{}' has no valid area", reference.name))
        })?;
        let basis = reference.search_basis().ok_or_else(|| {
            CalcError::undefined_geometry(
                reference.family.tag(),
                format!("'{}' has no search height", reference.name),
            )
        })?;
        let weight = member_weight(SqMm(area_mm2), Millimeters(self.length_mm), self.material.density())?;

        let tee_thickness_mm = match basis.thickness {
            ThicknessBasis::Scaled { thickness_mm } => (thickness_mm, 2.0 * thickness_mm),
            ThicknessBasis::Solid => settings.tee.solid_thickness_range_mm,
        };

        tracing::debug!(
            reference = %reference,
            %moduli,
            height = basis.height_mm,
            tolerance = settings.tolerance,
            "running study"
        );

        let target = SearchTarget::from(moduli);
        let tolerance = settings.tolerance;
        let max_results = settings.max_results;

        let catalog_matches =
            MatchList::from_hits(catalog_search(&catalog.aggregate(), target, tolerance), max_results);

        let flat_bar_matches = if settings.flat_bar.enabled {
            MatchList::from_hits(
                flat_bar_search(target, basis.height_mm, tolerance, &settings.flat_bar),
                max_results,
            )
        } else {
            MatchList::skipped()
        };

        let tee_matches = if settings.tee.enabled {
            let (t_min, t_max) = tee_thickness_mm;
            MatchList::from_hits(
                tee_search(
                    target,
                    basis.height_mm,
                    ThicknessRange::new(t_min, t_max),
                    tolerance,
                    &settings.tee,
                ),
                max_results,
            )
        } else {
            MatchList::skipped()
        };

        Ok(StudyResult {
            id: Uuid::new_v4(),
            created: Utc::now(),
            reference,
            material: self.material,
            length_mm: self.length_mm,
            area_mm2,
            weight_kg: weight.0,
            moduli,
            tolerance,
            search_height_mm: basis.height_mm,
            tee_thickness_mm,
            catalog_matches,
            flat_bar_matches,
            tee_matches,
            catalog_version: catalog.version.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::equations::pipe_area;

    #[test]
    fn test_pipe_reference() {
        let result = Study::new(Reference::catalog(ProfileFamily::Pipe, "DN 50 SCH 40"))
            .run(&SearchSettings::default(), catalog::builtin())
            .unwrap();

        assert!((result.moduli.wx_mm3 - 9175.69).abs() < 0.5);
        assert_eq!(result.moduli.wx_mm3, result.moduli.wy_mm3);

        let area = pipe_area(60.3, 3.91).unwrap();
        assert!((result.area_mm2 - area).abs() < 1e-9);
        let expected_kg = area / 1e6 * 6.0 * 7850.0;
        assert!(((result.weight_kg - expected_kg) / expected_kg).abs() < 1e-12);

        assert_eq!(result.search_height_mm, 60.3);
        assert_eq!(result.tee_thickness_mm, (3.91, 7.82));
        assert!(result
            .catalog_matches
            .candidates
            .iter()
            .any(|c| c.label == "DN 50 SCH 40" && c.score == 0.0));
        assert_eq!(result.catalog_version.as_deref(), Some("builtin"));
    }

    #[test]
    fn test_manual_flat_bar() {
        let result = Study::new(Reference::flat_bar(80.0, 7.0))
            .run(&SearchSettings::default(), catalog::builtin())
            .unwrap();

        assert_eq!(result.reference.name, "80 x 7");
        assert_eq!(result.area_mm2, 560.0);
        assert_eq!(result.flat_bar_matches.candidates[0].label, "80 x 7");
        assert_eq!(result.flat_bar_matches.candidates[0].score, 0.0);
        // the [t, 2t] window around 7 mm holds no matching tee
        assert_eq!(result.tee_thickness_mm, (7.0, 14.0));
        assert!(result.tee_matches.enabled);
        assert!(result.tee_matches.is_empty());
    }

    #[test]
    fn test_solid_reference_uses_fixed_window() {
        let result = Study::new(Reference::catalog(ProfileFamily::SolidRound, "Ø40"))
            .run(&SearchSettings::default(), catalog::builtin())
            .unwrap();
        assert_eq!(result.tee_thickness_mm, (4.0, 10.0));
        assert_eq!(result.search_height_mm, 40.0);
    }

    #[test]
    fn test_toggles_and_truncation() {
        let mut settings = SearchSettings::default().with_tolerance(0.3);
        settings.tee.enabled = false;
        settings.max_results = Some(2);

        let result = Study::new(Reference::catalog(ProfileFamily::IBeam, "IPE 200"))
            .run(&settings, catalog::builtin())
            .unwrap();

        assert!(!result.tee_matches.enabled);
        assert!(result.tee_matches.is_empty());
        assert!(result.catalog_matches.candidates.len() <= 2);
        assert!(result.catalog_matches.total >= result.catalog_matches.candidates.len());
    }

    #[test]
    fn test_undefined_reference() {
        let err = Study::new(Reference::flat_bar(80.0, 0.0))
            .run(&SearchSettings::default(), catalog::builtin())
            .unwrap_err();
        assert_eq!(err.error_code(), "UNDEFINED_GEOMETRY");

        let row = ProfileRow::new(
            ProfileFamily::Pipe,
            "solid pipe",
            Dimensions::new().with("OD", 60.0).with("t", 30.0),
        );
        let err = Study::new(Reference::Custom { row })
            .run(&SearchSettings::default(), catalog::builtin())
            .unwrap_err();
        assert_eq!(err.error_code(), "UNDEFINED_GEOMETRY");
    }

    #[test]
    fn test_unknown_profile_and_bad_inputs() {
        let settings = SearchSettings::default();
        let err = Study::new(Reference::catalog(ProfileFamily::IBeam, "IPE 999"))
            .run(&settings, catalog::builtin())
            .unwrap_err();
        assert_eq!(err.error_code(), "PROFILE_NOT_FOUND");

        let study = Study::new(Reference::flat_bar(80.0, 7.0)).with_length_mm(-1.0);
        assert!(study.run(&settings, catalog::builtin()).is_err());

        let bad_settings = SearchSettings::default().with_tolerance(1.5);
        let study = Study::new(Reference::flat_bar(80.0, 7.0));
        assert_eq!(
            study.run(&bad_settings, catalog::builtin()).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_result_json() {
        let result = Study::new(Reference::flat_bar(80.0, 7.0))
            .with_material(Material::Aluminium)
            .run(&SearchSettings::default(), catalog::builtin())
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["material"]["type"], "Aluminium");
        assert_eq!(json["reference"]["family"], "FlatBar");
        assert!(json["id"].is_string());
    }
}
