//! # Equivalence Search
//!
//! Three strategies look for substitutes of a target (Wx, Wy) pair:
//!
//! - [`catalog::catalog_search`] - filters the aggregated catalog
//! - [`flat_bar::flat_bar_search`] - sweeps flat-bar thicknesses at a fixed height
//! - [`tee::tee_search`] - sweeps fabricated T-sections over flange and web plates
//!
//! All three share the same matching and ranking rules, implemented here.
//!
//! ## Matching (OR band)
//!
//! A candidate matches when **either** modulus lies inside the inclusive band
//! `[target·(1−τ), target·(1+τ)]` of its axis. τ is passed to every call.
//!
//! ## Scoring
//!
//! `score = |ΔWx| + |ΔWy|`, summed over both axes even when only one matched.
//! Results are sorted ascending by score; equal scores keep generation order.
//!
//! ## Invalid input
//!
//! Each strategy has a `try_*` form returning [`CalcError::InvalidSearchInput`]
//! for an unusable target, height or thickness window, and a lenient form that
//! logs the reason and returns an empty list.
//!
//! ## Example
//!
//! ```rust
//! use muadil_core::search::{flat_bar, SearchTarget};
//! use muadil_core::settings::FlatBarSettings;
//! use muadil_core::equations::flat_bar_moduli;
//!
//! let target = SearchTarget::from(flat_bar_moduli(7.0, 80.0).unwrap());
//! let hits = flat_bar::flat_bar_search(target, 80.0, 0.02, &FlatBarSettings::default());
//! assert_eq!(hits[0].label, "80 x 7");
//! assert_eq!(hits[0].score, 0.0);
//! ```

pub mod catalog;
pub mod flat_bar;
pub mod tee;

use serde::{Deserialize, Serialize};

use crate::equations::{positive, SectionModuli};
use crate::errors::{CalcError, CalcResult};
use crate::profiles::ProfileFamily;

pub use catalog::catalog_search;
pub use flat_bar::flat_bar_search;
pub use tee::tee_search;

/// Target section moduli (mm³), as given by the caller
///
/// Unlike [`SectionModuli`] this may hold unusable values; searches reject
/// them before scanning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchTarget {
    pub wx_mm3: f64,
    pub wy_mm3: f64,
}

impl SearchTarget {
    pub fn new(wx_mm3: f64, wy_mm3: f64) -> Self {
        SearchTarget { wx_mm3, wy_mm3 }
    }
}

impl From<SectionModuli> for SearchTarget {
    fn from(m: SectionModuli) -> Self {
        SearchTarget::new(m.wx_mm3, m.wy_mm3)
    }
}

/// Inclusive relative window around a target value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    pub lo: f64,
    pub hi: f64,
}

impl ToleranceBand {
    /// `[target·(1−τ), target·(1+τ)]`
    pub fn around(target: f64, tolerance: f64) -> Self {
        ToleranceBand {
            lo: target * (1.0 - tolerance),
            hi: target * (1.0 + tolerance),
        }
    }

    /// Whether `value` lies inside the band, edges included
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }
}

/// What a candidate is, with the dimensions needed to build it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CandidateGeometry {
    /// A catalog profile
    Catalog { family: ProfileFamily, name: String },
    /// A flat bar from the thickness sweep
    FlatBar { height_mm: f64, thickness_mm: f64 },
    /// A fabricated T-section: flange plate on a web plate
    Tee {
        flange_width_mm: f64,
        flange_thickness_mm: f64,
        web_height_mm: f64,
        web_thickness_mm: f64,
    },
}

/// One ranked substitute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Display label ("IPE 200", "80 x 7", "T (flange 40x5, web 75x5)")
    pub label: String,
    /// Short family tag ("IPE", "Flat Bar", "T-Section")
    pub tag: String,
    pub wx_mm3: f64,
    pub wy_mm3: f64,
    /// |Wx − target Wx|
    pub delta_wx_mm3: f64,
    /// |Wy − target Wy|
    pub delta_wy_mm3: f64,
    /// ΔWx + ΔWy
    pub score: f64,
    pub geometry: CandidateGeometry,
}

/// OR-band matcher for one validated target and tolerance
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    target: SectionModuli,
    band_x: ToleranceBand,
    band_y: ToleranceBand,
}

impl Matcher {
    /// Validate a target and tolerance
    ///
    /// Both moduli must be positive and finite; τ must be finite and
    /// non-negative.
    pub fn new(target: SearchTarget, tolerance: f64) -> CalcResult<Self> {
        let wx = positive(target.wx_mm3).ok_or_else(|| {
            CalcError::invalid_search_input("target.wx", target.wx_mm3.to_string(), "Target Wx must be positive")
        })?;
        let wy = positive(target.wy_mm3).ok_or_else(|| {
            CalcError::invalid_search_input("target.wy", target.wy_mm3.to_string(), "Target Wy must be positive")
        })?;
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(CalcError::invalid_search_input(
                "tolerance",
                tolerance.to_string(),
                "Tolerance must be a non-negative number",
            ));
        }
        let target = SectionModuli::new(wx, wy).ok_or_else(|| CalcError::Internal {
            message: "validated target rejected".to_string(),
        })?;

        Ok(Matcher {
            target,
            band_x: ToleranceBand::around(wx, tolerance),
            band_y: ToleranceBand::around(wy, tolerance),
        })
    }

    pub fn target(&self) -> SectionModuli {
        self.target
    }

    pub fn band_x(&self) -> ToleranceBand {
        self.band_x
    }

    pub fn band_y(&self) -> ToleranceBand {
        self.band_y
    }

    /// Whether either modulus is inside its band
    pub fn matches(&self, moduli: &SectionModuli) -> bool {
        self.band_x.contains(moduli.wx_mm3) || self.band_y.contains(moduli.wy_mm3)
    }

    /// A scored record if `moduli` matches, `None` otherwise
    pub fn evaluate(
        &self,
        label: String,
        tag: &str,
        moduli: SectionModuli,
        geometry: CandidateGeometry,
    ) -> Option<CandidateRecord> {
        if !self.matches(&moduli) {
            return None;
        }
        let delta_wx = (moduli.wx_mm3 - self.target.wx_mm3).abs();
        let delta_wy = (moduli.wy_mm3 - self.target.wy_mm3).abs();
        Some(CandidateRecord {
            label,
            tag: tag.to_string(),
            wx_mm3: moduli.wx_mm3,
            wy_mm3: moduli.wy_mm3,
            delta_wx_mm3: delta_wx,
            delta_wy_mm3: delta_wy,
            score: delta_wx + delta_wy,
            geometry,
        })
    }
}

/// Sort ascending by score, keeping generation order for ties
pub fn rank(mut records: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
    records.sort_by(|a, b| a.score.total_cmp(&b.score));
    records
}

/// Unwrap a strategy result, logging and emptying on invalid input
pub(crate) fn or_empty(strategy: &str, result: CalcResult<Vec<CandidateRecord>>) -> Vec<CandidateRecord> {
    match result {
        Ok(records) => {
            tracing::debug!(strategy, hits = records.len(), "search finished");
            records
        }
        Err(e) => {
            tracing::debug!(strategy, error = %e, "search skipped");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str, score: f64) -> CandidateRecord {
        CandidateRecord {
            label: label.to_string(),
            tag: "test".to_string(),
            wx_mm3: 1.0,
            wy_mm3: 1.0,
            delta_wx_mm3: score,
            delta_wy_mm3: 0.0,
            score,
            geometry: CandidateGeometry::FlatBar {
                height_mm: 1.0,
                thickness_mm: 1.0,
            },
        }
    }

    #[test]
    fn test_band_edges_inclusive() {
        let band = ToleranceBand::around(1000.0, 0.1);
        assert!(band.contains(band.lo));
        assert!(band.contains(band.hi));
        assert!(!band.contains(band.hi * (1.0 + 1e-12)));
        assert!(!band.contains(band.lo * (1.0 - 1e-12)));
    }

    #[test]
    fn test_matcher_edge_of_band() {
        let m = Matcher::new(SearchTarget::new(1000.0, 500.0), 0.1).unwrap();
        let at_edge = SectionModuli::new(m.band_x().hi, 10.0).unwrap();
        let beyond = SectionModuli::new(m.band_x().hi * (1.0 + 1e-12), 10.0).unwrap();
        assert!(m.matches(&at_edge));
        assert!(!m.matches(&beyond));
    }

    #[test]
    fn test_or_rule_and_unconditional_score() {
        let m = Matcher::new(SearchTarget::new(1000.0, 500.0), 0.1).unwrap();
        // Wx matches, Wy far off: kept, and the Wy miss still counts
        let rec = m
            .evaluate(
                "x".to_string(),
                "test",
                SectionModuli::new(1050.0, 5000.0).unwrap(),
                CandidateGeometry::FlatBar {
                    height_mm: 1.0,
                    thickness_mm: 1.0,
                },
            )
            .unwrap();
        assert_eq!(rec.delta_wx_mm3, 50.0);
        assert_eq!(rec.delta_wy_mm3, 4500.0);
        assert_eq!(rec.score, 4550.0);

        assert!(!m.matches(&SectionModuli::new(2000.0, 2000.0).unwrap()));
    }

    #[test]
    fn test_invalid_targets_rejected() {
        for (wx, wy) in [(0.0, 1.0), (1.0, -1.0), (f64::NAN, 1.0), (1.0, f64::INFINITY)] {
            let err = Matcher::new(SearchTarget::new(wx, wy), 0.1).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_SEARCH_INPUT");
            assert!(err.is_recoverable());
        }
        assert!(Matcher::new(SearchTarget::new(1.0, 1.0), -0.1).is_err());
        assert!(Matcher::new(SearchTarget::new(1.0, 1.0), f64::NAN).is_err());
    }

    #[test]
    fn test_rank_is_stable() {
        let ranked = rank(vec![
            record("c", 3.0),
            record("a1", 1.0),
            record("b", 2.0),
            record("a2", 1.0),
        ]);
        let labels: Vec<_> = ranked.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["a1", "a2", "b", "c"]);
    }

    #[test]
    fn test_candidate_json_shape() {
        let json = serde_json::to_value(record("80 x 7", 0.0)).unwrap();
        assert_eq!(json["geometry"]["kind"], "FlatBar");
        assert_eq!(json["label"], "80 x 7");
    }
}
