//! Flat-bar thickness sweep
//!
//! The height is fixed (usually the reference's characteristic height) and the
//! thickness walks the configured integer range, 2 to 100 mm by default.

use super::{or_empty, rank, CandidateGeometry, CandidateRecord, Matcher, SearchTarget};
use crate::catalog::tables::mm;
use crate::equations::{flat_bar_moduli, positive};
use crate::errors::{CalcError, CalcResult};
use crate::profiles::ProfileFamily;
use crate::settings::FlatBarSettings;

/// Flat bars of height `height_mm` matching the target, best first
pub fn flat_bar_search(
    target: SearchTarget,
    height_mm: f64,
    tolerance: f64,
    settings: &FlatBarSettings,
) -> Vec<CandidateRecord> {
    or_empty("flat_bar", try_flat_bar_search(target, height_mm, tolerance, settings))
}

/// [`flat_bar_search`], reporting why an input was rejected
pub fn try_flat_bar_search(
    target: SearchTarget,
    height_mm: f64,
    tolerance: f64,
    settings: &FlatBarSettings,
) -> CalcResult<Vec<CandidateRecord>> {
    let matcher = Matcher::new(target, tolerance)?;
    let h = positive(height_mm).ok_or_else(|| {
        CalcError::invalid_search_input("height_mm", height_mm.to_string(), "Height must be positive")
    })?;

    let mut hits = Vec::new();
    for t in settings.thicknesses_mm() {
        let Some(moduli) = flat_bar_moduli(t, h) else {
            continue;
        };
        let geometry = CandidateGeometry::FlatBar {
            height_mm: h,
            thickness_mm: t,
        };
        if let Some(record) =
            matcher.evaluate(format!("{} x {}", mm(h), mm(t)), ProfileFamily::FlatBar.tag(), moduli, geometry)
        {
            hits.push(record);
        }
    }

    Ok(rank(hits))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_80x7() -> SearchTarget {
        SearchTarget::from(flat_bar_moduli(7.0, 80.0).unwrap())
    }

    #[test]
    fn test_reference_thickness_first() {
        let hits = flat_bar_search(target_80x7(), 80.0, 0.02, &FlatBarSettings::default());
        assert_eq!(hits[0].label, "80 x 7");
        assert_eq!(hits[0].delta_wx_mm3, 0.0);
        assert_eq!(hits[0].delta_wy_mm3, 0.0);
        assert_eq!(
            hits[0].geometry,
            CandidateGeometry::FlatBar {
                height_mm: 80.0,
                thickness_mm: 7.0
            }
        );
    }

    #[test]
    fn test_hits_satisfy_band() {
        let target = target_80x7();
        for tolerance in [0.02, 0.10, 0.30] {
            let matcher = Matcher::new(target, tolerance).unwrap();
            for hit in flat_bar_search(target, 80.0, tolerance, &FlatBarSettings::default()) {
                assert!(
                    matcher.band_x().contains(hit.wx_mm3) || matcher.band_y().contains(hit.wy_mm3),
                    "{} at tolerance {}",
                    hit.label,
                    tolerance
                );
            }
        }
    }

    #[test]
    fn test_ten_percent_is_single_thickness() {
        // Wx grows linearly in t, Wy quadratically: 6 and 8 mm are both >10% away
        let hits = flat_bar_search(target_80x7(), 80.0, 0.10, &FlatBarSettings::default());
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_widening_never_shrinks() {
        let mut previous = 0;
        for tolerance in [0.01, 0.1, 0.2, 0.4, 0.8] {
            let n = flat_bar_search(target_80x7(), 80.0, tolerance, &FlatBarSettings::default()).len();
            assert!(n >= previous);
            previous = n;
        }
        assert!(previous > 1);
    }

    #[test]
    fn test_sweep_range_respected() {
        let settings = FlatBarSettings {
            enabled: true,
            min_thickness_mm: 8,
            max_thickness_mm: 20,
        };
        let hits = flat_bar_search(target_80x7(), 80.0, 0.5, &settings);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| match h.geometry {
            CandidateGeometry::FlatBar { thickness_mm, .. } => (8.0..=20.0).contains(&thickness_mm),
            _ => false,
        }));
    }

    #[test]
    fn test_bad_height_is_empty() {
        let settings = FlatBarSettings::default();
        assert!(flat_bar_search(target_80x7(), 0.0, 0.1, &settings).is_empty());
        assert!(flat_bar_search(target_80x7(), f64::NAN, 0.1, &settings).is_empty());
        assert!(flat_bar_search(SearchTarget::new(0.0, 0.0), 80.0, 0.1, &settings).is_empty());
        let err = try_flat_bar_search(target_80x7(), -80.0, 0.1, &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SEARCH_INPUT");
    }
}
