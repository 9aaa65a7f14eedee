//! Catalog tolerance filter

use super::{or_empty, rank, CandidateGeometry, CandidateRecord, Matcher, SearchTarget};
use crate::catalog::CatalogEntry;
use crate::errors::CalcResult;

/// Catalog entries whose Wx or Wy lies within τ of the target, best first
///
/// Returns an empty list for an unusable target.
///
/// # Example
///
/// ```rust
/// use muadil_core::catalog;
/// use muadil_core::profiles::ProfileFamily;
/// use muadil_core::search::{catalog_search, SearchTarget};
///
/// let ipe = catalog::builtin().lookup(ProfileFamily::IBeam, "IPE 200")?;
/// let target = SearchTarget::from(ipe.try_moduli()?);
/// let hits = catalog_search(&catalog::builtin().aggregate(), target, 0.10);
/// assert_eq!(hits[0].score, 0.0);
/// # Ok::<(), muadil_core::errors::CalcError>(())
/// ```
pub fn catalog_search(entries: &[CatalogEntry], target: SearchTarget, tolerance: f64) -> Vec<CandidateRecord> {
    or_empty("catalog", try_catalog_search(entries, target, tolerance))
}

/// [`catalog_search`], reporting why an input was rejected
pub fn try_catalog_search(
    entries: &[CatalogEntry],
    target: SearchTarget,
    tolerance: f64,
) -> CalcResult<Vec<CandidateRecord>> {
    let matcher = Matcher::new(target, tolerance)?;

    let hits = entries
        .iter()
        .filter_map(|entry| {
            matcher.evaluate(
                entry.name.clone(),
                entry.family.tag(),
                entry.moduli,
                CandidateGeometry::Catalog {
                    family: entry.family,
                    name: entry.name.clone(),
                },
            )
        })
        .collect();

    Ok(rank(hits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::equations::SectionModuli;
    use crate::profiles::ProfileFamily;

    fn entry(name: &str, wx: f64, wy: f64) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            family: ProfileFamily::SolidSquare,
            moduli: SectionModuli::new(wx, wy).unwrap(),
        }
    }

    fn ipe200_target() -> SearchTarget {
        let row = catalog::builtin().lookup(ProfileFamily::IBeam, "IPE 200").unwrap();
        SearchTarget::from(row.moduli().unwrap())
    }

    #[test]
    fn test_reference_ranks_first() {
        let hits = catalog_search(&catalog::builtin().aggregate(), ipe200_target(), 0.10);
        assert!(!hits.is_empty());
        assert_eq!(hits[0].score, 0.0);
        assert!(hits.iter().any(|h| h.label == "IPE 200" && h.score == 0.0));
        assert!(hits.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_every_hit_is_in_band() {
        let target = ipe200_target();
        let tolerance = 0.05;
        let matcher = Matcher::new(target, tolerance).unwrap();
        for hit in catalog_search(&catalog::builtin().aggregate(), target, tolerance) {
            let inside = matcher.band_x().contains(hit.wx_mm3) || matcher.band_y().contains(hit.wy_mm3);
            assert!(inside, "{} outside both bands", hit.label);
        }
    }

    #[test]
    fn test_widening_never_shrinks() {
        let entries = catalog::builtin().aggregate();
        let target = ipe200_target();
        let mut previous: Vec<String> = Vec::new();
        for tolerance in [0.0, 0.02, 0.05, 0.10, 0.25, 0.5] {
            let labels: Vec<String> = catalog_search(&entries, target, tolerance)
                .into_iter()
                .map(|h| h.label)
                .collect();
            assert!(labels.len() >= previous.len(), "tolerance {} shrank the set", tolerance);
            assert!(previous.iter().all(|l| labels.contains(l)));
            previous = labels;
        }
    }

    #[test]
    fn test_tiny_target_finds_nothing() {
        let hits = catalog_search(&catalog::builtin().aggregate(), SearchTarget::new(1.0, 1.0), 0.02);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_band_edge() {
        let matcher = Matcher::new(SearchTarget::new(1000.0, 1000.0), 0.1).unwrap();
        let hi = matcher.band_x().hi;
        let entries = vec![
            entry("edge", hi, 1.0),
            entry("beyond", hi * (1.0 + 1e-12), 1.0),
        ];
        let hits = catalog_search(&entries, SearchTarget::new(1000.0, 1000.0), 0.1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "edge");
    }

    #[test]
    fn test_invalid_target_is_empty() {
        let entries = catalog::builtin().aggregate();
        assert!(catalog_search(&entries, SearchTarget::new(0.0, 100.0), 0.1).is_empty());
        assert!(catalog_search(&entries, SearchTarget::new(f64::NAN, 100.0), 0.1).is_empty());
        let err = try_catalog_search(&entries, SearchTarget::new(-5.0, 100.0), 0.1).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SEARCH_INPUT");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let entries = vec![entry("first", 900.0, 1000.0), entry("second", 1100.0, 1000.0)];
        let hits = catalog_search(&entries, SearchTarget::new(1000.0, 1000.0), 0.1);
        let labels: Vec<_> = hits.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second"]);
    }
}
