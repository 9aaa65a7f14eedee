//! Fabricated T-section sweep
//!
//! For a fixed overall height H the sweep tries every flange thickness,
//! web thickness and flange width on the configured grid:
//!
//! ```text
//! for t_f in thicknesses ∩ [t_min, t_max]
//!   for t_w in thicknesses ∩ [t_min, t_max]
//!     h_w = H − t_f                      (skipped if ≤ 0)
//!     for b_f in flange widths(H)
//!       evaluate T(b_f, t_f, t_w, h_w)
//! ```
//!
//! Generation order is the tie-break of the final ranking.

use super::{or_empty, rank, CandidateGeometry, CandidateRecord, Matcher, SearchTarget};
use crate::catalog::tables::mm;
use crate::equations::{positive, tee_properties};
use crate::errors::{CalcError, CalcResult};
use crate::settings::TeeSettings;

/// Tag shown for T-section candidates
pub const TEE_TAG: &str = "T-Section";

/// Thickness window for flange and web plates (mm, inclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThicknessRange {
    pub min_mm: f64,
    pub max_mm: f64,
}

impl ThicknessRange {
    pub fn new(min_mm: f64, max_mm: f64) -> Self {
        ThicknessRange { min_mm, max_mm }
    }
}

/// T-sections of overall height `height_mm` matching the target, best first
///
/// # Example
///
/// ```rust
/// use muadil_core::equations::flat_bar_moduli;
/// use muadil_core::search::tee::{tee_search, ThicknessRange};
/// use muadil_core::search::SearchTarget;
/// use muadil_core::settings::TeeSettings;
///
/// let target = SearchTarget::from(flat_bar_moduli(7.0, 80.0).unwrap());
/// let hits = tee_search(target, 80.0, ThicknessRange::new(4.0, 14.0), 0.10, &TeeSettings::default());
/// assert_eq!(hits[0].label, "T (flange 40x4, web 76x5)");
/// ```
pub fn tee_search(
    target: SearchTarget,
    height_mm: f64,
    thickness: ThicknessRange,
    tolerance: f64,
    settings: &TeeSettings,
) -> Vec<CandidateRecord> {
    or_empty("tee", try_tee_search(target, height_mm, thickness, tolerance, settings))
}

/// [`tee_search`], reporting why an input was rejected
pub fn try_tee_search(
    target: SearchTarget,
    height_mm: f64,
    thickness: ThicknessRange,
    tolerance: f64,
    settings: &TeeSettings,
) -> CalcResult<Vec<CandidateRecord>> {
    let matcher = Matcher::new(target, tolerance)?;
    settings.validate().map_err(|e| match e {
        CalcError::InvalidInput { field, value, reason } => CalcError::InvalidSearchInput { field, value, reason },
        other => other,
    })?;

    let h = positive(height_mm).ok_or_else(|| {
        CalcError::invalid_search_input("height_mm", height_mm.to_string(), "Height must be positive")
    })?;
    let t_min = positive(thickness.min_mm).ok_or_else(|| {
        CalcError::invalid_search_input(
            "thickness.min_mm",
            thickness.min_mm.to_string(),
            "Minimum thickness must be positive",
        )
    })?;
    if !(thickness.max_mm >= t_min) {
        return Err(CalcError::invalid_search_input(
            "thickness.max_mm",
            thickness.max_mm.to_string(),
            format!("Maximum thickness is below the minimum ({})", t_min),
        ));
    }

    let plates = settings.thicknesses_in(t_min, thickness.max_mm);
    if plates.is_empty() {
        return Err(CalcError::invalid_search_input(
            "thickness",
            format!("[{}, {}]", t_min, thickness.max_mm),
            "No candidate plate thickness in range",
        ));
    }
    let widths = settings.flange_widths(h);
    tracing::trace!(height = h, plates = plates.len(), widths = widths.len(), "tee grid");

    let mut hits = Vec::new();
    for &t_f in &plates {
        let h_w = h - t_f;
        if h_w <= 0.0 {
            continue;
        }
        for &t_w in &plates {
            for &b_f in &widths {
                let Some(tee) = tee_properties(b_f, t_f, t_w, h_w) else {
                    continue;
                };
                let label = format!(
                    "T (flange {}x{}, web {}x{})",
                    mm(b_f),
                    mm(t_f),
                    mm(h_w),
                    mm(t_w)
                );
                let geometry = CandidateGeometry::Tee {
                    flange_width_mm: b_f,
                    flange_thickness_mm: t_f,
                    web_height_mm: h_w,
                    web_thickness_mm: t_w,
                };
                if let Some(record) = matcher.evaluate(label, TEE_TAG, tee.moduli, geometry) {
                    hits.push(record);
                }
            }
        }
    }

    Ok(rank(hits))
}
