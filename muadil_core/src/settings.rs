//! # Search Settings
//!
//! Tolerance, sweep ranges and strategy toggles for a study. Every field has
//! a default, so a settings file only needs the keys it changes:
//!
//! ```toml
//! tolerance = 0.05
//!
//! [tee]
//! enabled = false
//! ```
//!
//! Settings are validated before use; see [`SearchSettings::validate`].

use serde::{Deserialize, Serialize};

use crate::equations::positive;
use crate::errors::{CalcError, CalcResult};

/// Default relative tolerance band
pub const DEFAULT_TOLERANCE: f64 = 0.10;

/// Plate thicknesses the T-section sweep tries (mm)
pub const DEFAULT_TEE_THICKNESSES_MM: [f64; 12] =
    [4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 12.0, 15.0, 20.0, 25.0, 30.0];

/// Settings shared by every strategy of a study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Relative tolerance τ of the OR band, in (0, 1)
    pub tolerance: f64,

    /// Flat-bar sweep
    pub flat_bar: FlatBarSettings,

    /// T-section sweep
    pub tee: TeeSettings,

    /// Truncate each result list to this many entries (display only)
    pub max_results: Option<usize>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            tolerance: DEFAULT_TOLERANCE,
            flat_bar: FlatBarSettings::default(),
            tee: TeeSettings::default(),
            max_results: None,
        }
    }
}

/// Flat-bar sweep range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatBarSettings {
    pub enabled: bool,
    /// First thickness tried (mm, integer step)
    pub min_thickness_mm: u32,
    /// Last thickness tried, inclusive (mm)
    pub max_thickness_mm: u32,
}

impl Default for FlatBarSettings {
    fn default() -> Self {
        FlatBarSettings {
            enabled: true,
            min_thickness_mm: 2,
            max_thickness_mm: 100,
        }
    }
}

impl FlatBarSettings {
    /// Thicknesses the sweep walks, ascending
    pub fn thicknesses_mm(&self) -> impl Iterator<Item = f64> {
        (self.min_thickness_mm..=self.max_thickness_mm).map(f64::from)
    }
}

/// T-section sweep grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeeSettings {
    pub enabled: bool,

    /// Candidate flange and web thicknesses (mm)
    pub thickness_candidates_mm: Vec<f64>,

    /// Flange width step (mm); widths are multiples of it
    pub flange_step_mm: f64,

    /// Smallest flange width regardless of height (mm)
    pub min_flange_width_mm: f64,

    /// Flange width range as multiples of the height H
    pub flange_width_ratio_min: f64,
    pub flange_width_ratio_max: f64,

    /// Thickness window for solid references (round, square), which have no wall
    pub solid_thickness_range_mm: (f64, f64),
}

impl Default for TeeSettings {
    fn default() -> Self {
        TeeSettings {
            enabled: true,
            thickness_candidates_mm: DEFAULT_TEE_THICKNESSES_MM.to_vec(),
            flange_step_mm: 10.0,
            min_flange_width_mm: 20.0,
            flange_width_ratio_min: 0.5,
            flange_width_ratio_max: 2.0,
            solid_thickness_range_mm: (4.0, 10.0),
        }
    }
}

impl TeeSettings {
    /// Check the sweep grid is usable
    ///
    /// Steps, widths and ratios must be finite and positive.
    pub fn validate(&self) -> CalcResult<()> {
        if let Some(&bad) = self
            .thickness_candidates_mm
            .iter()
            .find(|t| !(t.is_finite() && **t > 0.0))
        {
            return Err(CalcError::invalid_input(
                "tee.thickness_candidates_mm",
                bad.to_string(),
                "Thicknesses must be positive",
            ));
        }
        for (field, value) in [
            ("tee.flange_step_mm", self.flange_step_mm),
            ("tee.min_flange_width_mm", self.min_flange_width_mm),
            ("tee.flange_width_ratio_min", self.flange_width_ratio_min),
            ("tee.flange_width_ratio_max", self.flange_width_ratio_max),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        if self.flange_width_ratio_max < self.flange_width_ratio_min {
            return Err(CalcError::invalid_input(
                "tee.flange_width_ratio_max",
                self.flange_width_ratio_max.to_string(),
                "Must not be below flange_width_ratio_min",
            ));
        }
        let (lo, hi) = self.solid_thickness_range_mm;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && hi >= lo) {
            return Err(CalcError::invalid_input(
                "tee.solid_thickness_range_mm",
                format!("[{}, {}]", lo, hi),
                "Range must be positive and ascending",
            ));
        }

        Ok(())
    }

    /// Candidate thicknesses inside `[t_min, t_max]`, ascending
    pub fn thicknesses_in(&self, t_min: f64, t_max: f64) -> Vec<f64> {
        let mut list: Vec<f64> = self
            .thickness_candidates_mm
            .iter()
            .copied()
            .filter(|&t| t >= t_min && t <= t_max)
            .collect();
        list.sort_by(f64::total_cmp);
        list.dedup();
        list
    }

    /// Flange widths for height `h_mm`, ascending
    ///
    /// From `max(min_width, ratio_min·H)` to `ratio_max·H`, both ends rounded
    /// to the nearest step (ties to even), walked in whole steps. Empty when
    /// the step is not positive or either end is not finite.
    pub fn flange_widths(&self, h_mm: f64) -> Vec<f64> {
        let Some(step) = positive(self.flange_step_mm) else {
            return Vec::new();
        };
        let start = (self.min_flange_width_mm.max(self.flange_width_ratio_min * h_mm) / step)
            .round_ties_even()
            * step;
        let end = (self.flange_width_ratio_max * h_mm / step).round_ties_even() * step;
        if !(start.is_finite() && end.is_finite()) {
            return Vec::new();
        }

        let mut widths = Vec::new();
        let mut k = 0u32;
        loop {
            let b_f = start + f64::from(k) * step;
            if b_f > end + step * 1e-9 {
                break;
            }
            widths.push(b_f);
            k += 1;
        }
        widths
    }
}

impl SearchSettings {
    /// Same settings with another tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check every value is usable
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(CalcError::invalid_input(
                "tolerance",
                self.tolerance.to_string(),
                "Tolerance must be between 0 and 1 (exclusive)",
            ));
        }

        let fb = &self.flat_bar;
        if fb.min_thickness_mm == 0 {
            return Err(CalcError::invalid_input(
                "flat_bar.min_thickness_mm",
                "0",
                "Thickness must be positive",
            ));
        }
        if fb.max_thickness_mm < fb.min_thickness_mm {
            return Err(CalcError::invalid_input(
                "flat_bar.max_thickness_mm",
                fb.max_thickness_mm.to_string(),
                format!("Must not be below min_thickness_mm ({})", fb.min_thickness_mm),
            ));
        }

        self.tee.validate()?;

        if self.max_results == Some(0) {
            return Err(CalcError::invalid_input(
                "max_results",
                "0",
                "Use at least 1, or leave unset for all results",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SearchSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.tolerance, 0.10);
        assert_eq!(settings.flat_bar.thicknesses_mm().count(), 99);
    }

    #[test]
    fn test_tolerance_bounds() {
        for bad in [0.0, 1.0, -0.1, f64::NAN] {
            let err = SearchSettings::default().with_tolerance(bad).validate().unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
        assert!(SearchSettings::default().with_tolerance(0.02).validate().is_ok());
    }

    #[test]
    fn test_flat_bar_range_checked() {
        let mut settings = SearchSettings::default();
        settings.flat_bar.min_thickness_mm = 10;
        settings.flat_bar.max_thickness_mm = 5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let settings: SearchSettings = toml::from_str(
            r#"
            tolerance = 0.05

            [tee]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(settings.tolerance, 0.05);
        assert!(!settings.tee.enabled);
        assert_eq!(settings.tee.flange_step_mm, 10.0);
        assert!(settings.flat_bar.enabled);
        assert_eq!(settings.max_results, None);
    }

    #[test]
    fn test_tee_thickness_filter() {
        let tee = TeeSettings::default();
        assert_eq!(tee.thicknesses_in(7.0, 14.0), vec![7.0, 8.0, 9.0, 10.0, 12.0]);
        assert_eq!(tee.thicknesses_in(4.0, 4.0), vec![4.0]);
        assert!(tee.thicknesses_in(31.0, 40.0).is_empty());
    }

    #[test]
    fn test_flange_widths() {
        let tee = TeeSettings::default();
        // H = 80: 40 to 160
        let widths = tee.flange_widths(80.0);
        assert_eq!(widths.first(), Some(&40.0));
        assert_eq!(widths.last(), Some(&160.0));
        assert_eq!(widths.len(), 13);

        // small H is clamped to the minimum width
        assert_eq!(tee.flange_widths(30.0), vec![20.0, 30.0, 40.0, 50.0, 60.0]);

        // 0.5 × 50 = 25 rounds to 20 (ties to even)
        assert_eq!(tee.flange_widths(50.0).first(), Some(&20.0));
    }

    #[test]
    fn test_flange_widths_unusable_step() {
        for step in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let tee = TeeSettings {
                flange_step_mm: step,
                ..TeeSettings::default()
            };
            assert!(tee.flange_widths(80.0).is_empty());
            assert_eq!(tee.validate().unwrap_err().error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_tee_grid_checked() {
        let mut settings = SearchSettings::default();
        settings.tee.flange_width_ratio_min = 3.0;
        assert!(settings.tee.validate().is_err());
        assert!(settings.validate().is_err());

        settings.tee = TeeSettings::default();
        settings.tee.thickness_candidates_mm.push(f64::NAN);
        assert!(settings.validate().is_err());
    }
}
