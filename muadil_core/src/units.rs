//! # Unit Types
//!
//! Type-safe wrappers for the metric units used by the section engine.
//! They are plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Unit discipline
//!
//! Catalog dimensions are millimeters. Second moments of area are computed in
//! meters (m⁴) so fourth powers of large dimensions stay in a comfortable
//! floating-point range, and the resulting section moduli are rescaled to mm³.
//!
//! ## Example
//!
//! ```rust
//! use muadil_core::units::{Meters, Millimeters};
//!
//! let length = Millimeters(6000.0);
//! let length_m: Meters = length.into();
//! assert_eq!(length_m.0, 6.0);
//! ```

use serde::{Deserialize, Serialize};

/// Millimeters per meter
pub const MM_PER_M: f64 = 1000.0;

/// Cubic millimeters per cubic meter
pub const MM3_PER_M3: f64 = 1e9;

/// Square millimeters per square meter
pub const MM2_PER_M2: f64 = 1e6;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / MM_PER_M)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * MM_PER_M)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqMm> for SqM {
    fn from(a: SqMm) -> Self {
        SqM(a.0 / MM2_PER_M2)
    }
}

impl From<SqM> for SqMm {
    fn from(a: SqM) -> Self {
        SqMm(a.0 * MM2_PER_M2)
    }
}

// ============================================================================
// Mass and Density
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Density in grams per cubic centimeter (numerically equal to t/m³)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GramsPerCm3(pub f64);

impl GramsPerCm3 {
    /// Same density in kg/m³
    pub fn kg_per_m3(self) -> f64 {
        self.0 * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_m() {
        let m: Meters = Millimeters(2500.0).into();
        assert_eq!(m.0, 2.5);
        let back: Millimeters = m.into();
        assert_eq!(back.0, 2500.0);
    }

    #[test]
    fn test_area_conversion() {
        let a: SqM = SqMm(1_000_000.0).into();
        assert_eq!(a.0, 1.0);
    }

    #[test]
    fn test_density() {
        assert!((GramsPerCm3(7.85).kg_per_m3() - 7850.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialization() {
        let w = Kilograms(26.37);
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, "26.37");
        let roundtrip: Kilograms = serde_json::from_str(&json).unwrap();
        assert_eq!(w, roundtrip);
    }
}
