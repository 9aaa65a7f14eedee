//! Weight of a straight member
//!
//! `weight = area × length × density`, with the area in m², the length in m
//! and the density in g/cm³ (= t/m³), so the product is scaled by 1000 to kg.

use crate::equations::positive;
use crate::errors::{CalcError, CalcResult};
use crate::units::{GramsPerCm3, Kilograms, Meters, Millimeters, SqM, SqMm};

/// Mass of a member from SI quantities
pub fn weight_kg(area: SqM, length: Meters, density: GramsPerCm3) -> Kilograms {
    Kilograms(area.0 * length.0 * density.kg_per_m3())
}

/// Mass of a member from catalog units (mm², mm)
///
/// A zero length gives zero mass; negative or non-finite inputs are rejected.
///
/// # Example
///
/// ```rust
/// use muadil_core::units::{GramsPerCm3, Millimeters, SqMm};
/// use muadil_core::weight::member_weight;
///
/// // 80 x 7 flat bar, 6 m of steel
/// let w = member_weight(SqMm(560.0), Millimeters(6000.0), GramsPerCm3(7.85)).unwrap();
/// assert!((w.0 - 26.376).abs() < 1e-9);
/// ```
pub fn member_weight(area: SqMm, length: Millimeters, density: GramsPerCm3) -> CalcResult<Kilograms> {
    positive(area.0)
        .ok_or_else(|| CalcError::invalid_input("area_mm2", area.0.to_string(), "Area must be positive"))?;
    if !(length.0.is_finite() && length.0 >= 0.0) {
        return Err(CalcError::invalid_input(
            "length_mm",
            length.0.to_string(),
            "Length must be zero or positive",
        ));
    }
    positive(density.0).ok_or_else(|| {
        CalcError::invalid_input("density_g_cm3", density.0.to_string(), "Density must be positive")
    })?;

    Ok(weight_kg(area.into(), length.into(), density))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::pipe_area;

    #[test]
    fn test_pipe_weight() {
        let area_mm2 = pipe_area(60.3, 3.91).unwrap();
        let w = member_weight(SqMm(area_mm2), Millimeters(6000.0), GramsPerCm3(7.85)).unwrap();
        let expected = area_mm2 / 1e6 * 6.0 * 7850.0;
        assert!(((w.0 - expected) / expected).abs() < 1e-12);
        // DN 50 SCH 40 runs at about 5.44 kg/m
        assert!((w.0 / 6.0 - 5.44).abs() < 0.01);
    }

    #[test]
    fn test_zero_length() {
        let w = member_weight(SqMm(100.0), Millimeters(0.0), GramsPerCm3(7.85)).unwrap();
        assert_eq!(w.0, 0.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(member_weight(SqMm(0.0), Millimeters(1000.0), GramsPerCm3(7.85)).is_err());
        assert!(member_weight(SqMm(100.0), Millimeters(-1.0), GramsPerCm3(7.85)).is_err());
        assert!(member_weight(SqMm(100.0), Millimeters(1000.0), GramsPerCm3(0.0)).is_err());
    }
}
