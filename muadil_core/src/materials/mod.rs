//! # Materials
//!
//! Densities used by the weight calculation. The three common structural
//! metals are named; anything else is a [`Material::Custom`] density.
//!
//! ## JSON Serialization
//!
//! Materials serialize with a "type" discriminator:
//!
//! ```json
//! { "type": "Steel" }
//! { "type": "Custom", "density_g_cm3": 8.96 }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use muadil_core::materials::Material;
//!
//! let steel: Material = "steel".parse()?;
//! assert_eq!(steel.density().0, 7.85);
//! # Ok::<(), muadil_core::errors::CalcError>(())
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::equations::positive;
use crate::errors::{CalcError, CalcResult};
use crate::units::GramsPerCm3;

/// Structural steel density (g/cm³)
pub const STEEL_DENSITY: f64 = 7.85;
/// Austenitic stainless steel density (g/cm³)
pub const STAINLESS_DENSITY: f64 = 7.90;
/// Aluminium alloy density (g/cm³)
pub const ALUMINIUM_DENSITY: f64 = 2.70;

/// Material of the reference profile
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Material {
    #[default]
    Steel,
    StainlessSteel,
    Aluminium,
    /// Any other material, by density
    Custom { density_g_cm3: f64 },
}

impl Material {
    /// Custom material, rejecting non-positive densities
    pub fn custom(density_g_cm3: f64) -> CalcResult<Self> {
        let density = positive(density_g_cm3).ok_or_else(|| {
            CalcError::invalid_input(
                "density_g_cm3",
                density_g_cm3.to_string(),
                "Density must be positive",
            )
        })?;
        Ok(Material::Custom {
            density_g_cm3: density,
        })
    }

    /// Density in g/cm³
    pub fn density(&self) -> GramsPerCm3 {
        match self {
            Material::Steel => GramsPerCm3(STEEL_DENSITY),
            Material::StainlessSteel => GramsPerCm3(STAINLESS_DENSITY),
            Material::Aluminium => GramsPerCm3(ALUMINIUM_DENSITY),
            Material::Custom { density_g_cm3 } => GramsPerCm3(*density_g_cm3),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> String {
        match self {
            Material::Steel => "Steel".to_string(),
            Material::StainlessSteel => "Stainless steel".to_string(),
            Material::Aluminium => "Aluminium".to_string(),
            Material::Custom { density_g_cm3 } => format!("Custom ({} g/cm³)", density_g_cm3),
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Material {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "steel" | "s235" | "s355" => Ok(Material::Steel),
            "stainless" | "stainless-steel" | "stainless steel" | "inox" => Ok(Material::StainlessSteel),
            "aluminium" | "aluminum" | "al" => Ok(Material::Aluminium),
            other => Err(CalcError::invalid_input(
                "material",
                other,
                "Expected steel, stainless or aluminium",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_densities() {
        assert_eq!(Material::Steel.density().0, 7.85);
        assert_eq!(Material::StainlessSteel.density().0, 7.90);
        assert_eq!(Material::Aluminium.density().0, 2.70);
        assert_eq!(Material::default(), Material::Steel);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Aluminum".parse::<Material>().unwrap(), Material::Aluminium);
        assert_eq!("stainless".parse::<Material>().unwrap(), Material::StainlessSteel);
        assert!("wood".parse::<Material>().is_err());
    }

    #[test]
    fn test_custom_density() {
        let copper = Material::custom(8.96).unwrap();
        assert_eq!(copper.density().0, 8.96);
        assert!(Material::custom(0.0).is_err());
        assert!(Material::custom(f64::NAN).is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Material::Steel).unwrap();
        assert_eq!(json, r#"{"type":"Steel"}"#);
        let custom: Material = serde_json::from_str(r#"{"type":"Custom","density_g_cm3":8.96}"#).unwrap();
        assert_eq!(custom, Material::Custom { density_g_cm3: 8.96 });
    }
}
