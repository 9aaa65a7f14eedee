//! # Profile Families and Rows
//!
//! A [`ProfileRow`] is one entry of a catalog table: a family, a display name
//! and a map of named dimensions in millimeters. The family decides which
//! fields it needs and how they turn into an area and a pair of section
//! moduli; that knowledge lives in the [`family`] registry, not here.
//!
//! ## Example
//!
//! ```rust
//! use muadil_core::profiles::{Dimensions, ProfileFamily, ProfileRow};
//!
//! let row = ProfileRow::new(
//!     ProfileFamily::Pipe,
//!     "DN 50 SCH 40",
//!     Dimensions::new().with("OD", 60.3).with("t", 3.91),
//! );
//! let w = row.moduli().unwrap();
//! assert_eq!(w.wx_mm3, w.wy_mm3);
//! ```

pub mod family;

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::equations::{positive, SectionModuli};
use crate::errors::{CalcError, CalcResult};

pub use family::{lookup, registry, SearchBasis, SectionFamily, ThicknessBasis};

/// Profile family classification
///
/// Declaration order is the catalog order: aggregation walks the families in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProfileFamily {
    /// Circular hollow section, schedule pipe
    Pipe,
    /// Rectangular or square hollow section (RHS/SHS)
    RectangularHollow,
    /// Equal-leg angle
    EqualAngle,
    /// Unequal-leg angle
    UnequalAngle,
    /// I-beam (IPE)
    IBeam,
    /// Wide flange, light series (HEA)
    WideFlangeA,
    /// Wide flange, medium series (HEB)
    WideFlangeB,
    /// Channel (UPN)
    Channel,
    /// Solid round bar
    SolidRound,
    /// Solid square bar
    SolidSquare,
    /// Bulb flat (HP)
    BulbFlat,
    /// Flat bar, parametric only
    FlatBar,
}

impl ProfileFamily {
    /// All families in catalog order
    pub const ALL: [ProfileFamily; 12] = [
        ProfileFamily::Pipe,
        ProfileFamily::RectangularHollow,
        ProfileFamily::EqualAngle,
        ProfileFamily::UnequalAngle,
        ProfileFamily::IBeam,
        ProfileFamily::WideFlangeA,
        ProfileFamily::WideFlangeB,
        ProfileFamily::Channel,
        ProfileFamily::SolidRound,
        ProfileFamily::SolidSquare,
        ProfileFamily::BulbFlat,
        ProfileFamily::FlatBar,
    ];

    /// Short tag shown in result tables
    pub fn tag(&self) -> &'static str {
        match self {
            ProfileFamily::Pipe => "Pipe",
            ProfileFamily::RectangularHollow => "RHS/SHS",
            ProfileFamily::EqualAngle => "L equal",
            ProfileFamily::UnequalAngle => "L unequal",
            ProfileFamily::IBeam => "IPE",
            ProfileFamily::WideFlangeA => "HEA",
            ProfileFamily::WideFlangeB => "HEB",
            ProfileFamily::Channel => "UPN",
            ProfileFamily::SolidRound => "Round",
            ProfileFamily::SolidSquare => "Square",
            ProfileFamily::BulbFlat => "Bulb Flat",
            ProfileFamily::FlatBar => "Flat Bar",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProfileFamily::Pipe => "Pipe (DN + SCH)",
            ProfileFamily::RectangularHollow => "Hollow Section (RHS/SHS)",
            ProfileFamily::EqualAngle => "Angle (equal legs)",
            ProfileFamily::UnequalAngle => "Angle (unequal legs)",
            ProfileFamily::IBeam => "I-Beam (IPE)",
            ProfileFamily::WideFlangeA => "Wide Flange (HEA)",
            ProfileFamily::WideFlangeB => "Wide Flange (HEB)",
            ProfileFamily::Channel => "Channel (UPN)",
            ProfileFamily::SolidRound => "Solid Round",
            ProfileFamily::SolidSquare => "Solid Square",
            ProfileFamily::BulbFlat => "Bulb Flat (HP)",
            ProfileFamily::FlatBar => "Flat Bar",
        }
    }

    /// Parse from a tag or common alias (case-insensitive)
    pub fn from_code(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "pipe" | "chs" => Some(ProfileFamily::Pipe),
            "rhs" | "shs" | "rhsshs" | "rectangularhollow" => Some(ProfileFamily::RectangularHollow),
            "lequal" | "equalangle" => Some(ProfileFamily::EqualAngle),
            "lunequal" | "unequalangle" => Some(ProfileFamily::UnequalAngle),
            "ipe" | "ibeam" => Some(ProfileFamily::IBeam),
            "hea" | "wideflangea" => Some(ProfileFamily::WideFlangeA),
            "heb" | "wideflangeb" => Some(ProfileFamily::WideFlangeB),
            "upn" | "channel" => Some(ProfileFamily::Channel),
            "round" | "solidround" => Some(ProfileFamily::SolidRound),
            "square" | "solidsquare" => Some(ProfileFamily::SolidSquare),
            "bulbflat" | "hp" => Some(ProfileFamily::BulbFlat),
            "flatbar" | "flat" => Some(ProfileFamily::FlatBar),
            _ => None,
        }
    }

    /// Whether the family has a catalog table (flat bars are generated)
    pub fn has_catalog_table(&self) -> bool {
        !matches!(self, ProfileFamily::FlatBar)
    }

    /// Whether the family is a rolled I, H or U section
    pub fn is_rolled(&self) -> bool {
        matches!(
            self,
            ProfileFamily::IBeam
                | ProfileFamily::WideFlangeA
                | ProfileFamily::WideFlangeB
                | ProfileFamily::Channel
        )
    }
}

impl std::fmt::Display for ProfileFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ProfileFamily {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileFamily::from_code(s).ok_or_else(|| {
            CalcError::invalid_input("family", s, "Unknown profile family")
        })
    }
}

/// Named dimensions of a profile, all in millimeters
///
/// Serializes as a plain JSON object (`{"OD": 60.3, "t": 3.91}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimensions(BTreeMap<String, f64>);

impl Dimensions {
    /// Create an empty dimension map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: &str, value_mm: f64) -> Self {
        self.0.insert(field.to_string(), value_mm);
        self
    }

    /// Insert or replace a field
    pub fn insert(&mut self, field: &str, value_mm: f64) {
        self.0.insert(field.to_string(), value_mm);
    }

    /// A usable value for `field`: present, finite and strictly positive
    pub fn get(&self, field: &str) -> Option<f64> {
        self.0.get(field).copied().and_then(positive)
    }

    /// Fields from `required` that have no usable value
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|f| self.get(f).is_none())
            .collect()
    }

    /// Iterate over (field, value) pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One catalog entry
///
/// Identity is `(family, name)`. Rows are never mutated after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Profile family
    pub family: ProfileFamily,
    /// Display name (e.g., "IPE 200", "DN 50 SCH 40")
    pub name: String,
    /// Dimensions in millimeters, keyed by the family's field names
    pub dims: Dimensions,
}

impl ProfileRow {
    /// Create a row
    pub fn new(family: ProfileFamily, name: impl Into<String>, dims: Dimensions) -> Self {
        ProfileRow {
            family,
            name: name.into(),
            dims,
        }
    }

    /// Section moduli, or `None` when the geometry is undefined
    pub fn moduli(&self) -> Option<SectionModuli> {
        lookup(self.family)?.moduli(&self.dims)
    }

    /// Cross-sectional area (mm²), or `None` when the geometry is undefined
    pub fn area_mm2(&self) -> Option<f64> {
        lookup(self.family)?.area_mm2(&self.dims)
    }

    /// Height and thickness basis the parametric searches start from
    pub fn search_basis(&self) -> Option<SearchBasis> {
        lookup(self.family)?.search_basis(&self.dims)
    }

    /// Section moduli, explaining why the geometry is undefined if it is
    pub fn try_moduli(&self) -> CalcResult<SectionModuli> {
        let section = lookup(self.family).ok_or_else(|| CalcError::Internal {
            message: format!("No section formulas registered for {}", self.family.tag()),
        })?;
        let missing = self.dims.missing(section.moduli_fields());
        if !missing.is_empty() {
            return Err(CalcError::undefined_geometry(
                self.family.tag(),
                format!("'{}' missing or non-positive: {}", self.name, missing.join(", ")),
            ));
        }
        section.moduli(&self.dims).ok_or_else(|| {
            CalcError::undefined_geometry(
                self.family.tag(),
                format!("'{}' has no valid cross-section (wall or flange too thick)", self.name),
            )
        })
    }

    /// Case-insensitive name match, ignoring spaces
    pub fn name_matches(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}

impl std::fmt::Display for ProfileRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.family.tag())
    }
}

fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}
