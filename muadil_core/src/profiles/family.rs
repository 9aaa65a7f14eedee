//! Section formulas per profile family
//!
//! Each family implements [`SectionFamily`]; the [`registry`] maps a
//! [`ProfileFamily`] tag to its implementation. Adding a family means adding
//! an implementation and one `register` call, nothing else dispatches on the
//! family.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{Dimensions, ProfileFamily};
use crate::equations::section::{
    angle_area, angle_moduli, bulb_flat_area, flat_bar_moduli, hollow_rect_area,
    hollow_rect_moduli, pipe_area, pipe_moduli, rolled_section_area, solid_rect_area,
    solid_rect_moduli, solid_round_area, solid_round_moduli, solid_square_area,
    solid_square_moduli, SectionModuli,
};

/// Dimension field names, shared by the tables, JSON catalogs and formulas
pub mod fields {
    pub const OUTER_DIAMETER: &str = "OD";
    pub const WALL: &str = "t";
    pub const HEIGHT_A: &str = "A";
    pub const WIDTH_B: &str = "B";
    pub const LEG_A: &str = "a";
    pub const LEG_B: &str = "b";
    pub const HEIGHT: &str = "h";
    pub const WIDTH: &str = "b";
    pub const WEB: &str = "tw";
    pub const FLANGE: &str = "tf";
    pub const DIAMETER: &str = "d";
    pub const SIDE: &str = "a";
    pub const THICKNESS: &str = "t";
}

use fields::*;

/// Where the T-section thickness window comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThicknessBasis {
    /// Window `[t, 2t]` around the reference wall/web thickness
    Scaled { thickness_mm: f64 },
    /// Solid sections have no wall; the configured fixed window applies
    Solid,
}

/// Parametric search inputs derived from a reference profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchBasis {
    /// Characteristic height H for the flat-bar and T-section sweeps (mm)
    pub height_mm: f64,
    /// Thickness window for the T-section sweep
    pub thickness: ThicknessBasis,
}

/// Capability set every profile family provides
pub trait SectionFamily: Send + Sync {
    /// The family this implementation serves
    fn family(&self) -> ProfileFamily;

    /// Dimension fields a complete row carries
    fn required_fields(&self) -> &'static [&'static str];

    /// Fields the section moduli are computed from
    fn moduli_fields(&self) -> &'static [&'static str] {
        self.required_fields()
    }

    /// Elastic section moduli, `None` for undefined geometry
    fn moduli(&self, dims: &Dimensions) -> Option<SectionModuli>;

    /// Cross-sectional area in mm², `None` for undefined geometry
    fn area_mm2(&self, dims: &Dimensions) -> Option<f64>;

    /// Height and thickness window used to seed the parametric searches
    fn search_basis(&self, dims: &Dimensions) -> Option<SearchBasis>;
}

struct PipeSection;

impl SectionFamily for PipeSection {
    fn family(&self) -> ProfileFamily {
        ProfileFamily::Pipe
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[OUTER_DIAMETER, WALL]
    }

    fn moduli(&self, dims: &Dimensions) -> Option<SectionModuli> {
        pipe_moduli(dims.get(OUTER_DIAMETER)?, dims.get(WALL)?)
    }

    fn area_mm2(&self, dims: &Dimensions) -> Option<f64> {
        pipe_area(dims.get(OUTER_DIAMETER)?, dims.get(WALL)?)
    }

    fn search_basis(&self, dims: &Dimensions) -> Option<SearchBasis> {
        Some(SearchBasis {
            height_mm: dims.get(OUTER_DIAMETER)?,
            thickness: ThicknessBasis::Scaled {
                thickness_mm: dims.get(WALL)?,
            },
        })
    }
}

struct HollowRectSection;

impl SectionFamily for HollowRectSection {
    fn family(&self) -> ProfileFamily {
        ProfileFamily::RectangularHollow
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[HEIGHT_A, WIDTH_B, WALL]
    }

    fn moduli(&self, dims: &Dimensions) -> Option<SectionModuli> {
        hollow_rect_moduli(dims.get(HEIGHT_A)?, dims.get(WIDTH_B)?, dims.get(WALL)?)
    }

    fn area_mm2(&self, dims: &Dimensions) -> Option<f64> {
        hollow_rect_area(dims.get(HEIGHT_A)?, dims.get(WIDTH_B)?, dims.get(WALL)?)
    }

    fn search_basis(&self, dims: &Dimensions) -> Option<SearchBasis> {
        Some(SearchBasis {
            height_mm: dims.get(HEIGHT_A)?.max(dims.get(WIDTH_B)?),
            thickness: ThicknessBasis::Scaled {
                thickness_mm: dims.get(WALL)?,
            },
        })
    }
}

/// Equal and unequal angles share the formulas
struct AngleSection(ProfileFamily);

impl SectionFamily for AngleSection {
    fn family(&self) -> ProfileFamily {
        self.0
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[LEG_A, LEG_B, THICKNESS]
    }

    fn moduli(&self, dims: &Dimensions) -> Option<SectionModuli> {
        angle_moduli(dims.get(LEG_A)?, dims.get(LEG_B)?, dims.get(THICKNESS)?)
    }

    fn area_mm2(&self, dims: &Dimensions) -> Option<f64> {
        angle_area(dims.get(LEG_A)?, dims.get(LEG_B)?, dims.get(THICKNESS)?)
    }

    fn search_basis(&self, dims: &Dimensions) -> Option<SearchBasis> {
        Some(SearchBasis {
            height_mm: dims.get(LEG_A)?.max(dims.get(LEG_B)?),
            thickness: ThicknessBasis::Scaled {
                thickness_mm: dims.get(THICKNESS)?,
            },
        })
    }
}

/// IPE, HEA, HEB and UPN: moduli from the h × b envelope
struct RolledSection(ProfileFamily);

impl SectionFamily for RolledSection {
    fn family(&self) -> ProfileFamily {
        self.0
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[HEIGHT, WIDTH, WEB, FLANGE]
    }

    // web and flange thickness only enter the area
    fn moduli_fields(&self) -> &'static [&'static str] {
        &[HEIGHT, WIDTH]
    }

    fn moduli(&self, dims: &Dimensions) -> Option<SectionModuli> {
        solid_rect_moduli(dims.get(HEIGHT)?, dims.get(WIDTH)?)
    }

    fn area_mm2(&self, dims: &Dimensions) -> Option<f64> {
        rolled_section_area(
            dims.get(HEIGHT)?,
            dims.get(WIDTH)?,
            dims.get(WEB)?,
            dims.get(FLANGE)?,
        )
    }

    fn search_basis(&self, dims: &Dimensions) -> Option<SearchBasis> {
        Some(SearchBasis {
            height_mm: dims.get(HEIGHT)?,
            thickness: ThicknessBasis::Scaled {
                thickness_mm: dims.get(WEB)?,
            },
        })
    }
}

struct SolidRoundSection;

impl SectionFamily for SolidRoundSection {
    fn family(&self) -> ProfileFamily {
        ProfileFamily::SolidRound
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[DIAMETER]
    }

    fn moduli(&self, dims: &Dimensions) -> Option<SectionModuli> {
        solid_round_moduli(dims.get(DIAMETER)?)
    }

    fn area_mm2(&self, dims: &Dimensions) -> Option<f64> {
        solid_round_area(dims.get(DIAMETER)?)
    }

    fn search_basis(&self, dims: &Dimensions) -> Option<SearchBasis> {
        Some(SearchBasis {
            height_mm: dims.get(DIAMETER)?,
            thickness: ThicknessBasis::Solid,
        })
    }
}

struct SolidSquareSection;

impl SectionFamily for SolidSquareSection {
    fn family(&self) -> ProfileFamily {
        ProfileFamily::SolidSquare
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[SIDE]
    }

    fn moduli(&self, dims: &Dimensions) -> Option<SectionModuli> {
        solid_square_moduli(dims.get(SIDE)?)
    }

    fn area_mm2(&self, dims: &Dimensions) -> Option<f64> {
        solid_square_area(dims.get(SIDE)?)
    }

    fn search_basis(&self, dims: &Dimensions) -> Option<SearchBasis> {
        Some(SearchBasis {
            height_mm: dims.get(SIDE)?,
            thickness: ThicknessBasis::Solid,
        })
    }
}

/// Bulb flats are treated as their B × t plate
struct BulbFlatSection;

impl SectionFamily for BulbFlatSection {
    fn family(&self) -> ProfileFamily {
        ProfileFamily::BulbFlat
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[WIDTH_B, THICKNESS]
    }

    fn moduli(&self, dims: &Dimensions) -> Option<SectionModuli> {
        solid_rect_moduli(dims.get(THICKNESS)?, dims.get(WIDTH_B)?)
    }

    fn area_mm2(&self, dims: &Dimensions) -> Option<f64> {
        bulb_flat_area(dims.get(WIDTH_B)?, dims.get(THICKNESS)?)
    }

    fn search_basis(&self, dims: &Dimensions) -> Option<SearchBasis> {
        Some(SearchBasis {
            height_mm: dims.get(WIDTH_B)?,
            thickness: ThicknessBasis::Scaled {
                thickness_mm: dims.get(THICKNESS)?,
            },
        })
    }
}

struct FlatBarSection;

impl SectionFamily for FlatBarSection {
    fn family(&self) -> ProfileFamily {
        ProfileFamily::FlatBar
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[HEIGHT, THICKNESS]
    }

    fn moduli(&self, dims: &Dimensions) -> Option<SectionModuli> {
        flat_bar_moduli(dims.get(THICKNESS)?, dims.get(HEIGHT)?)
    }

    fn area_mm2(&self, dims: &Dimensions) -> Option<f64> {
        solid_rect_area(dims.get(HEIGHT)?, dims.get(THICKNESS)?)
    }

    fn search_basis(&self, dims: &Dimensions) -> Option<SearchBasis> {
        Some(SearchBasis {
            height_mm: dims.get(HEIGHT)?,
            thickness: ThicknessBasis::Scaled {
                thickness_mm: dims.get(THICKNESS)?,
            },
        })
    }
}

/// Family tag → section formulas
#[derive(Default)]
pub struct Registry {
    families: HashMap<ProfileFamily, Box<dyn SectionFamily>>,
}

impl Registry {
    /// Register an implementation under its own family tag
    pub fn register(&mut self, section: Box<dyn SectionFamily>) {
        self.families.insert(section.family(), section);
    }

    /// Implementation for a family, if one is registered
    pub fn get(&self, family: ProfileFamily) -> Option<&dyn SectionFamily> {
        self.families.get(&family).map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let mut registry = Registry::default();
    registry.register(Box::new(PipeSection));
    registry.register(Box::new(HollowRectSection));
    registry.register(Box::new(AngleSection(ProfileFamily::EqualAngle)));
    registry.register(Box::new(AngleSection(ProfileFamily::UnequalAngle)));
    registry.register(Box::new(RolledSection(ProfileFamily::IBeam)));
    registry.register(Box::new(RolledSection(ProfileFamily::WideFlangeA)));
    registry.register(Box::new(RolledSection(ProfileFamily::WideFlangeB)));
    registry.register(Box::new(RolledSection(ProfileFamily::Channel)));
    registry.register(Box::new(SolidRoundSection));
    registry.register(Box::new(SolidSquareSection));
    registry.register(Box::new(BulbFlatSection));
    registry.register(Box::new(FlatBarSection));
    registry
});

/// The process-wide family registry
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Section formulas for a family
pub fn lookup(family: ProfileFamily) -> Option<&'static dyn SectionFamily> {
    REGISTRY.get(family)
}
