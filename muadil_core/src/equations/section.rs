//! # Cross-Section Property Formulas
//!
//! Closed-form area and elastic section modulus formulas for every profile
//! family the catalog knows about, plus the flange-and-web composite used by
//! the fabricated T-section search.
//!
//! ## Notation
//!
//! - `A` = Cross-sectional area
//! - `I` = Second moment of area (moment of inertia)
//! - `W` = Elastic section modulus (I/c, where c = distance to extreme fiber)
//! - `x` axis = horizontal, bending about it uses the section height
//! - `y` axis = vertical, bending about it uses the section width
//!
//! ## Units
//!
//! Every function takes millimeters. Second moments are evaluated in meters
//! and the moduli are rescaled to mm³; areas are returned in mm².
//!
//! ## Undefined geometry
//!
//! Functions return `None` when a dimension is missing, zero, negative or not
//! finite, or when a derived dimension (inner diameter, hollow core, net web
//! height) is not positive. `None` means "leave this shape out", never a crash.
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table A.1
//! - EN 10365: Hot rolled steel channels, I and H sections

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::units::{MM3_PER_M3, MM_PER_M};

/// Elastic section moduli about both principal axes (mm³)
///
/// Constructed only through [`SectionModuli::new`], so both values are
/// strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionModuli {
    /// Section modulus about the x (strong) axis, mm³
    pub wx_mm3: f64,
    /// Section modulus about the y (weak) axis, mm³
    pub wy_mm3: f64,
}

impl SectionModuli {
    /// Pair two moduli, or `None` unless both are positive and finite
    pub fn new(wx_mm3: f64, wy_mm3: f64) -> Option<Self> {
        Some(SectionModuli {
            wx_mm3: positive(wx_mm3)?,
            wy_mm3: positive(wy_mm3)?,
        })
    }
}

impl std::fmt::Display for SectionModuli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wx={:.0} mm³, Wy={:.0} mm³", self.wx_mm3, self.wy_mm3)
    }
}

/// `Some(value)` for a strictly positive finite value
#[inline]
pub fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

#[inline]
fn to_m(mm: f64) -> f64 {
    mm / MM_PER_M
}

/// Section modulus in mm³ from a second moment (m⁴) and fiber distance (m)
#[inline]
fn modulus_mm3(i_m4: f64, c_m: f64) -> f64 {
    i_m4 / c_m * MM3_PER_M3
}

// =============================================================================
// PIPE (CIRCULAR HOLLOW)
// =============================================================================

/// Section moduli of a pipe
///
/// ```text
///        .-"""-.
///      /  .---.  \
///     |  |  ID |  |  OD
///      \  '---'  /
///        '-...-'
/// ```
///
/// # Formula
/// ID = OD − 2t
/// I = π/64 × (OD⁴ − ID⁴)
/// Wx = Wy = I / (OD/2)
///
/// # Example
/// ```rust
/// use muadil_core::equations::section::pipe_moduli;
///
/// // DN 50 SCH 40
/// let w = pipe_moduli(60.3, 3.91).unwrap();
/// assert!((w.wx_mm3 - 9175.69).abs() < 0.5);
/// assert_eq!(w.wx_mm3, w.wy_mm3);
///
/// // Wall thicker than the radius
/// assert!(pipe_moduli(60.3, 31.0).is_none());
/// ```
pub fn pipe_moduli(od_mm: f64, t_mm: f64) -> Option<SectionModuli> {
    let od = to_m(positive(od_mm)?);
    let t = to_m(positive(t_mm)?);
    let id = od - 2.0 * t;
    if id <= 0.0 {
        return None;
    }
    let i = PI / 64.0 * (od.powi(4) - id.powi(4));
    let w = modulus_mm3(i, od / 2.0);
    SectionModuli::new(w, w)
}

/// Cross-sectional area of a pipe (mm²): π/4 × (OD² − ID²)
pub fn pipe_area(od_mm: f64, t_mm: f64) -> Option<f64> {
    let od = positive(od_mm)?;
    let t = positive(t_mm)?;
    let id = od - 2.0 * t;
    if id <= 0.0 {
        return None;
    }
    positive(PI / 4.0 * (od.powi(2) - id.powi(2)))
}

// =============================================================================
// RECTANGULAR / SQUARE HOLLOW SECTION
// =============================================================================

/// Section moduli of a rectangular hollow section
///
/// ```text
///     ┌───────────┐
///     │ ┌───────┐ │
///   A │ │       │ │  wall t
///     │ └───────┘ │
///     └───────────┘
///           B
/// ```
///
/// # Formula
/// Ix = [B·A³ − (B−2t)(A−2t)³] / 12,  Wx = Ix / (A/2)
/// Iy = [A·B³ − (A−2t)(B−2t)³] / 12,  Wy = Iy / (B/2)
///
/// Undefined when A ≤ 2t or B ≤ 2t.
pub fn hollow_rect_moduli(a_mm: f64, b_mm: f64, t_mm: f64) -> Option<SectionModuli> {
    let h = to_m(positive(a_mm)?);
    let b = to_m(positive(b_mm)?);
    let t = to_m(positive(t_mm)?);
    if h <= 2.0 * t || b <= 2.0 * t {
        return None;
    }
    let ix = (b * h.powi(3) - (b - 2.0 * t) * (h - 2.0 * t).powi(3)) / 12.0;
    let iy = (h * b.powi(3) - (h - 2.0 * t) * (b - 2.0 * t).powi(3)) / 12.0;
    SectionModuli::new(modulus_mm3(ix, h / 2.0), modulus_mm3(iy, b / 2.0))
}

/// Cross-sectional area of a rectangular hollow section (mm²)
pub fn hollow_rect_area(a_mm: f64, b_mm: f64, t_mm: f64) -> Option<f64> {
    let h = positive(a_mm)?;
    let b = positive(b_mm)?;
    let t = positive(t_mm)?;
    if h <= 2.0 * t || b <= 2.0 * t {
        return None;
    }
    positive(h * b - (h - 2.0 * t) * (b - 2.0 * t))
}

// =============================================================================
// SOLID RECTANGLE
// Also the envelope approximation for rolled I, H and U sections and bulb flats
// =============================================================================

/// Section moduli of a solid rectangle of height `h` and width `b`
///
/// # Formula
/// Wx = (b·h³/12) / (h/2) = b·h²/6
/// Wy = (h·b³/12) / (b/2) = h·b²/6
///
/// Rolled I/H/U sections are passed through here with their overall height
/// and flange width, ignoring the flange/web split.
///
/// # Example
/// ```rust
/// use muadil_core::equations::section::solid_rect_moduli;
///
/// let w = solid_rect_moduli(80.0, 7.0).unwrap();
/// assert!((w.wx_mm3 - 7.0 * 80.0 * 80.0 / 6.0).abs() < 1e-6);
/// assert!((w.wy_mm3 - 80.0 * 7.0 * 7.0 / 6.0).abs() < 1e-6);
/// ```
pub fn solid_rect_moduli(h_mm: f64, b_mm: f64) -> Option<SectionModuli> {
    let h = to_m(positive(h_mm)?);
    let b = to_m(positive(b_mm)?);
    let ix = b * h.powi(3) / 12.0;
    let iy = h * b.powi(3) / 12.0;
    SectionModuli::new(modulus_mm3(ix, h / 2.0), modulus_mm3(iy, b / 2.0))
}

/// Cross-sectional area of a solid rectangle (mm²)
pub fn solid_rect_area(h_mm: f64, b_mm: f64) -> Option<f64> {
    positive(positive(h_mm)? * positive(b_mm)?)
}

/// Section moduli of a flat bar of thickness `t` and height `h`
///
/// Same shape as [`solid_rect_moduli`], argument order follows the
/// "thickness, height" convention the flat-bar sweep uses.
#[inline]
pub fn flat_bar_moduli(t_mm: f64, h_mm: f64) -> Option<SectionModuli> {
    solid_rect_moduli(h_mm, t_mm)
}

/// Area of a rolled I, H or U section from its plates (mm²)
///
/// A = 2·b·tf + (h − 2tf)·tw
pub fn rolled_section_area(h_mm: f64, b_mm: f64, tw_mm: f64, tf_mm: f64) -> Option<f64> {
    let h = positive(h_mm)?;
    let b = positive(b_mm)?;
    let tw = positive(tw_mm)?;
    let tf = positive(tf_mm)?;
    let web = h - 2.0 * tf;
    if web <= 0.0 {
        return None;
    }
    positive(2.0 * b * tf + web * tw)
}

/// Bulb allowance applied to the plate area of a bulb flat
pub const BULB_AREA_FACTOR: f64 = 1.2;

/// Approximate area of a bulb flat (mm²): B·t plus the bulb allowance
pub fn bulb_flat_area(b_mm: f64, t_mm: f64) -> Option<f64> {
    Some(solid_rect_area(b_mm, t_mm)? * BULB_AREA_FACTOR)
}

// =============================================================================
// ANGLE (L-SECTION)
// =============================================================================

/// Section moduli of an equal or unequal angle
///
/// ```text
///     ┌──┐
///     │  │
///   a │  │
///     │  └──────┐ t
///     └─────────┘
///          b
/// ```
///
/// # Formula
/// Ix = [b·a³ − (b−t)(a−t)³] / 12,  Wx = Ix / (a/2)
/// Iy = [a·b³ − (a−t)(b−t)³] / 12,  Wy = Iy / (b/2)
///
/// This is the subtraction formula for a section symmetric about the bending
/// axis. It does not shift to the true L centroid, so the result is an
/// approximation kept for consistency with the published tables it is
/// compared against.
pub fn angle_moduli(a_mm: f64, b_mm: f64, t_mm: f64) -> Option<SectionModuli> {
    let a = to_m(positive(a_mm)?);
    let b = to_m(positive(b_mm)?);
    let t = to_m(positive(t_mm)?);
    if t >= a || t >= b {
        return None;
    }
    let ix = (b * a.powi(3) - (b - t) * (a - t).powi(3)) / 12.0;
    let iy = (a * b.powi(3) - (a - t) * (b - t).powi(3)) / 12.0;
    SectionModuli::new(modulus_mm3(ix, a / 2.0), modulus_mm3(iy, b / 2.0))
}

/// Cross-sectional area of an angle (mm²): a·t + b·t − t²
pub fn angle_area(a_mm: f64, b_mm: f64, t_mm: f64) -> Option<f64> {
    let a = positive(a_mm)?;
    let b = positive(b_mm)?;
    let t = positive(t_mm)?;
    if t >= a || t >= b {
        return None;
    }
    positive(a * t + b * t - t * t)
}

// =============================================================================
// SOLID ROUND AND SQUARE
// =============================================================================

/// Section moduli of a solid round bar: I = π·d⁴/64, W = I/(d/2)
pub fn solid_round_moduli(d_mm: f64) -> Option<SectionModuli> {
    let d = to_m(positive(d_mm)?);
    let i = PI * d.powi(4) / 64.0;
    let w = modulus_mm3(i, d / 2.0);
    SectionModuli::new(w, w)
}

/// Cross-sectional area of a solid round bar (mm²)
pub fn solid_round_area(d_mm: f64) -> Option<f64> {
    let d = positive(d_mm)?;
    positive(PI * (d / 2.0).powi(2))
}

/// Section moduli of a solid square bar: I = a⁴/12, W = I/(a/2)
pub fn solid_square_moduli(a_mm: f64) -> Option<SectionModuli> {
    let a = to_m(positive(a_mm)?);
    let i = a.powi(4) / 12.0;
    let w = modulus_mm3(i, a / 2.0);
    SectionModuli::new(w, w)
}

/// Cross-sectional area of a solid square bar (mm²)
pub fn solid_square_area(a_mm: f64) -> Option<f64> {
    let a = positive(a_mm)?;
    positive(a * a)
}

// =============================================================================
// FABRICATED T-SECTION (FLANGE + WEB)
// =============================================================================

/// Geometric properties of a flange-over-web T-section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeeProperties {
    /// Total area (mm²)
    pub area_mm2: f64,
    /// Centroid height above the bottom of the web (mm)
    pub centroid_mm: f64,
    /// Section moduli (mm³)
    pub moduli: SectionModuli,
}

/// Properties of a T-section built from a flange plate on top of a web plate
///
/// ```text
///     ┌───────────────┐  t_f
///     └─────┐   ┌─────┘
///           │   │
///       h_w │   │ t_w
///           │   │
///           └───┘
///     |<---- b_f ---->|
/// ```
///
/// # Formula
/// A_f = b_f·t_f,  y_f = h_w + t_f/2
/// A_w = t_w·h_w,  y_w = h_w/2
/// ȳ = (A_f·y_f + A_w·y_w) / (A_f + A_w)
/// Ix = Σ (I_part + A_part·(y_part − ȳ)²)
/// Iy = t_f·b_f³/12 + h_w·t_w³/12   (both plates share the vertical axis)
/// Wx = Ix / max(H − ȳ, ȳ),  Wy = Iy / (b_f/2)
///
/// # Example
/// ```rust
/// use muadil_core::equations::section::tee_properties;
///
/// let tee = tee_properties(40.0, 5.0, 5.0, 75.0).unwrap();
/// assert!((tee.moduli.wx_mm3 - 7486.3).abs() < 0.5);
/// assert!(tee_properties(40.0, 5.0, 5.0, 0.0).is_none());
/// ```
pub fn tee_properties(b_f_mm: f64, t_f_mm: f64, t_w_mm: f64, h_w_mm: f64) -> Option<TeeProperties> {
    let b_f = to_m(positive(b_f_mm)?);
    let t_f = to_m(positive(t_f_mm)?);
    let t_w = to_m(positive(t_w_mm)?);
    let h_w = to_m(positive(h_w_mm)?);

    let a_f = b_f * t_f;
    let a_w = t_w * h_w;
    let area = a_f + a_w;

    let y_f = h_w + t_f / 2.0;
    let y_w = h_w / 2.0;
    let y_bar = (a_f * y_f + a_w * y_w) / area;

    let ix_f = b_f * t_f.powi(3) / 12.0;
    let ix_w = t_w * h_w.powi(3) / 12.0;
    let ix = ix_f + a_f * (y_f - y_bar).powi(2) + ix_w + a_w * (y_w - y_bar).powi(2);

    let iy = t_f * b_f.powi(3) / 12.0 + h_w * t_w.powi(3) / 12.0;

    let height = h_w + t_f;
    let c_x = (height - y_bar).max(y_bar);
    let c_y = b_f / 2.0;

    Some(TeeProperties {
        area_mm2: positive(area * crate::units::MM2_PER_M2)?,
        centroid_mm: y_bar * MM_PER_M,
        moduli: SectionModuli::new(modulus_mm3(ix, c_x), modulus_mm3(iy, c_y))?,
    })
}

// =============================================================================
// UNIT TESTS
// =============================================================================
