//! # Section Equations
//!
//! The closed-form formulas the rest of the crate is built on. Keeping them
//! in one place makes them easy to check against handbook tables.
//!
//! ## Modules
//!
//! - [`section`] - Areas and elastic section moduli (Wx, Wy) per shape
//!
//! ## Axis Convention
//!
//! - **x axis**: horizontal; Wx governs bending in the plane of the height
//! - **y axis**: vertical; Wy governs bending in the plane of the width
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition
//! - EN 10365 / EN 10219 / ASME B36.10M dimension tables

pub mod section;

pub use section::{
    angle_area,
    angle_moduli,
    bulb_flat_area,
    flat_bar_moduli,
    hollow_rect_area,
    hollow_rect_moduli,
    pipe_area,
    pipe_moduli,
    positive,
    rolled_section_area,
    solid_rect_area,
    solid_rect_moduli,
    solid_round_area,
    solid_round_moduli,
    solid_square_area,
    solid_square_moduli,
    tee_properties,
    SectionModuli,
    TeeProperties,
};
