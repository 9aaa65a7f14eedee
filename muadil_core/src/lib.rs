//! # muadil_core - Section Modulus Substitute Finder
//!
//! `muadil_core` finds substitute ("muadil") cross-sections for a reference
//! profile. Given a pipe, hollow section, angle, rolled beam, solid bar, bulb
//! flat or flat bar, it computes the reference's section moduli, area and
//! weight, then looks for profiles whose Wx or Wy falls within a tolerance
//! band of the reference:
//!
//! - standard profiles from a catalog
//! - flat bars of the same height, over a thickness sweep
//! - fabricated T-sections, over a flange/web plate sweep
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Degrade, don't fail**: undefined geometry drops a row, invalid search
//!   input yields an empty list, a missing picture is just not shown
//!
//! ## Quick Start
//!
//! ```rust
//! use muadil_core::catalog;
//! use muadil_core::profiles::ProfileFamily;
//! use muadil_core::settings::SearchSettings;
//! use muadil_core::study::{Reference, Study};
//!
//! let result = Study::new(Reference::catalog(ProfileFamily::IBeam, "IPE 200"))
//!     .run(&SearchSettings::default(), catalog::builtin())?;
//!
//! for candidate in &result.catalog_matches.candidates {
//!     println!("{} ({}): score {:.0}", candidate.label, candidate.tag, candidate.score);
//! }
//! # Ok::<(), muadil_core::errors::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Area and section modulus formulas
//! - [`profiles`] - Profile families, rows and the family registry
//! - [`catalog`] - Built-in profile tables and aggregation
//! - [`search`] - Catalog filter, flat-bar sweep and T-section sweep
//! - [`study`] - One reference through the whole pipeline
//! - [`settings`] - Tolerance, sweep ranges and toggles
//! - [`materials`] / [`weight`] - Densities and member weight
//! - [`illustrations`] - Reference drawing per family
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Settings and catalog files

pub mod catalog;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod illustrations;
pub mod materials;
pub mod profiles;
pub mod search;
pub mod settings;
pub mod study;
pub mod units;
pub mod weight;

// Re-export commonly used types at crate root for convenience
pub use catalog::{Catalog, CatalogEntry};
pub use errors::{CalcError, CalcResult};
pub use materials::Material;
pub use profiles::{Dimensions, ProfileFamily, ProfileRow};
pub use search::{CandidateRecord, SearchTarget};
pub use settings::SearchSettings;
pub use study::{Reference, Study, StudyResult};
