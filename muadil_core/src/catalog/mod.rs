//! Profile Catalog
//!
//! The read-only universe of standard profiles the catalog search scans.
//!
//! ## Data Source
//!
//! The built-in tables in [`tables`] are loaded once per process into
//! [`builtin`] and shared read-only. A catalog can also be read from a JSON
//! file (see [`crate::file_io::load_catalog`]) and used in its place.
//!
//! ## Aggregation
//!
//! [`Catalog::aggregate`] flattens every family into one list of
//! [`CatalogEntry`] records, computing the moduli of each row on the way.
//! Rows with undefined geometry are skipped, not reported as errors. The list
//! follows family declaration order and is recomputed on every call.
//!
//! ## Example
//!
//! ```rust
//! use muadil_core::catalog;
//! use muadil_core::profiles::ProfileFamily;
//!
//! let ipe200 = catalog::builtin().lookup(ProfileFamily::IBeam, "IPE 200")?;
//! println!("{}", ipe200.moduli().unwrap());
//!
//! let entries = catalog::builtin().aggregate();
//! assert_eq!(entries[0].family, ProfileFamily::Pipe);
//! # Ok::<(), muadil_core::errors::CalcError>(())
//! ```

pub mod tables;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::equations::SectionModuli;
use crate::errors::{CalcError, CalcResult};
use crate::profiles::{ProfileFamily, ProfileRow};

pub use tables::builtin_catalog;

static BUILTIN: Lazy<Catalog> = Lazy::new(builtin_catalog);

/// The built-in catalog, loaded on first use and shared for the process lifetime
pub fn builtin() -> &'static Catalog {
    &BUILTIN
}

/// One aggregated catalog record with its computed moduli
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Profile display name
    pub name: String,
    /// Profile family
    pub family: ProfileFamily,
    /// Section moduli (mm³)
    pub moduli: SectionModuli,
}

/// A set of profile tables
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Rows in insertion order
    rows: Vec<ProfileRow>,

    /// Row indices grouped by family, in insertion order
    by_family: HashMap<ProfileFamily, Vec<usize>>,

    /// Data version label (e.g., "builtin", a file name)
    pub version: Option<String>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from rows, keeping their order within each family
    pub fn from_rows(rows: impl IntoIterator<Item = ProfileRow>) -> Self {
        let mut catalog = Catalog::new();
        for row in rows {
            catalog.insert(row);
        }
        catalog
    }

    /// Insert a row
    ///
    /// A row with the same family and name as an existing one replaces it in
    /// place, so identity stays unique.
    pub fn insert(&mut self, row: ProfileRow) {
        let family = row.family;
        let existing = self
            .by_family
            .get(&family)
            .and_then(|idx| idx.iter().copied().find(|&i| self.rows[i].name_matches(&row.name)));

        match existing {
            Some(i) => self.rows[i] = row,
            None => {
                self.rows.push(row);
                self.by_family.entry(family).or_default().push(self.rows.len() - 1);
            }
        }
    }

    /// All rows in insertion order
    pub fn rows(&self) -> &[ProfileRow] {
        &self.rows
    }

    /// Rows of one family, in table order
    pub fn rows_of(&self, family: ProfileFamily) -> Vec<&ProfileRow> {
        self.by_family
            .get(&family)
            .map(|idx| idx.iter().map(|&i| &self.rows[i]).collect())
            .unwrap_or_default()
    }

    /// Families that have at least one row, in declaration order
    pub fn families(&self) -> Vec<ProfileFamily> {
        ProfileFamily::ALL
            .into_iter()
            .filter(|f| self.by_family.get(f).is_some_and(|idx| !idx.is_empty()))
            .collect()
    }

    /// Look up a row by family and name
    ///
    /// Name matching ignores case and whitespace ("ipe200" finds "IPE 200").
    pub fn lookup(&self, family: ProfileFamily, name: &str) -> CalcResult<&ProfileRow> {
        self.rows_of(family)
            .into_iter()
            .find(|r| r.name_matches(name))
            .ok_or_else(|| CalcError::profile_not_found(family.tag(), name))
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Flatten every family into one list of defined (name, family, Wx, Wy)
    /// records, in family declaration order
    pub fn aggregate(&self) -> Vec<CatalogEntry> {
        let mut entries = Vec::with_capacity(self.rows.len());
        let mut skipped = 0usize;

        for family in ProfileFamily::ALL {
            for row in self.rows_of(family) {
                match row.try_moduli() {
                    Ok(moduli) => entries.push(CatalogEntry {
                        name: row.name.clone(),
                        family,
                        moduli,
                    }),
                    Err(e) => {
                        skipped += 1;
                        tracing::debug!(row = %row, error = %e, "skipping catalog row");
                    }
                }
            }
        }

        tracing::trace!(entries = entries.len(), skipped, "catalog aggregated");
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::Dimensions;

    fn pipe(name: &str, od: f64, t: f64) -> ProfileRow {
        ProfileRow::new(
            ProfileFamily::Pipe,
            name,
            Dimensions::new().with("OD", od).with("t", t),
        )
    }

    #[test]
    fn test_builtin_loaded_once() {
        let a = builtin() as *const Catalog;
        let b = builtin() as *const Catalog;
        assert_eq!(a, b);
        assert!(builtin().len() > 150);
    }

    #[test]
    fn test_aggregate_skips_undefined_rows() {
        let catalog = Catalog::from_rows([
            pipe("good", 60.3, 3.91),
            pipe("solid", 60.0, 30.0),
            pipe("too thick", 60.0, 40.0),
            pipe("no wall", 60.0, 0.0),
        ]);
        let entries = catalog.aggregate();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "good");
    }

    #[test]
    fn test_aggregate_keeps_rolled_envelope_rows() {
        let catalog = Catalog::from_rows(vec![ProfileRow::new(
            ProfileFamily::Channel,
            "UPN 100",
            Dimensions::new().with("h", 100.0).with("b", 50.0),
        )]);
        let entries = catalog.aggregate();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "UPN 100");
    }

    #[test]
    fn test_aggregate_follows_family_order() {
        let catalog = Catalog::from_rows([
            ProfileRow::new(ProfileFamily::SolidRound, "Ø20", Dimensions::new().with("d", 20.0)),
            pipe("p1", 48.3, 3.68),
            ProfileRow::new(ProfileFamily::SolidSquare, "□20", Dimensions::new().with("a", 20.0)),
            pipe("p2", 60.3, 3.91),
        ]);
        let names: Vec<_> = catalog.aggregate().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["p1", "p2", "Ø20", "□20"]);
        assert_eq!(
            catalog.families(),
            vec![ProfileFamily::Pipe, ProfileFamily::SolidRound, ProfileFamily::SolidSquare]
        );
    }

    #[test]
    fn test_builtin_aggregate_covers_all_rows() {
        let entries = builtin().aggregate();
        assert_eq!(entries.len(), builtin().len());
        assert!(entries.iter().all(|e| e.moduli.wx_mm3 > 0.0 && e.moduli.wy_mm3 > 0.0));
    }

    #[test]
    fn test_insert_replaces_same_identity() {
        let mut catalog = Catalog::new();
        catalog.insert(pipe("DN 50 SCH 40", 60.3, 3.91));
        catalog.insert(pipe("dn 50 sch 40", 60.3, 4.0));
        assert_eq!(catalog.len(), 1);
        let row = catalog.lookup(ProfileFamily::Pipe, "DN 50 SCH 40").unwrap();
        assert_eq!(row.dims.get("t"), Some(4.0));
    }

    #[test]
    fn test_lookup_not_found() {
        let err = builtin().lookup(ProfileFamily::IBeam, "IPE 999").unwrap_err();
        assert_eq!(err.error_code(), "PROFILE_NOT_FOUND");
    }
}
