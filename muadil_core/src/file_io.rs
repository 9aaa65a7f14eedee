//! # File I/O Module
//!
//! Reads the optional inputs that replace built-in defaults:
//!
//! - **Settings** (`.toml`): a [`SearchSettings`] document; missing keys take
//!   their defaults, and the result is validated.
//! - **Catalogs** (`.json`): an array of [`ProfileRow`] objects. Rows are kept
//!   even when their geometry is undefined; aggregation filters them.
//!
//! Catalogs can also be written back (e.g. the built-in one, as a template to
//! edit). Writes go to a `.tmp` file that is synced and renamed into place.
//!
//! ## Example
//!
//! ```rust,no_run
//! use muadil_core::file_io::{load_catalog, load_settings};
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("muadil.toml"))?;
//! let catalog = load_catalog(Path::new("profiles.json"))?;
//! println!("{} rows, tolerance {}", catalog.len(), settings.tolerance);
//! # Ok::<(), muadil_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::catalog::Catalog;
use crate::errors::{CalcError, CalcResult};
use crate::profiles::ProfileRow;
use crate::settings::SearchSettings;

fn read_to_string(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Load and validate search settings from a TOML file
pub fn load_settings(path: &Path) -> CalcResult<SearchSettings> {
    let contents = read_to_string(path)?;
    let settings: SearchSettings = toml::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid TOML in {}: {}", path.display(), e),
    })?;
    settings.validate()?;

    tracing::debug!(path = %path.display(), tolerance = settings.tolerance, "settings loaded");
    Ok(settings)
}

/// Load a catalog from a JSON array of rows
///
/// The file name becomes the catalog's version label.
pub fn load_catalog(path: &Path) -> CalcResult<Catalog> {
    let contents = read_to_string(path)?;
    let rows: Vec<ProfileRow> = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    let mut catalog = Catalog::from_rows(rows);
    catalog.version = path.file_name().map(|n| n.to_string_lossy().into_owned());

    tracing::debug!(path = %path.display(), rows = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Write a catalog as a JSON array of rows, atomically
pub fn save_catalog(catalog: &Catalog, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(catalog.rows()).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::profiles::ProfileFamily;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("muadil.toml");
        fs::write(
            &path,
            "tolerance = 0.05\nmax_results = 20\n\n[flat_bar]\nmax_thickness_mm = 40\n",
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.tolerance, 0.05);
        assert_eq!(settings.max_results, Some(20));
        assert_eq!(settings.flat_bar.max_thickness_mm, 40);
        assert_eq!(settings.flat_bar.min_thickness_mm, 2);
    }

    #[test]
    fn test_settings_validated_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "tolerance = 2.0\n").unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "INVALID_INPUT");

        fs::write(&path, "tolerance = \"wide\"\n").unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_catalog(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_load_catalog_keeps_undefined_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shop.json");
        fs::write(
            &path,
            r#"[
                {"family": "Pipe", "name": "P1", "dims": {"OD": 60.3, "t": 3.91}},
                {"family": "Pipe", "name": "P2", "dims": {"OD": 60.0, "t": 31.0}},
                {"family": "IBeam", "name": "I1", "dims": {"h": 200, "b": 100, "tw": 5.6, "tf": 8.5}}
            ]"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.version.as_deref(), Some("shop.json"));
        assert_eq!(catalog.aggregate().len(), 2);
    }

    #[test]
    fn test_catalog_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("builtin.json");
        save_catalog(catalog::builtin(), &path).unwrap();
        assert!(!dir.path().join("builtin.json.tmp").exists());

        let reloaded = load_catalog(&path).unwrap();
        assert_eq!(reloaded.len(), catalog::builtin().len());
        assert_eq!(
            reloaded.rows_of(ProfileFamily::Channel).len(),
            catalog::builtin().rows_of(ProfileFamily::Channel).len()
        );
    }
}
