//! Reference illustrations
//!
//! Each family belongs to a drawing group, and each group has one image under
//! the assets directory. A missing image is not an error for callers: the
//! lookup just yields nothing to show.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::profiles::ProfileFamily;

/// Drawing group of a family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IllustrationGroup {
    /// IPE, HEA, HEB and UPN
    RolledBeams,
    /// Everything else
    General,
}

impl IllustrationGroup {
    pub fn of(family: ProfileFamily) -> Self {
        if family.is_rolled() {
            IllustrationGroup::RolledBeams
        } else {
            IllustrationGroup::General
        }
    }

    /// Image file name inside the assets directory
    pub fn file_name(&self) -> &'static str {
        match self {
            IllustrationGroup::RolledBeams => "profil_set2.png",
            IllustrationGroup::General => "profil_set1.png",
        }
    }
}

/// Path of the family's illustration, or [`CalcError::MissingResource`]
pub fn try_illustration_for(family: ProfileFamily, assets_dir: &Path) -> CalcResult<PathBuf> {
    let path = assets_dir.join(IllustrationGroup::of(family).file_name());
    if path.is_file() {
        Ok(path)
    } else {
        Err(CalcError::missing_resource(
            path.display().to_string(),
            "illustration file not found",
        ))
    }
}

/// Path of the family's illustration if the file exists
pub fn illustration_for(family: ProfileFamily, assets_dir: &Path) -> Option<PathBuf> {
    match try_illustration_for(family, assets_dir) {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::debug!(family = family.tag(), error = %e, "no illustration");
            None
        }
    }
}
