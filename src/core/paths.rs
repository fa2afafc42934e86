//! Data directory resolution and input file locations.

use crate::{error::DraftGuideError, Result, DATA_DIR_ENV_VAR};
use std::path::{Path, PathBuf};

/// Default data directory: `~/.local/share/ffl-draft-guide` (platform equivalent).
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|base| base.join("ffl-draft-guide"))
}

/// Resolve the data directory from an explicit flag, then the
/// `FFL_DRAFT_GUIDE_DATA_DIR` env var, then the platform default.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV_VAR) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    default_data_dir().ok_or_else(|| DraftGuideError::MissingDataDir {
        env_var: DATA_DIR_ENV_VAR.to_string(),
    })
}

/// Locations of the five input tables inside a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub weekly_stats: PathBuf,
    pub season_stats: PathBuf,
    pub coaching_staff: PathBuf,
    pub active_rosters: PathBuf,
    pub active_contracts: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            weekly_stats: dir.join("weekly_stats.csv"),
            season_stats: dir.join("season_stats.csv"),
            coaching_staff: dir.join("coaching_staff.csv"),
            active_rosters: dir.join("active_rosters.csv"),
            active_contracts: dir.join("active_contracts.csv"),
        }
    }
}
