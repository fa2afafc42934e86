//! Error types for the fantasy football draft guide

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, DraftGuideError>;

#[derive(Error, Debug)]
pub enum DraftGuideError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid level: {level} (expected 'season' or 'weekly')")]
    InvalidLevel { level: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid coach role: {role}")]
    InvalidRole { role: String },

    #[error("Failed to parse season or week: {0}")]
    InvalidSeason(#[from] std::num::ParseIntError),

    #[error("Duplicate {table} record for key {key}")]
    DuplicateRecord { table: String, key: String },

    #[error("Data directory not provided and {env_var} environment variable not set")]
    MissingDataDir { env_var: String },

    #[error("Player not found: {id}")]
    PlayerNotFound { id: String },

    #[error("Team not found: {team}")]
    TeamNotFound { team: String },

    #[error("Coach not found: {name}")]
    CoachNotFound { name: String },
}

impl DraftGuideError {
    /// Wrap a csv error with the file it came from.
    pub fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        DraftGuideError::Csv {
            path: path.display().to_string(),
            source,
        }
    }
}
