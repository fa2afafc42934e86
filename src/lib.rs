//! Fantasy Football Draft Guide Library
//!
//! Turns nflverse-style CSV tables (weekly player stats, coaching staffs,
//! active rosters and contracts) into draft-prep views: league summaries,
//! team and coach histories, and player profiles.
//!
//! ## Pipeline
//!
//! - **Storage**: load and validate the CSV tables, normalizing relocated
//!   franchise codes (`OAK` -> `LV`, `SD` -> `LAC`, ...)
//! - **Aggregation**: weekly rows -> season records with usage and target share
//! - **Ranking**: competition ranks (`1, 1, 3`) per season, position or team
//! - **Coaching**: resolve who held each slot, with play-caller fallback and
//!   interim flags
//! - **Views**: cached, serializable models behind each CLI command
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ffl_draft_guide::{commands::league_summary::league_summary, DashboardContext};
//! use ffl_draft_guide::{FantasyMetric, Season};
//!
//! # fn example() -> ffl_draft_guide::Result<()> {
//! let ctx = DashboardContext::load(None)?;
//! let summary = league_summary(&ctx, Season::new(2024), FantasyMetric::Ppr);
//! println!("{}", serde_json::to_string_pretty(&summary)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at the directory holding the CSV tables:
//! ```bash
//! export FFL_DRAFT_GUIDE_DATA_DIR=~/nfl-data
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{
    AggregationLevel, FantasyMetric, PlayerId, Position, RankScope, Season, SeasonType, TeamId,
    TeamMetric, Week,
};
pub use commands::{DashboardContext, DataOutcome};
pub use core::{DataPaths, TeamRegistry};
pub use error::{DraftGuideError, Result};
pub use storage::DataSet;

pub const DATA_DIR_ENV_VAR: &str = "FFL_DRAFT_GUIDE_DATA_DIR";
