//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{FantasyMetric, PlayerId, Position, Season};

/// Options shared by every command
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Directory holding the CSV tables (or set `FFL_DRAFT_GUIDE_DATA_DIR`).
    #[clap(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output results as JSON instead of text tables.
    #[clap(long, global = true)]
    pub json: bool,

    /// Debug logging (overridden by `RUST_LOG`).
    #[clap(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// League-wide team offense ranks, positional totals and leaders
    LeagueSummary {
        /// Season year; defaults to the latest season with statistics.
        #[clap(long, short)]
        season: Option<Season>,

        /// Scoring metric for the leaderboards.
        #[clap(long, short, value_enum, default_value_t = FantasyMetric::Ppr)]
        metric: FantasyMetric,
    },

    /// Every team's coaching staff and offensive profile for a season
    TeamOverview {
        /// Season year; defaults to the latest season with statistics.
        #[clap(long, short)]
        season: Option<Season>,
    },

    /// Player usage under a coach's offense (or the whole league)
    CoachOverview {
        /// Season year; defaults to the latest season with statistics.
        #[clap(long, short)]
        season: Option<Season>,

        /// Head coach or offensive coordinator name; omit for the league.
        #[clap(long, short)]
        coach: Option<String>,
    },

    /// Season-by-season history of one franchise
    TeamHistory {
        /// Team abbreviation; historical codes such as `OAK` are accepted.
        team: String,
    },

    /// A coach's career: top players, league comparison and usage patterns
    CoachHistory {
        /// Coach name; omit to list the current head coaches and coordinators.
        coach: Option<String>,

        /// Position to analyze.
        #[clap(long, short, default_value = "RB")]
        position: Position,

        /// Scoring metric used to pick top players.
        #[clap(long, short, value_enum, default_value_t = FantasyMetric::Ppr)]
        metric: FantasyMetric,
    },

    /// Roster, contract, season history and weekly scoring for one player
    PlayerProfile {
        /// Player GSIS id (e.g. `00-0033873`).
        player_id: PlayerId,

        /// Season for the weekly scoring series; defaults to the latest.
        #[clap(long, short)]
        weekly_season: Option<Season>,
    },

    /// Aggregate weekly_stats.csv into season_stats.csv
    BuildSeason {
        /// Output path; defaults to season_stats.csv in the data directory.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "ffl-draft-guide",
    about = "Fantasy football draft guide built on NFL statistics tables"
)]
pub struct DraftGuide {
    #[clap(flatten)]
    pub global: GlobalOpts,

    #[clap(subcommand)]
    pub command: Commands,
}
