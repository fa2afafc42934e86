//! Selection and filter types shared by the pipeline and the CLI.

use crate::error::DraftGuideError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Part of the NFL calendar a weekly row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum SeasonType {
    /// Regular season games
    #[serde(rename = "REG")]
    #[value(name = "reg")]
    Regular,
    /// Playoff games
    #[serde(rename = "POST")]
    #[value(name = "post")]
    Postseason,
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeasonType::Regular => "REG",
            SeasonType::Postseason => "POST",
        };
        write!(f, "{}", s)
    }
}

/// Granularity of the statistics table a caller asks for.
///
/// Parsing is deliberately strict: an unknown level is a caller bug, not a
/// data gap, so it surfaces as [`DraftGuideError::InvalidLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationLevel {
    Season,
    Weekly,
}

impl fmt::Display for AggregationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AggregationLevel::Season => "season",
            AggregationLevel::Weekly => "weekly",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AggregationLevel {
    type Err = DraftGuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "season" => Ok(AggregationLevel::Season),
            "weekly" => Ok(AggregationLevel::Weekly),
            _ => Err(DraftGuideError::InvalidLevel {
                level: s.to_string(),
            }),
        }
    }
}

/// Fantasy scoring metric used for leaderboards and ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum FantasyMetric {
    /// Standard scoring season total
    Standard,
    /// PPR scoring season total
    Ppr,
    /// Standard points per game played
    StandardPerGame,
    /// PPR points per game played
    PprPerGame,
}

impl FantasyMetric {
    /// Per-game metrics are skewed by one-game samples and filter them out.
    pub fn is_per_game(&self) -> bool {
        matches!(self, FantasyMetric::StandardPerGame | FantasyMetric::PprPerGame)
    }

    pub fn is_ppr(&self) -> bool {
        matches!(self, FantasyMetric::Ppr | FantasyMetric::PprPerGame)
    }

    /// The season-total metric of the same scoring system.
    pub fn season_total(&self) -> FantasyMetric {
        if self.is_ppr() {
            FantasyMetric::Ppr
        } else {
            FantasyMetric::Standard
        }
    }
}

impl fmt::Display for FantasyMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FantasyMetric::Standard => "Standard Points",
            FantasyMetric::Ppr => "PPR Points",
            FantasyMetric::StandardPerGame => "Standard Points Per Game",
            FantasyMetric::PprPerGame => "PPR Points Per Game",
        };
        write!(f, "{}", s)
    }
}

/// Team-level offensive metric used for league ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum TeamMetric {
    PassingYards,
    RushingYards,
    TotalYards,
    PassingTds,
    RushingTds,
    TotalTds,
}

impl fmt::Display for TeamMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TeamMetric::PassingYards => "Pass Yards",
            TeamMetric::RushingYards => "Rush Yards",
            TeamMetric::TotalYards => "Total Yards",
            TeamMetric::PassingTds => "Pass TDs",
            TeamMetric::RushingTds => "Rush TDs",
            TeamMetric::TotalTds => "Total TDs",
        };
        write!(f, "{}", s)
    }
}

/// Grouping used when ranking players.
///
/// Callers always choose: a positional rank and an overall rank of the same
/// player are different numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum RankScope {
    /// Rank across every position within the season
    Season,
    /// Rank within the player's position for the season
    SeasonPosition,
}
