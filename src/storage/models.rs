//! Data models for the loaded statistics tables

use crate::cli::types::{PlayerId, Position, Season, SeasonType, TeamId, Week};
use crate::error::DraftGuideError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

/// Raw counting stats shared by weekly and season rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CountingStats {
    pub attempts: f64,
    pub completions: f64,
    pub passing_yards: f64,
    pub passing_tds: f64,
    pub interceptions: f64,
    pub carries: f64,
    pub rushing_yards: f64,
    pub rushing_tds: f64,
    pub targets: f64,
    pub receptions: f64,
    pub receiving_yards: f64,
    pub receiving_tds: f64,
    pub fantasy_points: f64,
    pub fantasy_points_ppr: f64,
}

impl CountingStats {
    /// Passing + rushing + receiving yards.
    pub fn total_yards(&self) -> f64 {
        self.passing_yards + self.rushing_yards + self.receiving_yards
    }

    /// Passing + rushing + receiving touchdowns.
    pub fn total_tds(&self) -> f64 {
        self.passing_tds + self.rushing_tds + self.receiving_tds
    }

    /// Any passing, rushing or receiving involvement.
    pub fn has_offensive_touches(&self) -> bool {
        self.attempts + self.carries + self.targets > 0.0
    }
}

impl AddAssign<&CountingStats> for CountingStats {
    fn add_assign(&mut self, rhs: &CountingStats) {
        self.attempts += rhs.attempts;
        self.completions += rhs.completions;
        self.passing_yards += rhs.passing_yards;
        self.passing_tds += rhs.passing_tds;
        self.interceptions += rhs.interceptions;
        self.carries += rhs.carries;
        self.rushing_yards += rhs.rushing_yards;
        self.rushing_tds += rhs.rushing_tds;
        self.targets += rhs.targets;
        self.receptions += rhs.receptions;
        self.receiving_yards += rhs.receiving_yards;
        self.receiving_tds += rhs.receiving_tds;
        self.fantasy_points += rhs.fantasy_points;
        self.fantasy_points_ppr += rhs.fantasy_points_ppr;
    }
}

impl<'a> std::iter::Sum<&'a CountingStats> for CountingStats {
    fn sum<I: Iterator<Item = &'a CountingStats>>(iter: I) -> Self {
        iter.fold(CountingStats::default(), |mut acc, stats| {
            acc += stats;
            acc
        })
    }
}

/// One player's line for one game week. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStatRecord {
    pub player_id: PlayerId,
    pub player_display_name: String,
    pub recent_team: String,
    /// Raw roster position; may be a non-fantasy position such as `FB`.
    pub position: String,
    pub season: Season,
    pub week: Week,
    pub season_type: SeasonType,
    pub stats: CountingStats,
}

/// Season totals for one (season, player, team, position).
///
/// Always rebuilt from weekly rows; ratio fields are `None` when their
/// denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStatRecord {
    pub season: Season,
    pub player_id: PlayerId,
    pub player_display_name: String,
    pub recent_team: String,
    pub team_id: Option<TeamId>,
    pub position: Position,
    pub stats: CountingStats,
    pub games_played: u32,
    /// Team pass attempts + team carries.
    pub team_total_plays: f64,
    pub team_pass_attempts: f64,
    /// carries / team_total_plays
    pub usage: Option<f64>,
    /// targets / team_pass_attempts
    pub target_share: Option<f64>,
    pub fantasy_points_pg: Option<f64>,
    pub fantasy_points_ppr_pg: Option<f64>,
}

/// Coaching roles tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CoachRole {
    HeadCoach,
    OffensiveCoordinator,
    InterimHeadCoach,
    InterimOffensiveCoordinator,
}

impl CoachRole {
    pub const ALL: [CoachRole; 4] = [
        CoachRole::HeadCoach,
        CoachRole::OffensiveCoordinator,
        CoachRole::InterimHeadCoach,
        CoachRole::InterimOffensiveCoordinator,
    ];

    /// The interim role that signals a mid-season replacement of this role.
    pub fn interim(&self) -> Option<CoachRole> {
        match self {
            CoachRole::HeadCoach => Some(CoachRole::InterimHeadCoach),
            CoachRole::OffensiveCoordinator => Some(CoachRole::InterimOffensiveCoordinator),
            CoachRole::InterimHeadCoach | CoachRole::InterimOffensiveCoordinator => None,
        }
    }

    /// Short column label (HC, OC, Interim HC, Interim OC).
    pub fn short_label(&self) -> &'static str {
        match self {
            CoachRole::HeadCoach => "HC",
            CoachRole::OffensiveCoordinator => "OC",
            CoachRole::InterimHeadCoach => "Interim HC",
            CoachRole::InterimOffensiveCoordinator => "Interim OC",
        }
    }
}

impl fmt::Display for CoachRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoachRole::HeadCoach => "Head Coach",
            CoachRole::OffensiveCoordinator => "Offensive Coordinator",
            CoachRole::InterimHeadCoach => "Interim Head Coach",
            CoachRole::InterimOffensiveCoordinator => "Interim Offensive Coordinator",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for CoachRole {
    type Err = DraftGuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "head coach" | "hc" => Ok(CoachRole::HeadCoach),
            "offensive coordinator" | "oc" => Ok(CoachRole::OffensiveCoordinator),
            "interim head coach" | "interim hc" => Ok(CoachRole::InterimHeadCoach),
            "interim offensive coordinator" | "interim oc" => {
                Ok(CoachRole::InterimOffensiveCoordinator)
            }
            _ => Err(DraftGuideError::InvalidRole {
                role: s.to_string(),
            }),
        }
    }
}

/// One coach holding one role for one team-season.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoachAssignment {
    pub season: Season,
    pub team_abbr: String,
    pub team_name: String,
    pub team_id: Option<TeamId>,
    pub coach: String,
    pub role: CoachRole,
    pub play_calling: bool,
}

/// Active roster entry for a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,
    /// Raw roster position.
    pub position: String,
}

/// Active contract and draft details. Every field may be missing upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    /// Same identifier space as [`RosterEntry::player_id`].
    pub player_id: PlayerId,
    pub year_signed: Option<u16>,
    pub years: Option<u16>,
    /// Millions of dollars.
    pub value: Option<f64>,
    /// Millions of dollars.
    pub guaranteed: Option<f64>,
    pub draft_year: Option<u16>,
    pub draft_team: Option<String>,
    pub draft_round: Option<u16>,
    pub draft_overall: Option<u16>,
}
