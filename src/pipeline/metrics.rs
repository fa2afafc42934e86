//! Derived ratios over counting stats.
//!
//! Every function here is total: a zero or non-finite denominator yields
//! `None` (or `0.0` where noted) instead of an error, so one player's missing
//! data never stops a table from rendering.

use crate::storage::SeasonStatRecord;
use serde::Serialize;


/// `numerator / denominator`, or `None` when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return None;
    }
    Some(numerator / denominator)
}

pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Carries as a share of team total plays.
pub fn usage(carries: f64, team_total_plays: f64) -> Option<f64> {
    ratio(carries, team_total_plays)
}

/// Targets as a share of team pass attempts.
pub fn target_share(targets: f64, team_pass_attempts: f64) -> Option<f64> {
    ratio(targets, team_pass_attempts)
}

/// Pass attempts as a share of team total plays.
pub fn pass_play_share(attempts: f64, team_total_plays: f64) -> Option<f64> {
    ratio(attempts, team_total_plays)
}

pub fn per_game(total: f64, games_played: u32) -> Option<f64> {
    ratio(total, f64::from(games_played))
}

/// Rushing yards per carry; `0.0` for a player with no carries.
pub fn yards_per_carry(rushing_yards: f64, carries: f64) -> f64 {
    ratio(rushing_yards, carries).unwrap_or(0.0)
}

/// Completion percentage, one decimal.
pub fn completion_pct(completions: f64, attempts: f64) -> Option<f64> {
    ratio(completions, attempts).map(|r| round_to(r * 100.0, 1))
}

/// Catch percentage, one decimal.
pub fn catch_pct(receptions: f64, targets: f64) -> Option<f64> {
    ratio(receptions, targets).map(|r| round_to(r * 100.0, 1))
}

/// `part` as a percentage of `whole`, two decimals.
pub fn share_pct(part: f64, whole: f64) -> Option<f64> {
    ratio(part, whole).map(|r| round_to(r * 100.0, 2))
}

/// Pass and run percentages of an offense's plays.
///
/// Pass % is rounded to two decimals and run % is its complement, so the
/// pair always sums to exactly 100.
pub fn pass_run_split(pass_attempts: f64, carries: f64) -> Option<(f64, f64)> {
    let pass_pct = share_pct(pass_attempts, pass_attempts + carries)?;
    Some((pass_pct, round_to(100.0 - pass_pct, 2)))
}

/// How a running back is used relative to the team.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RbUsage {
    /// Carries over team rushing plays.
    pub run_game: Option<f64>,
    /// Carries plus targets over team total plays.
    pub total: Option<f64>,
}

pub fn rb_usage(record: &SeasonStatRecord) -> RbUsage {
    let team_carries = record.team_total_plays - record.team_pass_attempts;
    RbUsage {
        run_game: ratio(record.stats.carries, team_carries),
        total: ratio(
            record.stats.carries + record.stats.targets,
            record.team_total_plays,
        ),
    }
}

/// Every derived field for one season record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub usage: Option<f64>,
    pub target_share: Option<f64>,
    pub pass_play_share: Option<f64>,
    pub yards_per_carry: f64,
    pub completion_pct: Option<f64>,
    pub catch_pct: Option<f64>,
    pub fantasy_points_pg: Option<f64>,
    pub fantasy_points_ppr_pg: Option<f64>,
    pub attempts_per_game: Option<f64>,
    pub total_yards: f64,
    pub total_tds: f64,
}

impl DerivedMetrics {
    pub fn for_record(record: &SeasonStatRecord) -> Self {
        let s = &record.stats;
        Self {
            usage: usage(s.carries, record.team_total_plays),
            target_share: target_share(s.targets, record.team_pass_attempts),
            pass_play_share: pass_play_share(s.attempts, record.team_total_plays),
            yards_per_carry: yards_per_carry(s.rushing_yards, s.carries),
            completion_pct: completion_pct(s.completions, s.attempts),
            catch_pct: catch_pct(s.receptions, s.targets),
            fantasy_points_pg: per_game(s.fantasy_points, record.games_played),
            fantasy_points_ppr_pg: per_game(s.fantasy_points_ppr, record.games_played),
            attempts_per_game: per_game(s.attempts, record.games_played),
            total_yards: s.total_yards(),
            total_tds: s.total_tds(),
        }
    }
}
