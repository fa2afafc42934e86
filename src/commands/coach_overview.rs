//! Per-player usage for a season, optionally limited to one coach's teams.

use std::collections::BTreeSet;

use serde::Serialize;

use super::common::{fmt_opt, fmt_rank, print_json, DashboardContext, DataOutcome};
use crate::{
    cli::types::{FantasyMetric, Position},
    core::CacheKey,
    error::DraftGuideError,
    pipeline::{overall_player_ranks, DerivedMetrics},
    storage::SeasonStatRecord,
    PlayerId, Result, Season,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoachOverviewKey {
    pub season: Season,
    pub coach: Option<String>,
}

impl CacheKey for CoachOverviewKey {
    fn label(&self) -> String {
        format!(
            "coach_overview:{}:{}",
            self.season,
            self.coach.as_deref().unwrap_or("all")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerUsageRow {
    pub team: String,
    pub head_coach: String,
    pub offensive_coordinator: String,
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub games_played: u32,
    pub attempts: f64,
    pub completions: f64,
    pub completion_pct: Option<f64>,
    pub passing_yards: f64,
    pub passing_tds: f64,
    pub interceptions: f64,
    pub carries: f64,
    pub rushing_yards: f64,
    pub yards_per_carry: f64,
    /// Carries over team plays, percent.
    pub usage_pct: Option<f64>,
    pub rushing_tds: f64,
    pub targets: f64,
    pub receptions: f64,
    pub catch_pct: Option<f64>,
    pub target_share_pct: Option<f64>,
    pub receiving_yards: f64,
    pub receiving_tds: f64,
    pub fantasy_points: f64,
    pub fantasy_points_ppr: f64,
    pub fantasy_points_ppr_pg: Option<f64>,
    /// Cross-position PPR rank with every team stint combined.
    pub overall_ppr_rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachOverview {
    pub season: Season,
    pub coach: Option<String>,
    pub teams: Vec<String>,
    pub passing: Vec<PlayerUsageRow>,
    pub rushing: Vec<PlayerUsageRow>,
    pub receiving: Vec<PlayerUsageRow>,
}

/// Usage tables for a season.
///
/// # Errors
///
/// [`DraftGuideError::CoachNotFound`] when `coach` is given but appears nowhere
/// in the coaching table. A known coach without a team that season yields
/// `NoData`.
pub fn coach_overview(
    ctx: &DashboardContext,
    season: Season,
    coach: Option<&str>,
) -> Result<DataOutcome<CoachOverview>> {
    let key = CoachOverviewKey {
        season,
        coach: coach.map(str::to_string),
    };
    ctx.caches
        .coach_overview
        .try_get_or_compute(key, || build_coach_overview(ctx, season, coach))
}

pub fn build_coach_overview(
    ctx: &DashboardContext,
    season: Season,
    coach: Option<&str>,
) -> Result<DataOutcome<CoachOverview>> {
    let team_filter: Option<BTreeSet<String>> = match coach {
        Some(name) => {
            let history = ctx.coaches.coach_history(name);
            if history.is_empty() {
                return Err(DraftGuideError::CoachNotFound {
                    name: name.to_string(),
                });
            }
            Some(
                history
                    .into_iter()
                    .filter(|t| t.season == season)
                    .map(|t| t.team)
                    .collect(),
            )
        }
        None => None,
    };

    let season_rows: Vec<SeasonStatRecord> =
        ctx.records_for_season(season).into_iter().cloned().collect();
    let overall = overall_player_ranks(&season_rows, FantasyMetric::Ppr);

    let rows: Vec<PlayerUsageRow> = season_rows
        .iter()
        .filter(|r| {
            team_filter
                .as_ref()
                .map_or(true, |teams| teams.contains(&r.recent_team))
        })
        .map(|r| {
            let m = DerivedMetrics::for_record(r);
            let staff = ctx.coaches.staff(&r.recent_team, season);
            let s = &r.stats;
            PlayerUsageRow {
                team: r.recent_team.clone(),
                head_coach: staff.head_coach.display(),
                offensive_coordinator: staff.offensive_coordinator.display(),
                player_id: r.player_id.clone(),
                name: r.player_display_name.clone(),
                position: r.position,
                games_played: r.games_played,
                attempts: s.attempts,
                completions: s.completions,
                completion_pct: m.completion_pct,
                passing_yards: s.passing_yards,
                passing_tds: s.passing_tds,
                interceptions: s.interceptions,
                carries: s.carries,
                rushing_yards: s.rushing_yards,
                yards_per_carry: m.yards_per_carry,
                usage_pct: m.usage.map(|u| u * 100.0),
                rushing_tds: s.rushing_tds,
                targets: s.targets,
                receptions: s.receptions,
                catch_pct: m.catch_pct,
                target_share_pct: m.target_share.map(|t| t * 100.0),
                receiving_yards: s.receiving_yards,
                receiving_tds: s.receiving_tds,
                fantasy_points: s.fantasy_points,
                fantasy_points_ppr: s.fantasy_points_ppr,
                fantasy_points_ppr_pg: m.fantasy_points_ppr_pg,
                overall_ppr_rank: overall
                    .get(&(season, r.player_id.clone()))
                    .map(|o| o.rank),
            }
        })
        .collect();

    if rows.is_empty() {
        let reason = match coach {
            Some(name) => format!("No player statistics for {}'s teams in {}", name, season),
            None => format!("No player statistics for {}", season),
        };
        return Ok(DataOutcome::no_data(reason));
    }

    let teams: Vec<String> = rows
        .iter()
        .map(|r| r.team.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    Ok(DataOutcome::Available(CoachOverview {
        season,
        coach: coach.map(str::to_string),
        teams,
        passing: section(&rows, |r| r.attempts > 0.0, |r| r.passing_yards),
        rushing: section(&rows, |r| r.carries > 0.0, |r| r.rushing_yards),
        receiving: section(&rows, |r| r.targets > 0.0, |r| r.receiving_yards),
    }))
}

/// Rows passing `keep`, grouped by team and sorted by `yards` within a team.
fn section<F, Y>(rows: &[PlayerUsageRow], keep: F, yards: Y) -> Vec<PlayerUsageRow>
where
    F: Fn(&PlayerUsageRow) -> bool,
    Y: Fn(&PlayerUsageRow) -> f64,
{
    let mut section: Vec<PlayerUsageRow> = rows.iter().filter(|r| keep(*r)).cloned().collect();
    section.sort_by(|a, b| a.team.cmp(&b.team).then(yards(b).total_cmp(&yards(a))));
    section
}

/// Handle the coach overview command
pub fn handle_coach_overview(
    ctx: &DashboardContext,
    season: Season,
    coach: Option<&str>,
    as_json: bool,
) -> Result<()> {
    let outcome = coach_overview(ctx, season, coach)?;
    if as_json {
        return print_json(&outcome);
    }

    let overview = match outcome {
        DataOutcome::Available(overview) => overview,
        DataOutcome::NoData { reason } => {
            println!("{}", reason);
            return Ok(());
        }
    };

    println!("{} Passing", overview.season);
    for r in &overview.passing {
        println!(
            "{:<5} {:<26} {:>5.0} att {:>6} cmp% {:>6.0} yds {:>3.0} td {:>3.0} int",
            r.team,
            r.name,
            r.attempts,
            fmt_opt(r.completion_pct, 1),
            r.passing_yards,
            r.passing_tds,
            r.interceptions
        );
    }

    println!();
    println!("{} Rushing", overview.season);
    for r in &overview.rushing {
        println!(
            "{:<5} {:<26} {:<3} {:>5.0} car {:>6.0} yds {:>4.1} ypc {:>6} usage% {:>3.0} td",
            r.team,
            r.name,
            r.position,
            r.carries,
            r.rushing_yards,
            r.yards_per_carry,
            fmt_opt(r.usage_pct, 1),
            r.rushing_tds
        );
    }

    println!();
    println!("{} Receiving", overview.season);
    for r in &overview.receiving {
        println!(
            "{:<5} {:<26} {:<3} {:>4.0} tgt {:>4.0} rec {:>6} tgt% {:>6.0} yds {:>6.1} ppr  #{}",
            r.team,
            r.name,
            r.position,
            r.targets,
            r.receptions,
            fmt_opt(r.target_share_pct, 1),
            r.receiving_yards,
            r.fantasy_points_ppr,
            fmt_rank(r.overall_ppr_rank)
        );
    }
    Ok(())
}
