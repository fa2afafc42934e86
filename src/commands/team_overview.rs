//! Team overview: per-team offense for one season with coaching staff.

use serde::Serialize;

use super::common::{fmt_opt, print_json, DashboardContext, DataOutcome};
use crate::{
    core::CacheKey,
    pipeline::{
        metrics::{completion_pct, yards_per_carry},
        CoachingStaff,
    },
    Result, Season, TeamId,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamOverviewKey {
    pub season: Season,
}

impl CacheKey for TeamOverviewKey {
    fn label(&self) -> String {
        format!("team_overview:{}", self.season)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOverviewRow {
    pub team: String,
    pub team_id: Option<TeamId>,
    /// Head coach display value, `*` marks a mid-season replacement.
    pub head_coach: String,
    pub offensive_coordinator: String,
    pub interim_head_coach: String,
    pub interim_offensive_coordinator: String,
    pub staff: CoachingStaff,
    pub total_yards: f64,
    pub total_tds: f64,
    pub total_plays: f64,
    pub pass_pct: Option<f64>,
    pub run_pct: Option<f64>,
    pub pass_attempts: f64,
    pub completions: f64,
    pub passing_yards: f64,
    pub passing_tds: f64,
    pub completion_pct: Option<f64>,
    pub carries: f64,
    pub rushing_yards: f64,
    pub rushing_tds: f64,
    pub yards_per_carry: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOverview {
    pub season: Season,
    /// Sorted by total yards, best first.
    pub teams: Vec<TeamOverviewRow>,
}

pub fn team_overview(ctx: &DashboardContext, season: Season) -> DataOutcome<TeamOverview> {
    ctx.caches
        .team_overview
        .get_or_compute(TeamOverviewKey { season }, || build_team_overview(ctx, season))
}

pub fn build_team_overview(ctx: &DashboardContext, season: Season) -> DataOutcome<TeamOverview> {
    let totals = ctx.team_totals_for_season(season);
    if totals.is_empty() {
        return DataOutcome::no_data(format!("No team statistics for {}", season));
    }

    let mut teams: Vec<TeamOverviewRow> = totals
        .into_iter()
        .map(|t| {
            let staff = ctx.coaches.staff(&t.team, season);
            let s = &t.stats;
            TeamOverviewRow {
                team: t.team.clone(),
                team_id: t.team_id,
                head_coach: staff.head_coach.display(),
                offensive_coordinator: staff.offensive_coordinator.display(),
                interim_head_coach: staff.interim_head_coach.display(),
                interim_offensive_coordinator: staff.interim_offensive_coordinator.display(),
                total_yards: t.total_yards(),
                total_tds: t.total_tds(),
                total_plays: t.total_plays,
                pass_pct: t.pass_pct,
                run_pct: t.run_pct,
                pass_attempts: s.attempts,
                completions: s.completions,
                passing_yards: s.passing_yards,
                passing_tds: s.passing_tds,
                completion_pct: completion_pct(s.completions, s.attempts),
                carries: s.carries,
                rushing_yards: s.rushing_yards,
                rushing_tds: s.rushing_tds,
                yards_per_carry: yards_per_carry(s.rushing_yards, s.carries),
                staff,
            }
        })
        .collect();
    teams.sort_by(|a, b| {
        b.total_yards
            .total_cmp(&a.total_yards)
            .then(a.team.cmp(&b.team))
    });

    DataOutcome::Available(TeamOverview { season, teams })
}

/// Handle the team overview command
pub fn handle_team_overview(ctx: &DashboardContext, season: Season, as_json: bool) -> Result<()> {
    let outcome = team_overview(ctx, season);
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

    println!("{} Team Overview", overview.season);
    println!();
    println!(
        "{:<5} {:<24} {:<24} {:>8} {:>5} {:>6} {:>7} {:>7} {:>6} {:>5}",
        "Team", "HC", "OC", "Yards", "TDs", "Plays", "Pass %", "Run %", "Comp %", "YPC"
    );
    for t in &overview.teams {
        println!(
            "{:<5} {:<24} {:<24} {:>8.0} {:>5.0} {:>6.0} {:>7} {:>7} {:>6} {:>5.1}",
            t.team,
            t.head_coach,
            t.offensive_coordinator,
            t.total_yards,
            t.total_tds,
            t.total_plays,
            fmt_opt(t.pass_pct, 2),
            fmt_opt(t.run_pct, 2),
            fmt_opt(t.completion_pct, 1),
            t.yards_per_carry
        );
    }
    println!();
    println!("* head coach or coordinator replaced mid-season");
    Ok(())
}
