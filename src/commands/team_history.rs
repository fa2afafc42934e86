//! Franchise history: season-by-season offense, usage by position and the
//! current coaching staff.

use std::collections::BTreeMap;

use serde::Serialize;

use super::common::{fmt_opt, fmt_rank, print_json, DashboardContext, DataOutcome};
use crate::{
    cli::types::{Position, TeamMetric},
    core::CacheKey,
    error::DraftGuideError,
    pipeline::{competition_ranks, metrics::share_pct, rank_team_totals, CoachSlot},
    storage::CoachRole,
    Result, Season, TeamId,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamHistoryKey {
    pub team: String,
}

impl CacheKey for TeamHistoryKey {
    fn label(&self) -> String {
        format!("team_history:{}", self.team)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSeasonRow {
    pub season: Season,
    pub head_coach: String,
    pub offensive_coordinator: String,
    pub interim_head_coach: String,
    pub interim_offensive_coordinator: String,
    pub passing_yards: f64,
    pub rushing_yards: f64,
    pub passing_tds: f64,
    pub rushing_tds: f64,
    pub pass_rank: Option<u32>,
    pub rush_rank: Option<u32>,
    pub total_rank: Option<u32>,
    pub pass_pct: Option<f64>,
    pub run_pct: Option<f64>,
}

/// Share of the team's WR/RB/TE targets going to one position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionShareRow {
    pub season: Season,
    pub position: Position,
    pub targets: f64,
    pub target_share_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionPointsRow {
    pub season: Season,
    pub position: Position,
    pub fantasy_points_ppr: f64,
    /// Rank among all teams at this position in the season.
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiredCoach {
    pub name: String,
    pub hired: Option<Season>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentStaff {
    pub season: Season,
    pub head_coach: Vec<HiredCoach>,
    pub offensive_coordinator: Vec<HiredCoach>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamHistory {
    pub team: String,
    pub team_id: Option<TeamId>,
    pub seasons: Vec<TeamSeasonRow>,
    pub target_share: Vec<PositionShareRow>,
    pub ppr_by_position: Vec<PositionPointsRow>,
    pub current_staff: DataOutcome<CurrentStaff>,
}

/// History of one franchise. Historical codes (`OAK`, `SD`, ...) resolve to
/// the current franchise.
///
/// # Errors
///
/// [`DraftGuideError::TeamNotFound`] for a code that is neither a known
/// franchise nor present in the loaded statistics.
pub fn team_history(ctx: &DashboardContext, team: &str) -> Result<DataOutcome<TeamHistory>> {
    let canonical = ctx.registry.normalize(&team.trim().to_uppercase());
    let key = TeamHistoryKey {
        team: canonical.abbr.clone(),
    };
    ctx.caches
        .team_history
        .try_get_or_compute(key, || build_team_history(ctx, &canonical.abbr, team))
}

fn build_team_history(
    ctx: &DashboardContext,
    team: &str,
    requested: &str,
) -> Result<DataOutcome<TeamHistory>> {
    let has_stats = ctx.team_totals.iter().any(|t| t.team == team);
    let has_coaches = ctx.coaches.latest_season(team).is_some();
    if !ctx.registry.is_known(team) && !has_stats && !has_coaches {
        return Err(DraftGuideError::TeamNotFound {
            team: requested.to_string(),
        });
    }
    if !has_stats {
        return Ok(DataOutcome::no_data(format!("No statistics for {}", team)));
    }

    let pass = rank_team_totals(&ctx.team_totals, TeamMetric::PassingYards);
    let rush = rank_team_totals(&ctx.team_totals, TeamMetric::RushingYards);
    let total = rank_team_totals(&ctx.team_totals, TeamMetric::TotalYards);

    let seasons: Vec<TeamSeasonRow> = ctx
        .team_totals
        .iter()
        .enumerate()
        .filter(|(_, t)| t.team == team)
        .map(|(i, t)| {
            let staff = ctx.coaches.staff(team, t.season);
            TeamSeasonRow {
                season: t.season,
                head_coach: staff.head_coach.display(),
                offensive_coordinator: staff.offensive_coordinator.display(),
                interim_head_coach: staff.interim_head_coach.display(),
                interim_offensive_coordinator: staff.interim_offensive_coordinator.display(),
                passing_yards: t.stats.passing_yards,
                rushing_yards: t.stats.rushing_yards,
                passing_tds: t.stats.passing_tds,
                rushing_tds: t.stats.rushing_tds,
                pass_rank: pass[i].rank,
                rush_rank: rush[i].rank,
                total_rank: total[i].rank,
                pass_pct: t.pass_pct,
                run_pct: t.run_pct,
            }
        })
        .collect();

    // Target share among the team's receiving positions
    let mut targets: BTreeMap<(Season, Position), f64> = BTreeMap::new();
    for r in ctx.season_records.iter().filter(|r| r.recent_team == team) {
        if Position::RECEIVING.contains(&r.position) {
            *targets.entry((r.season, r.position)).or_default() += r.stats.targets;
        }
    }
    let mut season_targets: BTreeMap<Season, f64> = BTreeMap::new();
    for ((season, _), t) in &targets {
        *season_targets.entry(*season).or_default() += t;
    }
    let target_share = targets
        .iter()
        .map(|(&(season, position), &t)| PositionShareRow {
            season,
            position,
            targets: t,
            target_share_pct: share_pct(t, season_targets.get(&season).copied().unwrap_or(0.0)),
        })
        .collect();

    // PPR points by position, ranked against every team
    let mut points: BTreeMap<(Season, Position, String), f64> = BTreeMap::new();
    for r in &ctx.season_records {
        *points
            .entry((r.season, r.position, r.recent_team.clone()))
            .or_default() += r.stats.fantasy_points_ppr;
    }
    let rows: Vec<((Season, Position, String), f64)> = points.into_iter().collect();
    let ranks = competition_ranks(&rows, |row| (row.0 .0, row.0 .1), |row| Some(row.1));
    let ppr_by_position = rows
        .into_iter()
        .zip(ranks)
        .filter(|(((_, _, t), _), _)| t == team)
        .map(|(((season, position, _), pts), rank)| PositionPointsRow {
            season,
            position,
            fantasy_points_ppr: pts,
            rank,
        })
        .collect();

    let current_staff = match ctx.coaches.latest_season(team) {
        Some(season) => {
            let hired = |slot: CoachSlot, role: CoachRole| -> Vec<HiredCoach> {
                let role = if slot.via_play_caller {
                    CoachRole::HeadCoach
                } else {
                    role
                };
                slot.names
                    .into_iter()
                    .map(|name| HiredCoach {
                        hired: ctx.coaches.hire_year(&name, team, role),
                        name,
                    })
                    .collect()
            };
            DataOutcome::Available(CurrentStaff {
                season,
                head_coach: hired(
                    ctx.coaches.resolve(team, season, CoachRole::HeadCoach),
                    CoachRole::HeadCoach,
                ),
                offensive_coordinator: hired(
                    ctx.coaches
                        .resolve(team, season, CoachRole::OffensiveCoordinator),
                    CoachRole::OffensiveCoordinator,
                ),
            })
        }
        None => DataOutcome::no_data(format!("No coaching staff on record for {}", team)),
    };

    Ok(DataOutcome::Available(TeamHistory {
        team: team.to_string(),
        team_id: ctx.registry.team_id(team),
        seasons,
        target_share,
        ppr_by_position,
        current_staff,
    }))
}

fn hired_display(coaches: &[HiredCoach]) -> String {
    if coaches.is_empty() {
        return "Not available".to_string();
    }
    coaches
        .iter()
        .map(|c| match c.hired {
            Some(year) => format!("{} (Hired {})", c.name, year),
            None => c.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Handle the team history command
pub fn handle_team_history(ctx: &DashboardContext, team: &str, as_json: bool) -> Result<()> {
    let outcome = team_history(ctx, team)?;
    if as_json {
        return print_json(&outcome);
    }

    let history = match outcome {
        DataOutcome::Available(history) => history,
        DataOutcome::NoData { reason } => {
            println!("{}", reason);
            return Ok(());
        }
    };

    println!("{} Team History", history.team);
    match &history.current_staff {
        DataOutcome::Available(staff) => {
            println!("{} Head Coach: {}", staff.season, hired_display(&staff.head_coach));
            println!(
                "{} Offensive Coordinator: {}",
                staff.season,
                hired_display(&staff.offensive_coordinator)
            );
        }
        DataOutcome::NoData { reason } => println!("{}", reason),
    }

    println!();
    println!(
        "{:<6} {:<24} {:<24} {:>8} {:>5} {:>8} {:>5} {:>7} {:>7}",
        "Season", "HC", "OC", "Pass Yds", "Rank", "Rush Yds", "Rank", "Pass %", "Run %"
    );
    for s in &history.seasons {
        println!(
            "{:<6} {:<24} {:<24} {:>8.0} {:>5} {:>8.0} {:>5} {:>7} {:>7}",
            s.season,
            s.head_coach,
            s.offensive_coordinator,
            s.passing_yards,
            fmt_rank(s.pass_rank),
            s.rushing_yards,
            fmt_rank(s.rush_rank),
            fmt_opt(s.pass_pct, 2),
            fmt_opt(s.run_pct, 2)
        );
    }

    println!();
    println!("PPR points by position (league rank)");
    for p in &history.ppr_by_position {
        println!(
            "{:<6} {:<3} {:>7.1} #{}",
            p.season,
            p.position,
            p.fantasy_points_ppr,
            fmt_rank(p.rank)
        );
    }
    Ok(())
}
