//! League summary: team offense ranks, positional fantasy totals and leaders.

use std::collections::BTreeMap;

use serde::Serialize;

use super::common::{fmt_opt, fmt_rank, print_json, DashboardContext, DataOutcome};
use crate::{
    cli::types::{FantasyMetric, Position, TeamMetric},
    core::CacheKey,
    pipeline::{
        competition_ranks, fantasy_value, leaderboard_value, rank_team_totals, top_n_with_ties,
    },
    PlayerId, Result, Season,
};

/// Players listed per position on the leaderboard, before ties.
pub const LEADERS_PER_POSITION: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeagueSummaryKey {
    pub season: Season,
    pub metric: FantasyMetric,
}

impl CacheKey for LeagueSummaryKey {
    fn label(&self) -> String {
        format!("league_summary:{}:{:?}", self.season, self.metric)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOffenseRow {
    pub team: String,
    pub head_coach: String,
    pub offensive_coordinator: String,
    pub passing_yards: f64,
    pub rushing_yards: f64,
    pub total_yards: f64,
    pub total_tds: f64,
    pub pass_rank: Option<u32>,
    pub rush_rank: Option<u32>,
    pub total_rank: Option<u32>,
}

/// A team's combined fantasy points at one position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPositionRow {
    pub team: String,
    pub position: Position,
    pub points: f64,
    /// Rank among all teams at this position.
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderRow {
    pub rank: Option<u32>,
    pub player_id: PlayerId,
    pub name: String,
    pub team: String,
    pub games_played: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionLeaders {
    pub position: Position,
    pub leaders: DataOutcome<Vec<LeaderRow>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueSummary {
    pub season: Season,
    pub metric: FantasyMetric,
    pub teams: Vec<TeamOffenseRow>,
    pub positional_totals: Vec<TeamPositionRow>,
    pub leaders: Vec<PositionLeaders>,
}

/// League summary for a season, memoized by (season, metric).
pub fn league_summary(
    ctx: &DashboardContext,
    season: Season,
    metric: FantasyMetric,
) -> DataOutcome<LeagueSummary> {
    ctx.caches
        .league_summary
        .get_or_compute(LeagueSummaryKey { season, metric }, || {
            build_league_summary(ctx, season, metric)
        })
}

pub fn build_league_summary(
    ctx: &DashboardContext,
    season: Season,
    metric: FantasyMetric,
) -> DataOutcome<LeagueSummary> {
    let totals = ctx.team_totals_for_season(season);
    if totals.is_empty() {
        return DataOutcome::no_data(format!("No team statistics for {}", season));
    }

    let pass = rank_team_totals(&totals, TeamMetric::PassingYards);
    let rush = rank_team_totals(&totals, TeamMetric::RushingYards);
    let total = rank_team_totals(&totals, TeamMetric::TotalYards);

    let mut teams: Vec<TeamOffenseRow> = totals
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let staff = ctx.coaches.staff(&t.team, season);
            TeamOffenseRow {
                team: t.team.clone(),
                head_coach: staff.head_coach.display(),
                offensive_coordinator: staff.offensive_coordinator.display(),
                passing_yards: t.stats.passing_yards,
                rushing_yards: t.stats.rushing_yards,
                total_yards: t.total_yards(),
                total_tds: t.total_tds(),
                pass_rank: pass[i].rank,
                rush_rank: rush[i].rank,
                total_rank: total[i].rank,
            }
        })
        .collect();
    teams.sort_by(|a, b| a.total_rank.cmp(&b.total_rank).then(a.team.cmp(&b.team)));

    let records = ctx.records_for_season(season);
    let points_metric = metric.season_total();

    let mut team_positions: BTreeMap<(Position, String), f64> = BTreeMap::new();
    for r in &records {
        *team_positions
            .entry((r.position, r.recent_team.clone()))
            .or_default() += fantasy_value(r, points_metric).unwrap_or(0.0);
    }
    let rows: Vec<((Position, String), f64)> = team_positions.into_iter().collect();
    let ranks = competition_ranks(&rows, |row| row.0 .0, |row| Some(row.1));
    let positional_totals = rows
        .into_iter()
        .zip(ranks)
        .map(|(((position, team), points), rank)| TeamPositionRow {
            team,
            position,
            points,
            rank,
        })
        .collect();

    let leaders = Position::FANTASY
        .iter()
        .map(|&position| {
            let pool: Vec<_> = records
                .iter()
                .copied()
                .filter(|r| r.position == position)
                .collect();
            let top = top_n_with_ties(&pool, LEADERS_PER_POSITION, |r| leaderboard_value(r, metric));
            let ranks = competition_ranks(&top, |_| (), |r| leaderboard_value(r, metric));
            let rows: Vec<LeaderRow> = top
                .iter()
                .zip(ranks)
                .map(|(r, rank)| LeaderRow {
                    rank,
                    player_id: r.player_id.clone(),
                    name: r.player_display_name.clone(),
                    team: r.recent_team.clone(),
                    games_played: r.games_played,
                    value: leaderboard_value(r, metric).unwrap_or(0.0),
                })
                .collect();
            PositionLeaders {
                position,
                leaders: if rows.is_empty() {
                    DataOutcome::no_data(format!(
                        "No qualifying {} for {} in {}",
                        position.long_name(),
                        metric,
                        season
                    ))
                } else {
                    DataOutcome::Available(rows)
                },
            }
        })
        .collect();

    DataOutcome::Available(LeagueSummary {
        season,
        metric,
        teams,
        positional_totals,
        leaders,
    })
}

/// Handle the league summary command
pub fn handle_league_summary(
    ctx: &DashboardContext,
    season: Season,
    metric: FantasyMetric,
    as_json: bool,
) -> Result<()> {
    let outcome = league_summary(ctx, season, metric);
    if as_json {
        return print_json(&outcome);
    }

    let summary = match outcome {
        DataOutcome::Available(summary) => summary,
        DataOutcome::NoData { reason } => {
            println!("{}", reason);
            return Ok(());
        }
    };

    println!("{} League Summary", summary.season);
    println!();
    println!(
        "{:<5} {:<24} {:<24} {:>9} {:>9} {:>9} {:>5} {:>5} {:>5}",
        "Team", "HC", "OC", "Pass Yds", "Rush Yds", "Tot Yds", "Pass", "Rush", "Total"
    );
    for t in &summary.teams {
        println!(
            "{:<5} {:<24} {:<24} {:>9.0} {:>9.0} {:>9.0} {:>5} {:>5} {:>5}",
            t.team,
            t.head_coach,
            t.offensive_coordinator,
            t.passing_yards,
            t.rushing_yards,
            t.total_yards,
            fmt_rank(t.pass_rank),
            fmt_rank(t.rush_rank),
            fmt_rank(t.total_rank)
        );
    }

    for group in &summary.leaders {
        println!();
        println!("Top {} by {}", group.position, summary.metric);
        match &group.leaders {
            DataOutcome::Available(rows) => {
                for row in rows {
                    println!(
                        "{:>3}. {:<28} {:<5} {:>8}",
                        fmt_rank(row.rank),
                        row.name,
                        row.team,
                        fmt_opt(Some(row.value), 1)
                    );
                }
            }
            DataOutcome::NoData { reason } => println!("  {}", reason),
        }
    }
    Ok(())
}
