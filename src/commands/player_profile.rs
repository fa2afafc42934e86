//! Player profile: roster and contract card, season history, usage trend and
//! weekly scoring.

use std::collections::HashMap;

use serde::Serialize;

use super::common::{fmt_opt, print_json, DashboardContext, DataOutcome};
use crate::{
    cli::types::{Position, SeasonType, Week},
    core::CacheKey,
    error::DraftGuideError,
    pipeline::{
        metrics::{per_game, share_pct},
        DerivedMetrics, NOT_AVAILABLE,
    },
    storage::{ContractRecord, SeasonStatRecord},
    PlayerId, Result, Season,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerProfileKey {
    pub player_id: PlayerId,
    pub weekly_season: Option<Season>,
}

impl CacheKey for PlayerProfileKey {
    fn label(&self) -> String {
        match self.weekly_season {
            Some(season) => format!("player_profile:{}:{}", self.player_id, season),
            None => format!("player_profile:{}:latest", self.player_id),
        }
    }
}

/// Contract and draft details as display strings; missing values are `N/A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractCard {
    pub year_signed: String,
    pub years: String,
    pub value: String,
    pub guaranteed: String,
    pub draft_year: String,
    pub draft_team: String,
    pub draft_round: String,
    pub draft_overall: String,
}

impl ContractCard {
    pub fn from_record(record: Option<&ContractRecord>) -> Self {
        fn text<T: ToString>(value: Option<T>) -> String {
            value
                .map(|v| v.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }
        fn millions(value: Option<f64>) -> String {
            value
                .map(|v| fmt_dollars(v * 1_000_000.0))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }
        Self {
            year_signed: text(record.and_then(|c| c.year_signed)),
            years: text(record.and_then(|c| c.years)),
            value: millions(record.and_then(|c| c.value)),
            guaranteed: millions(record.and_then(|c| c.guaranteed)),
            draft_year: text(record.and_then(|c| c.draft_year)),
            draft_team: text(record.and_then(|c| c.draft_team.clone())),
            draft_round: text(record.and_then(|c| c.draft_round)),
            draft_overall: text(record.and_then(|c| c.draft_overall)),
        }
    }
}

/// Whole dollars with thousands separators, e.g. `$141,480,000`.
fn fmt_dollars(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if whole < 0 { "-" } else { "" };
    format!("{}${}", sign, grouped)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSeasonRow {
    pub season: Season,
    pub team: String,
    pub games_played: u32,
    pub passing_yards: f64,
    pub rushing_yards: f64,
    pub receiving_yards: f64,
    pub total_yards: f64,
    pub total_tds: f64,
    pub fantasy_points: f64,
    pub fantasy_points_ppr: f64,
    pub fantasy_points_ppr_pg: Option<f64>,
    /// `HC: X (Interim: Y), OC: Z`
    pub coach_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsagePoint {
    pub season: Season,
    pub team: String,
    pub value: Option<f64>,
}

/// Position-specific usage trend across seasons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSeries {
    pub label: String,
    pub points: Vec<UsagePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPoint {
    pub week: Week,
    pub season_type: SeasonType,
    pub team: String,
    pub fantasy_points: f64,
    pub fantasy_points_ppr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    pub team: String,
    pub contract: ContractCard,
    pub seasons: Vec<PlayerSeasonRow>,
    pub usage: DataOutcome<UsageSeries>,
    pub weekly_season: Option<Season>,
    pub weekly: DataOutcome<Vec<WeeklyPoint>>,
}

/// Everything known about one player.
///
/// `weekly_season` picks the season of the weekly scoring series; without it
/// the latest season with weekly rows is used.
///
/// # Errors
///
/// [`DraftGuideError::PlayerNotFound`] when the id is absent from the roster,
/// the season records and the weekly rows alike.
pub fn player_profile(
    ctx: &DashboardContext,
    player_id: &PlayerId,
    weekly_season: Option<Season>,
) -> Result<DataOutcome<PlayerProfile>> {
    let key = PlayerProfileKey {
        player_id: player_id.clone(),
        weekly_season,
    };
    ctx.caches.player_profile.try_get_or_compute(key, || {
        build_player_profile(ctx, player_id, weekly_season).map(DataOutcome::Available)
    })
}

fn build_player_profile(
    ctx: &DashboardContext,
    player_id: &PlayerId,
    weekly_season: Option<Season>,
) -> Result<PlayerProfile> {
    let roster = ctx.data.roster_entry(player_id);
    let records: Vec<&SeasonStatRecord> = ctx
        .season_records
        .iter()
        .filter(|r| &r.player_id == player_id)
        .collect();
    let weekly_rows: Vec<_> = ctx
        .data
        .weekly()
        .iter()
        .filter(|w| &w.player_id == player_id)
        .collect();

    if roster.is_none() && records.is_empty() && weekly_rows.is_empty() {
        return Err(DraftGuideError::PlayerNotFound {
            id: player_id.to_string(),
        });
    }

    let latest = records.iter().max_by_key(|r| r.season);
    let name = roster
        .map(|r| r.player_name.clone())
        .or_else(|| latest.map(|r| r.player_display_name.clone()))
        .or_else(|| weekly_rows.first().map(|w| w.player_display_name.clone()))
        .unwrap_or_else(|| player_id.to_string());
    let position = roster
        .map(|r| r.position.clone())
        .or_else(|| latest.map(|r| r.position.to_string()))
        .or_else(|| weekly_rows.first().map(|w| w.position.clone()))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let team = roster
        .map(|r| r.team.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut sorted = records.clone();
    sorted.sort_by(|a, b| a.season.cmp(&b.season).then(a.recent_team.cmp(&b.recent_team)));

    let seasons = sorted
        .iter()
        .map(|r| {
            let m = DerivedMetrics::for_record(r);
            PlayerSeasonRow {
                season: r.season,
                team: r.recent_team.clone(),
                games_played: r.games_played,
                passing_yards: r.stats.passing_yards,
                rushing_yards: r.stats.rushing_yards,
                receiving_yards: r.stats.receiving_yards,
                total_yards: m.total_yards,
                total_tds: m.total_tds,
                fantasy_points: r.stats.fantasy_points,
                fantasy_points_ppr: r.stats.fantasy_points_ppr,
                fantasy_points_ppr_pg: m.fantasy_points_ppr_pg,
                coach_label: ctx.coaches.coach_label(&r.recent_team, r.season),
            }
        })
        .collect();

    let usage = match position.parse::<Position>() {
        Ok(pos) if !sorted.is_empty() => DataOutcome::Available(usage_series(ctx, pos, &sorted)),
        _ => DataOutcome::no_data(format!("No usage trend for {}", name)),
    };

    let weekly_season =
        weekly_season.or_else(|| weekly_rows.iter().map(|w| w.season).max());
    let mut weekly: Vec<WeeklyPoint> = weekly_rows
        .iter()
        .filter(|w| Some(w.season) == weekly_season)
        .map(|w| WeeklyPoint {
            week: w.week,
            season_type: w.season_type,
            team: w.recent_team.clone(),
            fantasy_points: w.stats.fantasy_points,
            fantasy_points_ppr: w.stats.fantasy_points_ppr,
        })
        .collect();
    weekly.sort_by_key(|w| w.week);
    let weekly = if weekly.is_empty() {
        DataOutcome::no_data(match weekly_season {
            Some(season) => format!("No weekly data for {} in {}", name, season),
            None => format!("No weekly data for {}", name),
        })
    } else {
        DataOutcome::Available(weekly)
    };

    Ok(PlayerProfile {
        player_id: player_id.clone(),
        name,
        position,
        team,
        contract: ContractCard::from_record(ctx.data.contract(player_id)),
        seasons,
        usage,
        weekly_season,
        weekly,
    })
}

/// QBs: attempts per game. RBs: share of team total yards. Receivers and
/// tight ends: target share.
fn usage_series(
    ctx: &DashboardContext,
    position: Position,
    records: &[&SeasonStatRecord],
) -> UsageSeries {
    let label = match position {
        Position::QB => "Passing Attempts per Game",
        Position::RB => "Usage (% of Team Total Offense)",
        Position::WR | Position::TE => "Target Share (%)",
    };

    // Team yards over every position, passing + rushing + receiving
    let team_yards: HashMap<(Season, &str), f64> = if position == Position::RB {
        let mut totals = HashMap::new();
        for r in &ctx.season_records {
            *totals
                .entry((r.season, r.recent_team.as_str()))
                .or_insert(0.0) += r.stats.total_yards();
        }
        totals
    } else {
        HashMap::new()
    };

    let points = records
        .iter()
        .map(|r| {
            let value = match position {
                Position::QB => per_game(r.stats.attempts, r.games_played),
                Position::RB => share_pct(
                    r.stats.total_yards(),
                    team_yards
                        .get(&(r.season, r.recent_team.as_str()))
                        .copied()
                        .unwrap_or(0.0),
                ),
                Position::WR | Position::TE => r.target_share.map(|t| t * 100.0),
            };
            UsagePoint {
                season: r.season,
                team: r.recent_team.clone(),
                value,
            }
        })
        .collect();

    UsageSeries {
        label: label.to_string(),
        points,
    }
}

/// Handle the player profile command
pub fn handle_player_profile(
    ctx: &DashboardContext,
    player_id: &PlayerId,
    weekly_season: Option<Season>,
    as_json: bool,
) -> Result<()> {
    let outcome = player_profile(ctx, player_id, weekly_season)?;
    if as_json {
        return print_json(&outcome);
    }
    let Some(profile) = outcome.available() else {
        return Ok(());
    };

    println!("{} ({}) - {} {}", profile.name, profile.player_id, profile.team, profile.position);
    let c = &profile.contract;
    println!(
        "Contract: signed {} for {} years, {} ({} guaranteed)",
        c.year_signed, c.years, c.value, c.guaranteed
    );
    println!(
        "Draft: {} {} round {} pick {}",
        c.draft_year, c.draft_team, c.draft_round, c.draft_overall
    );

    println!();
    for s in &profile.seasons {
        println!(
            "{} {:<5} {:>2} gp {:>6.0} yds {:>3.0} td {:>6.1} ppr {:>5} ppg  {}",
            s.season,
            s.team,
            s.games_played,
            s.total_yards,
            s.total_tds,
            s.fantasy_points_ppr,
            fmt_opt(s.fantasy_points_ppr_pg, 1),
            s.coach_label
        );
    }

    match &profile.usage {
        DataOutcome::Available(series) => {
            println!();
            println!("{}", series.label);
            for p in &series.points {
                println!("{} {:<5} {}", p.season, p.team, fmt_opt(p.value, 1));
            }
        }
        DataOutcome::NoData { reason } => println!("{}", reason),
    }

    println!();
    match &profile.weekly {
        DataOutcome::Available(weeks) => {
            if let Some(season) = profile.weekly_season {
                println!("{} weekly scoring", season);
            }
            for w in weeks {
                println!(
                    "Week {:>2} {:<4} {:<5} {:>5.1} std {:>5.1} ppr",
                    w.week, w.season_type, w.team, w.fantasy_points, w.fantasy_points_ppr
                );
            }
        }
        DataOutcome::NoData { reason } => println!("{}", reason),
    }
    Ok(())
}
