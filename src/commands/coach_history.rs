//! A coach's offensive track record at one position.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::common::{fmt_opt, fmt_rank, print_json, DashboardContext, DataOutcome};
use crate::{
    cli::types::{FantasyMetric, Position, RankScope},
    core::CacheKey,
    error::DraftGuideError,
    pipeline::{
        league_top_n_average, leaderboard_value, metrics::rb_usage, rank_season_players,
        CoachTenure,
    },
    storage::{CoachRole, SeasonStatRecord},
    PlayerId, Result, Season,
};

/// Receivers below this share of team pass attempts are left out of the
/// target share table.
pub const MIN_TARGET_SHARE: f64 = 0.10;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoachHistoryKey {
    pub coach: String,
    pub position: Position,
    pub metric: FantasyMetric,
}

impl CacheKey for CoachHistoryKey {
    fn label(&self) -> String {
        format!(
            "coach_history:{}:{}:{:?}",
            self.coach, self.position, self.metric
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachPlayerRow {
    pub season: Season,
    pub team: String,
    pub role: CoachRole,
    pub player_id: PlayerId,
    pub name: String,
    pub games_played: u32,
    pub value: Option<f64>,
    /// League-wide rank at the position for the season.
    pub position_rank: Option<u32>,
}

/// The coach's best player at the position against the league's top-N mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonComparison {
    pub season: Season,
    pub team: String,
    pub top_player: String,
    pub top_value: f64,
    pub league_average: Option<f64>,
    pub baseline_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RbUsageRow {
    pub season: Season,
    pub team: String,
    /// 1 for the lead back, 2 for the second back.
    pub depth: u8,
    pub player_id: PlayerId,
    pub name: String,
    pub run_game_pct: Option<f64>,
    pub total_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetShareRow {
    pub season: Season,
    pub team: String,
    pub player_id: PlayerId,
    pub name: String,
    pub target_share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachHistory {
    pub coach: String,
    pub position: Position,
    pub metric: FantasyMetric,
    pub tenures: Vec<CoachTenure>,
    pub players: Vec<CoachPlayerRow>,
    pub top_vs_league: Vec<SeasonComparison>,
    /// Present for running backs only.
    pub rb_usage: Option<DataOutcome<Vec<RbUsageRow>>>,
    /// Present for receivers and tight ends only.
    pub target_share: Option<DataOutcome<Vec<TargetShareRow>>>,
}

/// A coach currently listed as head coach or offensive coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachChoice {
    pub team: String,
    pub coach: String,
    pub role: CoachRole,
}

/// Head coaches and coordinators of the latest coaching season, by team.
pub fn current_coaches(ctx: &DashboardContext) -> DataOutcome<(Season, Vec<CoachChoice>)> {
    let Some(season) = ctx.data.coaching().iter().map(|a| a.season).max() else {
        return DataOutcome::no_data("No coaching staff loaded");
    };
    let mut choices: Vec<CoachChoice> = ctx
        .data
        .coaching()
        .iter()
        .filter(|a| a.season == season)
        .filter(|a| matches!(a.role, CoachRole::HeadCoach | CoachRole::OffensiveCoordinator))
        .map(|a| CoachChoice {
            team: a.team_abbr.clone(),
            coach: a.coach.clone(),
            role: a.role,
        })
        .collect();
    choices.sort_by(|a, b| a.team.cmp(&b.team).then(a.role.cmp(&b.role)));
    choices.dedup();
    DataOutcome::Available((season, choices))
}

/// Seasons a coach spent as head coach or offensive coordinator, joined to
/// the season statistics of that team at `position`.
///
/// # Errors
///
/// [`DraftGuideError::CoachNotFound`] when the coach appears nowhere in the
/// coaching table. A coach with no head coach or coordinator seasons (an
/// interim-only or rookie coach) yields `NoData`.
pub fn coach_history_view(
    ctx: &DashboardContext,
    coach: &str,
    position: Position,
    metric: FantasyMetric,
) -> Result<DataOutcome<CoachHistory>> {
    let key = CoachHistoryKey {
        coach: coach.to_string(),
        position,
        metric,
    };
    ctx.caches
        .coach_history
        .try_get_or_compute(key, || build_coach_history(ctx, coach, position, metric))
}

fn build_coach_history(
    ctx: &DashboardContext,
    coach: &str,
    position: Position,
    metric: FantasyMetric,
) -> Result<DataOutcome<CoachHistory>> {
    let all = ctx.coaches.coach_history(coach);
    if all.is_empty() {
        return Err(DraftGuideError::CoachNotFound {
            name: coach.to_string(),
        });
    }
    let tenures: Vec<CoachTenure> = all
        .into_iter()
        .filter(|t| matches!(t.role, CoachRole::HeadCoach | CoachRole::OffensiveCoordinator))
        .collect();
    if tenures.is_empty() {
        return Ok(DataOutcome::no_data(format!(
            "No head coach or coordinator history for {}",
            coach
        )));
    }

    // (season, team) -> role; head coach wins when a coach held both
    let mut stints: BTreeMap<(Season, String), CoachRole> = BTreeMap::new();
    for t in &tenures {
        stints
            .entry((t.season, t.team.clone()))
            .and_modify(|role| *role = (*role).min(t.role))
            .or_insert(t.role);
    }

    let league: Vec<SeasonStatRecord> = ctx
        .season_records
        .iter()
        .filter(|r| r.position == position)
        .cloned()
        .collect();
    let ranked = rank_season_players(&league, RankScope::SeasonPosition, metric);
    let ranks: HashMap<(Season, PlayerId, String), Option<u32>> = ranked
        .iter()
        .map(|r| {
            (
                (r.entity.season, r.entity.player_id.clone(), r.entity.recent_team.clone()),
                r.rank,
            )
        })
        .collect();

    // Coach's records per stint, best first
    let mut by_stint: BTreeMap<(Season, String), Vec<&SeasonStatRecord>> = BTreeMap::new();
    for r in &league {
        let key = (r.season, r.recent_team.clone());
        if stints.contains_key(&key) {
            by_stint.entry(key).or_default().push(r);
        }
    }
    for records in by_stint.values_mut() {
        records.sort_by(|a, b| {
            let (va, vb) = (leaderboard_value(a, metric), leaderboard_value(b, metric));
            vb.unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&va.unwrap_or(f64::NEG_INFINITY))
        });
    }

    if by_stint.is_empty() {
        return Ok(DataOutcome::no_data(format!(
            "No {} statistics for {}'s teams",
            position.long_name(),
            coach
        )));
    }

    let rank_of = |r: &SeasonStatRecord| {
        ranks
            .get(&(r.season, r.player_id.clone(), r.recent_team.clone()))
            .copied()
            .flatten()
    };

    let mut players = Vec::new();
    let mut top_vs_league = Vec::new();
    let baseline = position.league_baseline_size();
    for ((season, team), records) in &by_stint {
        let role = stints[&(*season, team.clone())];
        for r in records {
            players.push(CoachPlayerRow {
                season: *season,
                team: team.clone(),
                role,
                player_id: r.player_id.clone(),
                name: r.player_display_name.clone(),
                games_played: r.games_played,
                value: leaderboard_value(r, metric),
                position_rank: rank_of(*r),
            });
        }
        if let Some((top, value)) = records
            .first()
            .and_then(|r| leaderboard_value(r, metric).map(|v| (r, v)))
        {
            top_vs_league.push(SeasonComparison {
                season: *season,
                team: team.clone(),
                top_player: top.player_display_name.clone(),
                top_value: value,
                league_average: league_top_n_average(
                    &league,
                    *season,
                    position,
                    baseline as usize,
                    metric,
                ),
                baseline_size: baseline,
            });
        }
    }

    let rb_rows = (position == Position::RB).then(|| {
        let mut rows = Vec::new();
        for ((season, team), records) in &by_stint {
            for (depth, r) in records.iter().take(2).enumerate() {
                // RB2 counts only when ranked inside the league baseline
                if depth == 1 && !rank_of(*r).is_some_and(|rank| rank <= baseline) {
                    continue;
                }
                let usage = rb_usage(r);
                rows.push(RbUsageRow {
                    season: *season,
                    team: team.clone(),
                    depth: depth as u8 + 1,
                    player_id: r.player_id.clone(),
                    name: r.player_display_name.clone(),
                    run_game_pct: usage.run_game.map(|u| u * 100.0),
                    total_pct: usage.total.map(|u| u * 100.0),
                });
            }
        }
        if rows.is_empty() {
            DataOutcome::no_data(format!("No RB usage data for {}", coach))
        } else {
            DataOutcome::Available(rows)
        }
    });

    let target_share = matches!(position, Position::WR | Position::TE).then(|| {
        let rows: Vec<TargetShareRow> = by_stint
            .iter()
            .flat_map(|((season, team), records)| {
                records.iter().filter_map(move |r| {
                    let share = r.target_share.filter(|s| *s >= MIN_TARGET_SHARE)?;
                    Some(TargetShareRow {
                        season: *season,
                        team: team.clone(),
                        player_id: r.player_id.clone(),
                        name: r.player_display_name.clone(),
                        target_share_pct: share * 100.0,
                    })
                })
            })
            .collect();
        if rows.is_empty() {
            DataOutcome::no_data(format!(
                "No {} with at least {:.0}% target share under {}",
                position.long_name(),
                MIN_TARGET_SHARE * 100.0,
                coach
            ))
        } else {
            DataOutcome::Available(rows)
        }
    });

    Ok(DataOutcome::Available(CoachHistory {
        coach: coach.to_string(),
        position,
        metric,
        tenures,
        players,
        top_vs_league,
        rb_usage: rb_rows,
        target_share,
    }))
}

/// Handle the coach history command
pub fn handle_coach_history(
    ctx: &DashboardContext,
    coach: Option<&str>,
    position: Position,
    metric: FantasyMetric,
    as_json: bool,
) -> Result<()> {
    let Some(coach) = coach else {
        // No coach given: list who can be selected
        let outcome = current_coaches(ctx);
        if as_json {
            return print_json(&outcome);
        }
        match outcome {
            DataOutcome::Available((season, choices)) => {
                println!("{} head coaches and offensive coordinators", season);
                for c in choices {
                    println!("{:<5} {:<28} {}", c.team, c.coach, c.role);
                }
            }
            DataOutcome::NoData { reason } => println!("{}", reason),
        }
        return Ok(());
    };

    let outcome = coach_history_view(ctx, coach, position, metric)?;
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

    println!(
        "{}: {} by {}",
        history.coach,
        history.position.long_name(),
        history.metric
    );
    for t in &history.tenures {
        println!("  {} {:<5} {}", t.season, t.team, t.role);
    }

    println!();
    for p in &history.players {
        println!(
            "{} {:<5} {:<3} {:<28} {:>8} #{}",
            p.season,
            p.team,
            p.role.short_label(),
            p.name,
            fmt_opt(p.value, 1),
            fmt_rank(p.position_rank)
        );
    }

    println!();
    println!(
        "Top player vs league top-{} average",
        history.position.league_baseline_size()
    );
    for c in &history.top_vs_league {
        println!(
            "{} {:<5} {:<28} {:>8.1} vs {}",
            c.season,
            c.team,
            c.top_player,
            c.top_value,
            fmt_opt(c.league_average, 1)
        );
    }

    if let Some(DataOutcome::Available(rows)) = &history.rb_usage {
        println!();
        println!("RB usage (run game % / total offense %)");
        for r in rows {
            println!(
                "{} {:<5} RB{} {:<28} {:>6} {:>6}",
                r.season,
                r.team,
                r.depth,
                r.name,
                fmt_opt(r.run_game_pct, 1),
                fmt_opt(r.total_pct, 1)
            );
        }
    }

    if let Some(DataOutcome::Available(rows)) = &history.target_share {
        println!();
        println!("Target share");
        for r in rows {
            println!(
                "{} {:<5} {:<28} {:>5.1}%",
                r.season, r.team, r.name, r.target_share_pct
            );
        }
    }
    Ok(())
}
