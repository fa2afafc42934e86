//! Season aggregation: weekly rows to season totals and team totals.

use super::metrics::{pass_run_split, per_game, target_share, usage};
use crate::cli::types::{PlayerId, Position, Season, SeasonType, TeamId, Week};
use crate::core::TeamRegistry;
use crate::storage::{CountingStats, SeasonStatRecord, WeeklyStatRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;


/// Which weekly rows count toward a season total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationFilter {
    pub positions: Vec<Position>,
    pub season_type: SeasonType,
}

impl Default for AggregationFilter {
    fn default() -> Self {
        Self {
            positions: Position::FANTASY.to_vec(),
            season_type: SeasonType::Regular,
        }
    }
}

impl AggregationFilter {
    fn position_of(&self, row: &WeeklyStatRecord) -> Option<Position> {
        let position = row.position.parse::<Position>().ok()?;
        self.positions.contains(&position).then_some(position)
    }
}

type PlayerKey = (Season, PlayerId, String, Position);

#[derive(Default)]
struct Accumulator {
    stats: CountingStats,
    weeks: BTreeSet<Week>,
    /// Display name from the latest contributing week.
    name: Option<(Week, String)>,
}

impl Accumulator {
    fn add(&mut self, row: &WeeklyStatRecord) {
        self.stats += &row.stats;
        self.weeks.insert(row.week);
        if self.name.as_ref().map_or(true, |(week, _)| row.week >= *week) {
            self.name = Some((row.week, row.player_display_name.clone()));
        }
    }
}

/// Reduce weekly rows to one season record per (season, player, team,
/// position).
///
/// Team codes are canonicalized before grouping. A player traded mid-season
/// gets one record per team. Display names do not split a player's season;
/// the latest week's name is kept. Games played is the number of distinct weeks
/// that contributed rows. Team play totals are summed over the
/// filtered rows of each team-season and merged back onto every player.
pub fn aggregate_season_stats(
    weekly: &[WeeklyStatRecord],
    registry: &TeamRegistry,
    filter: &AggregationFilter,
) -> Vec<SeasonStatRecord> {
    let mut groups: BTreeMap<PlayerKey, Accumulator> = BTreeMap::new();
    let mut skipped = 0usize;

    for row in weekly {
        if row.season_type != filter.season_type {
            skipped += 1;
            continue;
        }
        let Some(position) = filter.position_of(row) else {
            skipped += 1;
            continue;
        };
        let key = (
            row.season,
            row.player_id.clone(),
            registry.canonical_abbr(&row.recent_team),
            position,
        );
        groups.entry(key).or_default().add(row);
    }

    // (season, team) -> (pass attempts, carries)
    let mut team_plays: HashMap<(Season, String), (f64, f64)> = HashMap::new();
    for ((season, _, team, _), acc) in &groups {
        let entry = team_plays.entry((*season, team.clone())).or_default();
        entry.0 += acc.stats.attempts;
        entry.1 += acc.stats.carries;
    }

    let records: Vec<SeasonStatRecord> = groups
        .into_iter()
        .map(|((season, player_id, team, position), acc)| {
            let (team_attempts, team_carries) = team_plays
                .get(&(season, team.clone()))
                .copied()
                .unwrap_or_default();
            let team_total_plays = team_attempts + team_carries;
            let games_played = acc.weeks.len() as u32;
            let stats = acc.stats;
            SeasonStatRecord {
                season,
                player_id,
                player_display_name: acc.name.map(|(_, name)| name).unwrap_or_default(),
                team_id: registry.team_id(&team),
                recent_team: team,
                position,
                games_played,
                team_total_plays,
                team_pass_attempts: team_attempts,
                usage: usage(stats.carries, team_total_plays),
                target_share: target_share(stats.targets, team_attempts),
                fantasy_points_pg: per_game(stats.fantasy_points, games_played),
                fantasy_points_ppr_pg: per_game(stats.fantasy_points_ppr, games_played),
                stats,
            }
        })
        .collect();

    debug!(
        "aggregated {} weekly rows into {} season records ({} filtered out)",
        weekly.len(),
        records.len(),
        skipped
    );
    records
}

/// Offensive totals for one team-season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSeasonTotals {
    pub season: Season,
    pub team: String,
    pub team_id: Option<TeamId>,
    pub stats: CountingStats,
    /// Pass attempts + carries.
    pub total_plays: f64,
    pub pass_pct: Option<f64>,
    pub run_pct: Option<f64>,
}

impl TeamSeasonTotals {
    /// Passing + rushing yards. Receiving yards already appear as passing.
    pub fn total_yards(&self) -> f64 {
        self.stats.passing_yards + self.stats.rushing_yards
    }

    /// Passing + rushing touchdowns.
    pub fn total_tds(&self) -> f64 {
        self.stats.passing_tds + self.stats.rushing_tds
    }
}

/// Sum season records by (season, team), sorted by season then team.
pub fn build_team_totals(records: &[SeasonStatRecord]) -> Vec<TeamSeasonTotals> {
    let mut groups: BTreeMap<(Season, String), (Option<TeamId>, CountingStats)> = BTreeMap::new();
    for record in records {
        let entry = groups
            .entry((record.season, record.recent_team.clone()))
            .or_insert((record.team_id, CountingStats::default()));
        entry.0 = entry.0.or(record.team_id);
        entry.1 += &record.stats;
    }

    groups
        .into_iter()
        .map(|((season, team), (team_id, stats))| {
            let split = pass_run_split(stats.attempts, stats.carries);
            TeamSeasonTotals {
                season,
                team,
                team_id,
                total_plays: stats.attempts + stats.carries,
                pass_pct: split.map(|(pass, _)| pass),
                run_pct: split.map(|(_, run)| run),
                stats,
            }
        })
        .collect()
}
