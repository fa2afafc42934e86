//! League ranking with competition ("min") tie handling.
//!
//! The highest value in a group ranks 1. Tied values share the lowest rank of
//! their run and the next distinct value skips ahead: `[100, 100, 90]` ranks
//! `[1, 1, 3]`. Groups are ranked independently of each other.

use super::aggregate::TeamSeasonTotals;
use super::metrics::ratio;
use crate::cli::types::{FantasyMetric, PlayerId, Position, RankScope, Season, TeamMetric};
use crate::storage::SeasonStatRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};


/// Rank every item within its group.
///
/// Returns one rank per input item, in input order. Items whose metric is
/// `None` or non-finite are unranked and do not occupy a rank slot.
pub fn competition_ranks<T, K, G, F>(items: &[T], group_of: G, metric_of: F) -> Vec<Option<u32>>
where
    K: Ord,
    G: Fn(&T) -> K,
    F: Fn(&T) -> Option<f64>,
{
    let mut groups: BTreeMap<K, Vec<(usize, f64)>> = BTreeMap::new();
    for (i, item) in items.iter().enumerate() {
        if let Some(value) = metric_of(item).filter(|v| v.is_finite()) {
            groups.entry(group_of(item)).or_default().push((i, value));
        }
    }

    let mut ranks = vec![None; items.len()];
    for members in groups.values_mut() {
        members.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        let mut current_rank = 0u32;
        let mut previous: Option<f64> = None;
        for (position, (index, value)) in members.iter().enumerate() {
            if previous != Some(*value) {
                current_rank = position as u32 + 1;
                previous = Some(*value);
            }
            ranks[*index] = Some(current_rank);
        }
    }
    ranks
}

/// An entity with its rank inside the grouping it was ranked in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity<T> {
    pub entity: T,
    pub rank: Option<u32>,
    pub value: Option<f64>,
}

/// Metric value of a season record.
pub fn fantasy_value(record: &SeasonStatRecord, metric: FantasyMetric) -> Option<f64> {
    match metric {
        FantasyMetric::Standard => Some(record.stats.fantasy_points),
        FantasyMetric::Ppr => Some(record.stats.fantasy_points_ppr),
        FantasyMetric::StandardPerGame => record.fantasy_points_pg,
        FantasyMetric::PprPerGame => record.fantasy_points_ppr_pg,
    }
}

/// Metric value for leaderboards: per-game metrics ignore one-game samples.
pub fn leaderboard_value(record: &SeasonStatRecord, metric: FantasyMetric) -> Option<f64> {
    if metric.is_per_game() && record.games_played <= 1 {
        return None;
    }
    fantasy_value(record, metric)
}

pub fn team_metric_value(totals: &TeamSeasonTotals, metric: TeamMetric) -> f64 {
    match metric {
        TeamMetric::PassingYards => totals.stats.passing_yards,
        TeamMetric::RushingYards => totals.stats.rushing_yards,
        TeamMetric::TotalYards => totals.total_yards(),
        TeamMetric::PassingTds => totals.stats.passing_tds,
        TeamMetric::RushingTds => totals.stats.rushing_tds,
        TeamMetric::TotalTds => totals.total_tds(),
    }
}

/// Rank season records by a fantasy metric, per season or per season and
/// position.
pub fn rank_season_players(
    records: &[SeasonStatRecord],
    scope: RankScope,
    metric: FantasyMetric,
) -> Vec<RankedEntity<SeasonStatRecord>> {
    let ranks = competition_ranks(
        records,
        |r| match scope {
            RankScope::Season => (r.season, None),
            RankScope::SeasonPosition => (r.season, Some(r.position)),
        },
        |r| fantasy_value(r, metric),
    );
    records
        .iter()
        .zip(ranks)
        .map(|(record, rank)| RankedEntity {
            entity: record.clone(),
            rank,
            value: fantasy_value(record, metric),
        })
        .collect()
}

/// Rank team totals within each season.
pub fn rank_team_totals(
    totals: &[TeamSeasonTotals],
    metric: TeamMetric,
) -> Vec<RankedEntity<TeamSeasonTotals>> {
    let ranks = competition_ranks(totals, |t| t.season, |t| Some(team_metric_value(t, metric)));
    totals
        .iter()
        .zip(ranks)
        .map(|(t, rank)| RankedEntity {
            entity: t.clone(),
            rank,
            value: Some(team_metric_value(t, metric)),
        })
        .collect()
}

/// Every item whose metric is at least the `n`-th best value, best first.
///
/// Ties at the cut line are all kept, so the result can be longer than `n`.
pub fn top_n_with_ties<T, F>(items: &[T], n: usize, metric_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<f64>,
{
    let mut scored: Vec<(f64, &T)> = items
        .iter()
        .filter_map(|item| metric_of(item).filter(|v| v.is_finite()).map(|v| (v, item)))
        .collect();
    if n == 0 || scored.is_empty() {
        return Vec::new();
    }
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    let cutoff = scored[n.min(scored.len()) - 1].0;
    scored
        .into_iter()
        .take_while(|(value, _)| *value >= cutoff)
        .map(|(_, item)| item.clone())
        .collect()
}

/// A player's cross-position rank for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallRank {
    pub season: Season,
    pub player_id: PlayerId,
    pub value: f64,
    pub rank: u32,
}

/// Overall league ranks with every team stint of a season combined.
///
/// Totals are summed across stints; per-game metrics divide the combined
/// points by the combined games.
pub fn overall_player_ranks(
    records: &[SeasonStatRecord],
    metric: FantasyMetric,
) -> HashMap<(Season, PlayerId), OverallRank> {
    let mut combined: BTreeMap<(Season, PlayerId), (f64, f64, u32)> = BTreeMap::new();
    for r in records {
        let entry = combined
            .entry((r.season, r.player_id.clone()))
            .or_insert((0.0, 0.0, 0));
        entry.0 += r.stats.fantasy_points;
        entry.1 += r.stats.fantasy_points_ppr;
        entry.2 += r.games_played;
    }

    let rows: Vec<((Season, PlayerId), Option<f64>)> = combined
        .into_iter()
        .map(|(key, (std, ppr, games))| {
            let value = match metric {
                FantasyMetric::Standard => Some(std),
                FantasyMetric::Ppr => Some(ppr),
                FantasyMetric::StandardPerGame => ratio(std, f64::from(games)),
                FantasyMetric::PprPerGame => ratio(ppr, f64::from(games)),
            };
            (key, value)
        })
        .collect();

    let ranks = competition_ranks(&rows, |row| row.0 .0, |row| row.1);
    rows.into_iter()
        .zip(ranks)
        .filter_map(|(((season, player_id), value), rank)| {
            let (value, rank) = (value?, rank?);
            Some((
                (season, player_id.clone()),
                OverallRank {
                    season,
                    player_id,
                    value,
                    rank,
                },
            ))
        })
        .collect()
}

/// Mean metric value of the top `n` players at a position in a season,
/// counting ties at the cut line. `None` when no player qualifies.
pub fn league_top_n_average(
    records: &[SeasonStatRecord],
    season: Season,
    position: Position,
    n: usize,
    metric: FantasyMetric,
) -> Option<f64> {
    let pool: Vec<&SeasonStatRecord> = records
        .iter()
        .filter(|r| r.season == season && r.position == position)
        .collect();
    let top = top_n_with_ties(&pool, n, |r| leaderboard_value(r, metric));
    let values: Vec<f64> = top.iter().filter_map(|r| leaderboard_value(r, metric)).collect();
    ratio(values.iter().sum(), values.len() as f64)
}
