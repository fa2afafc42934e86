//! Season aggregation and derived-metrics pipeline
//!
//! Pure functions over the loaded tables, leaves first:
//! - `aggregate`: weekly rows to season records and team totals
//! - `metrics`: derived ratios with zero-denominator sentinels
//! - `ranking`: competition ranks within season or season+position
//! - `coaches`: coach attribution with interim and play-caller handling

pub mod aggregate;
pub mod coaches;
pub mod metrics;
pub mod ranking;

pub use aggregate::{aggregate_season_stats, build_team_totals, AggregationFilter, TeamSeasonTotals};
pub use coaches::{CoachDirectory, CoachSlot, CoachTenure, CoachingStaff, MISSING_COACH, NOT_AVAILABLE};
pub use metrics::DerivedMetrics;
pub use ranking::{
    competition_ranks, fantasy_value, leaderboard_value, league_top_n_average,
    overall_player_ranks, rank_season_players, rank_team_totals, top_n_with_ties, OverallRank,
    RankedEntity,
};
