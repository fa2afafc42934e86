//! Shared context and helpers for the dashboard views.
//!
//! Every view is a thin consumer of the same derived tables, so they are
//! computed once here and handed to the views by reference.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use super::{
    coach_history::{CoachHistory, CoachHistoryKey},
    coach_overview::{CoachOverview, CoachOverviewKey},
    league_summary::{LeagueSummary, LeagueSummaryKey},
    player_profile::{PlayerProfile, PlayerProfileKey},
    team_history::{TeamHistory, TeamHistoryKey},
    team_overview::{TeamOverview, TeamOverviewKey},
};
use crate::{
    core::{resolve_data_dir, DataPaths, TeamRegistry, ViewCache},
    pipeline::{
        aggregate_season_stats, build_team_totals, AggregationFilter, CoachDirectory,
        TeamSeasonTotals,
    },
    storage::{DataSet, SeasonStatRecord},
    Result, Season,
};

/// Views kept per cache before the least recently used is evicted.
pub const VIEW_CACHE_CAPACITY: usize = 32;

/// Result of a view that may legitimately have nothing to show.
///
/// `NoData` is not an error: the caller shows `reason` and skips anything
/// derived from the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum DataOutcome<T> {
    Available(T),
    NoData { reason: String },
}

impl<T> DataOutcome<T> {
    pub fn no_data(reason: impl Into<String>) -> Self {
        DataOutcome::NoData {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, DataOutcome::Available(_))
    }

    pub fn available(self) -> Option<T> {
        match self {
            DataOutcome::Available(value) => Some(value),
            DataOutcome::NoData { .. } => None,
        }
    }
}

/// One memo table per view.
pub struct ViewCaches {
    pub league_summary: ViewCache<LeagueSummaryKey, DataOutcome<LeagueSummary>>,
    pub team_overview: ViewCache<TeamOverviewKey, DataOutcome<TeamOverview>>,
    pub coach_overview: ViewCache<CoachOverviewKey, DataOutcome<CoachOverview>>,
    pub team_history: ViewCache<TeamHistoryKey, DataOutcome<TeamHistory>>,
    pub coach_history: ViewCache<CoachHistoryKey, DataOutcome<CoachHistory>>,
    pub player_profile: ViewCache<PlayerProfileKey, DataOutcome<PlayerProfile>>,
}

impl ViewCaches {
    pub fn new(capacity: usize) -> Self {
        Self {
            league_summary: ViewCache::new(capacity),
            team_overview: ViewCache::new(capacity),
            coach_overview: ViewCache::new(capacity),
            team_history: ViewCache::new(capacity),
            coach_history: ViewCache::new(capacity),
            player_profile: ViewCache::new(capacity),
        }
    }
}

/// Context containing the loaded data and everything derived from it
pub struct DashboardContext {
    pub data: DataSet,
    pub registry: TeamRegistry,
    pub season_records: Vec<SeasonStatRecord>,
    pub team_totals: Vec<TeamSeasonTotals>,
    pub coaches: CoachDirectory,
    pub caches: ViewCaches,
}

impl DashboardContext {
    /// Derive the season tables from a loaded dataset.
    ///
    /// Season records are rebuilt from weekly rows whenever any are present;
    /// the pre-aggregated season table is used only without weekly data.
    pub fn new(data: DataSet, registry: TeamRegistry) -> Self {
        let season_records = if data.weekly().is_empty() {
            info!("No weekly rows; using pre-aggregated season table");
            data.season().to_vec()
        } else {
            aggregate_season_stats(data.weekly(), &registry, &AggregationFilter::default())
        };
        let team_totals = build_team_totals(&season_records);
        let coaches = CoachDirectory::new(data.coaching());
        info!(
            "Derived {} season records and {} team-seasons",
            season_records.len(),
            team_totals.len()
        );

        Self {
            data,
            registry,
            season_records,
            team_totals,
            coaches,
            caches: ViewCaches::new(VIEW_CACHE_CAPACITY),
        }
    }

    /// Resolve the data directory and load every table in it.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = resolve_data_dir(data_dir)?;
        info!("Loading data from {}", dir.display());
        let registry = TeamRegistry::default();
        let data = DataSet::load(&DataPaths::in_dir(&dir), &registry)?;
        Ok(Self::new(data, registry))
    }

    pub fn records_for_season(&self, season: Season) -> Vec<&SeasonStatRecord> {
        self.season_records
            .iter()
            .filter(|r| r.season == season)
            .collect()
    }

    pub fn team_totals_for_season(&self, season: Season) -> Vec<TeamSeasonTotals> {
        self.team_totals
            .iter()
            .filter(|t| t.season == season)
            .cloned()
            .collect()
    }

    /// Most recent season with statistics.
    pub fn latest_stat_season(&self) -> Option<Season> {
        self.season_records.iter().map(|r| r.season).max()
    }
}

/// Print a view as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format an optional number, or `N/A`.
pub fn fmt_opt(value: Option<f64>, places: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", places, v),
        None => crate::pipeline::NOT_AVAILABLE.to_string(),
    }
}

/// Format an optional rank, or `-`.
pub fn fmt_rank(rank: Option<u32>) -> String {
    match rank {
        Some(r) => r.to_string(),
        None => "-".to_string(),
    }
}
