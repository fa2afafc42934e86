//! The loaded, normalized input tables.

use super::loader;
use super::models::*;
use crate::cli::types::{PlayerId, Season};
use crate::core::{DataPaths, TeamRegistry};
use crate::error::DraftGuideError;
use crate::Result;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

/// Every input table after team normalization and uniqueness checks.
///
/// Immutable once built; views read from it and never write back.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    weekly: Vec<WeeklyStatRecord>,
    season: Vec<SeasonStatRecord>,
    coaching: Vec<CoachAssignment>,
    rosters: Vec<RosterEntry>,
    contracts: Vec<ContractRecord>,
    roster_index: HashMap<PlayerId, usize>,
    contract_index: HashMap<PlayerId, usize>,
}

impl DataSet {
    /// Load every table found under `paths`.
    ///
    /// At least one of the weekly or season statistics files must exist. The
    /// coaching, roster and contract files are optional; a missing file loads
    /// as an empty table.
    pub fn load(paths: &DataPaths, registry: &TeamRegistry) -> Result<Self> {
        let weekly = optional(&paths.weekly_stats, loader::read_weekly_stats)?;
        let season = optional(&paths.season_stats, loader::read_season_stats)?;
        if weekly.is_none() && season.is_none() {
            return Err(DraftGuideError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!(
                    "neither {} nor {} exists",
                    paths.weekly_stats.display(),
                    paths.season_stats.display()
                ),
            )));
        }

        Self::from_parts(
            weekly.unwrap_or_default(),
            season.unwrap_or_default(),
            optional(&paths.coaching_staff, loader::read_coaching_staff)?.unwrap_or_default(),
            optional(&paths.active_rosters, loader::read_active_rosters)?.unwrap_or_default(),
            optional(&paths.active_contracts, loader::read_active_contracts)?
                .unwrap_or_default(),
            registry,
        )
    }

    /// Build a dataset from in-memory tables.
    ///
    /// Team codes in every table are canonicalized through `registry`.
    ///
    /// # Errors
    ///
    /// [`DraftGuideError::DuplicateRecord`] when a player appears twice in the
    /// roster or contract table.
    pub fn from_parts(
        mut weekly: Vec<WeeklyStatRecord>,
        mut season: Vec<SeasonStatRecord>,
        coaching: Vec<CoachAssignment>,
        mut rosters: Vec<RosterEntry>,
        contracts: Vec<ContractRecord>,
        registry: &TeamRegistry,
    ) -> Result<Self> {
        for row in &mut weekly {
            row.recent_team = registry.canonical_abbr(&row.recent_team);
        }
        for row in &mut season {
            let team = registry.normalize(&row.recent_team);
            row.recent_team = team.abbr;
            row.team_id = team.id.or(row.team_id);
        }
        for row in &mut rosters {
            row.team = registry.canonical_abbr(&row.team);
        }

        // Normalization can turn two distinct rows (STL, LAR) into duplicates
        let mut seen = HashSet::new();
        let coaching: Vec<CoachAssignment> = coaching
            .into_iter()
            .map(|mut a| {
                let team = registry.normalize(&a.team_abbr);
                a.team_abbr = team.abbr;
                a.team_id = team.id;
                a
            })
            .filter(|a| seen.insert(a.clone()))
            .collect();

        let roster_index = unique_index("active_rosters", &rosters, |r| &r.player_id)?;
        let contract_index = unique_index("active_contracts", &contracts, |c| &c.player_id)?;

        info!(
            "Dataset ready: {} weekly, {} season, {} coaching, {} roster, {} contract rows",
            weekly.len(),
            season.len(),
            coaching.len(),
            rosters.len(),
            contracts.len()
        );

        Ok(Self {
            weekly,
            season,
            coaching,
            rosters,
            contracts,
            roster_index,
            contract_index,
        })
    }

    pub fn weekly(&self) -> &[WeeklyStatRecord] {
        &self.weekly
    }

    /// Rows of the pre-aggregated season file, if one was loaded.
    pub fn season(&self) -> &[SeasonStatRecord] {
        &self.season
    }

    pub fn coaching(&self) -> &[CoachAssignment] {
        &self.coaching
    }

    pub fn rosters(&self) -> &[RosterEntry] {
        &self.rosters
    }

    pub fn contracts(&self) -> &[ContractRecord] {
        &self.contracts
    }

    pub fn roster_entry(&self, player_id: &PlayerId) -> Option<&RosterEntry> {
        self.roster_index.get(player_id).map(|&i| &self.rosters[i])
    }

    pub fn contract(&self, player_id: &PlayerId) -> Option<&ContractRecord> {
        self.contract_index.get(player_id).map(|&i| &self.contracts[i])
    }

    /// Distinct seasons present in the weekly and season statistics.
    pub fn stat_seasons(&self) -> BTreeSet<Season> {
        self.weekly
            .iter()
            .map(|w| w.season)
            .chain(self.season.iter().map(|s| s.season))
            .collect()
    }
}

fn optional<T, F>(path: &Path, read: F) -> Result<Option<Vec<T>>>
where
    F: FnOnce(&Path) -> Result<Vec<T>>,
{
    if path.exists() {
        read(path).map(Some)
    } else {
        warn!("{} not found, treating as empty", path.display());
        Ok(None)
    }
}

fn unique_index<T, F>(table: &str, rows: &[T], key_of: F) -> Result<HashMap<PlayerId, usize>>
where
    F: Fn(&T) -> &PlayerId,
{
    let mut index = HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let key = key_of(row);
        if index.insert(key.clone(), i).is_some() {
            return Err(DraftGuideError::DuplicateRecord {
                table: table.to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(index)
}
