//! CSV readers for the input tables.
//!
//! Column names follow the upstream exports (`recent_team`,
//! `player_display_name`, `Team Abbr`, `Coach Type`, ...). Malformed rows are
//! logged and skipped so one bad line never blocks the rest of a table.

use super::models::*;
use crate::cli::types::{AggregationLevel, PlayerId, Season, SeasonType, TeamId, Week};
use crate::error::DraftGuideError;
use crate::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Raw CSV rows (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawWeeklyRow {
    season: u16,
    week: u16,
    player_id: String,
    #[serde(default)]
    player_display_name: String,
    #[serde(default)]
    recent_team: String,
    #[serde(default)]
    position: String,
    season_type: SeasonType,
    #[serde(default)]
    attempts: Option<f64>,
    #[serde(default)]
    completions: Option<f64>,
    #[serde(default)]
    passing_yards: Option<f64>,
    #[serde(default)]
    passing_tds: Option<f64>,
    #[serde(default)]
    interceptions: Option<f64>,
    #[serde(default)]
    carries: Option<f64>,
    #[serde(default)]
    rushing_yards: Option<f64>,
    #[serde(default)]
    rushing_tds: Option<f64>,
    #[serde(default)]
    targets: Option<f64>,
    #[serde(default)]
    receptions: Option<f64>,
    #[serde(default)]
    receiving_yards: Option<f64>,
    #[serde(default)]
    receiving_tds: Option<f64>,
    #[serde(default)]
    fantasy_points: Option<f64>,
    #[serde(default)]
    fantasy_points_ppr: Option<f64>,
}

impl RawWeeklyRow {
    fn into_record(self) -> WeeklyStatRecord {
        WeeklyStatRecord {
            player_id: PlayerId::new(self.player_id.trim()),
            player_display_name: self.player_display_name.trim().to_string(),
            recent_team: self.recent_team.trim().to_string(),
            position: self.position.trim().to_string(),
            season: Season::new(self.season),
            week: Week::new(self.week),
            season_type: self.season_type,
            stats: CountingStats {
                attempts: self.attempts.unwrap_or(0.0),
                completions: self.completions.unwrap_or(0.0),
                passing_yards: self.passing_yards.unwrap_or(0.0),
                passing_tds: self.passing_tds.unwrap_or(0.0),
                interceptions: self.interceptions.unwrap_or(0.0),
                carries: self.carries.unwrap_or(0.0),
                rushing_yards: self.rushing_yards.unwrap_or(0.0),
                rushing_tds: self.rushing_tds.unwrap_or(0.0),
                targets: self.targets.unwrap_or(0.0),
                receptions: self.receptions.unwrap_or(0.0),
                receiving_yards: self.receiving_yards.unwrap_or(0.0),
                receiving_tds: self.receiving_tds.unwrap_or(0.0),
                fantasy_points: self.fantasy_points.unwrap_or(0.0),
                fantasy_points_ppr: self.fantasy_points_ppr.unwrap_or(0.0),
            },
        }
    }
}

/// Flat season row, used both to read a pre-aggregated table and to write
/// one out.
#[derive(Debug, Serialize, Deserialize)]
struct RawSeasonRow {
    season: u16,
    player_id: String,
    #[serde(default)]
    player_display_name: String,
    recent_team: String,
    #[serde(default)]
    team_id: Option<u8>,
    position: String,
    #[serde(default)]
    attempts: Option<f64>,
    #[serde(default)]
    completions: Option<f64>,
    #[serde(default)]
    passing_yards: Option<f64>,
    #[serde(default)]
    passing_tds: Option<f64>,
    #[serde(default)]
    interceptions: Option<f64>,
    #[serde(default)]
    carries: Option<f64>,
    #[serde(default)]
    rushing_yards: Option<f64>,
    #[serde(default)]
    rushing_tds: Option<f64>,
    #[serde(default)]
    targets: Option<f64>,
    #[serde(default)]
    receptions: Option<f64>,
    #[serde(default)]
    receiving_yards: Option<f64>,
    #[serde(default)]
    receiving_tds: Option<f64>,
    #[serde(default)]
    fantasy_points: Option<f64>,
    #[serde(default)]
    fantasy_points_ppr: Option<f64>,
    #[serde(default)]
    games_played: Option<u32>,
    #[serde(default)]
    team_total_plays: Option<f64>,
    #[serde(default)]
    team_pass_attempts: Option<f64>,
    #[serde(default)]
    usage: Option<f64>,
    #[serde(default)]
    target_share: Option<f64>,
    #[serde(default)]
    fantasy_points_pg: Option<f64>,
    #[serde(default)]
    fantasy_points_ppr_pg: Option<f64>,
}

impl RawSeasonRow {
    fn into_record(self) -> Option<SeasonStatRecord> {
        let position = match self.position.parse() {
            Ok(p) => p,
            Err(_) => {
                debug!(
                    "skipping season row for {}: non-fantasy position {:?}",
                    self.player_id, self.position
                );
                return None;
            }
        };
        Some(SeasonStatRecord {
            season: Season::new(self.season),
            player_id: PlayerId::new(self.player_id.trim()),
            player_display_name: self.player_display_name.trim().to_string(),
            recent_team: self.recent_team.trim().to_string(),
            team_id: self.team_id.map(TeamId::new),
            position,
            stats: CountingStats {
                attempts: self.attempts.unwrap_or(0.0),
                completions: self.completions.unwrap_or(0.0),
                passing_yards: self.passing_yards.unwrap_or(0.0),
                passing_tds: self.passing_tds.unwrap_or(0.0),
                interceptions: self.interceptions.unwrap_or(0.0),
                carries: self.carries.unwrap_or(0.0),
                rushing_yards: self.rushing_yards.unwrap_or(0.0),
                rushing_tds: self.rushing_tds.unwrap_or(0.0),
                targets: self.targets.unwrap_or(0.0),
                receptions: self.receptions.unwrap_or(0.0),
                receiving_yards: self.receiving_yards.unwrap_or(0.0),
                receiving_tds: self.receiving_tds.unwrap_or(0.0),
                fantasy_points: self.fantasy_points.unwrap_or(0.0),
                fantasy_points_ppr: self.fantasy_points_ppr.unwrap_or(0.0),
            },
            games_played: self.games_played.unwrap_or(0),
            team_total_plays: self.team_total_plays.unwrap_or(0.0),
            team_pass_attempts: self.team_pass_attempts.unwrap_or(0.0),
            usage: self.usage,
            target_share: self.target_share,
            fantasy_points_pg: self.fantasy_points_pg,
            fantasy_points_ppr_pg: self.fantasy_points_ppr_pg,
        })
    }

    fn from_record(record: &SeasonStatRecord) -> Self {
        let s = &record.stats;
        Self {
            season: record.season.as_u16(),
            player_id: record.player_id.to_string(),
            player_display_name: record.player_display_name.clone(),
            recent_team: record.recent_team.clone(),
            team_id: record.team_id.map(|id| id.as_u8()),
            position: record.position.to_string(),
            attempts: Some(s.attempts),
            completions: Some(s.completions),
            passing_yards: Some(s.passing_yards),
            passing_tds: Some(s.passing_tds),
            interceptions: Some(s.interceptions),
            carries: Some(s.carries),
            rushing_yards: Some(s.rushing_yards),
            rushing_tds: Some(s.rushing_tds),
            targets: Some(s.targets),
            receptions: Some(s.receptions),
            receiving_yards: Some(s.receiving_yards),
            receiving_tds: Some(s.receiving_tds),
            fantasy_points: Some(s.fantasy_points),
            fantasy_points_ppr: Some(s.fantasy_points_ppr),
            games_played: Some(record.games_played),
            team_total_plays: Some(record.team_total_plays),
            team_pass_attempts: Some(record.team_pass_attempts),
            usage: record.usage,
            target_share: record.target_share,
            fantasy_points_pg: record.fantasy_points_pg,
            fantasy_points_ppr_pg: record.fantasy_points_ppr_pg,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCoachRow {
    #[serde(rename = "Season")]
    season: u16,
    #[serde(rename = "Team", default)]
    team: String,
    #[serde(rename = "Team Abbr")]
    team_abbr: String,
    #[serde(rename = "Coach", default)]
    coach: String,
    #[serde(rename = "Coach Type")]
    coach_type: String,
    #[serde(
        rename = "Playing Calling Duties",
        alias = "Play Calling Duties",
        default
    )]
    play_calling: Option<String>,
}

impl RawCoachRow {
    fn into_assignment(self) -> Option<CoachAssignment> {
        let coach = self.coach.trim();
        if coach.is_empty() {
            return None;
        }
        // Defensive and special-teams staff are present upstream but unused here
        let role = self.coach_type.parse::<CoachRole>().ok()?;
        let play_calling = self
            .play_calling
            .as_deref()
            .map(|v| v.trim().eq_ignore_ascii_case("yes"))
            .unwrap_or(false);
        Some(CoachAssignment {
            season: Season::new(self.season),
            team_abbr: self.team_abbr.trim().to_string(),
            team_name: self.team.trim().to_string(),
            // Resolved from the team registry during normalization
            team_id: None,
            coach: coach.to_string(),
            role,
            play_calling,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawRosterRow {
    player_id: String,
    #[serde(default)]
    player_name: String,
    #[serde(default)]
    team: String,
    #[serde(default)]
    position: String,
}

#[derive(Debug, Deserialize)]
struct RawContractRow {
    #[serde(default)]
    gsis_id: String,
    #[serde(default)]
    year_signed: Option<f64>,
    #[serde(default)]
    years: Option<f64>,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    guaranteed: Option<f64>,
    #[serde(default)]
    draft_year: Option<f64>,
    #[serde(default)]
    draft_team: Option<String>,
    #[serde(default)]
    draft_round: Option<f64>,
    #[serde(default)]
    draft_overall: Option<f64>,
}

/// Exports store integer columns with missing values as floats (`2017.0`).
fn whole(value: Option<f64>) -> Option<u16> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u16::MAX as f64)
        .map(|v| v.round() as u16)
}

impl RawContractRow {
    fn into_record(self) -> Option<ContractRecord> {
        let id = self.gsis_id.trim();
        if id.is_empty() {
            return None;
        }
        Some(ContractRecord {
            player_id: PlayerId::new(id),
            year_signed: whole(self.year_signed),
            years: whole(self.years),
            value: self.value.filter(|v| v.is_finite()),
            guaranteed: self.guaranteed.filter(|v| v.is_finite()),
            draft_year: whole(self.draft_year),
            draft_team: self
                .draft_team
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            draft_round: whole(self.draft_round),
            draft_overall: whole(self.draft_overall),
        })
    }
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr)
}

fn deserialize_rows<T, R>(rdr: R, table: &str) -> std::result::Result<Vec<T>, csv::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv_reader(rdr);
    // Surface a broken header as an error instead of skipping every row
    reader.headers()?;
    let mut rows = Vec::new();
    for (line, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => warn!("skipping malformed {} row {}: {}", table, line + 2, e),
        }
    }
    Ok(rows)
}

pub fn weekly_stats_from_reader<R: Read>(
    rdr: R,
) -> std::result::Result<Vec<WeeklyStatRecord>, csv::Error> {
    let rows: Vec<RawWeeklyRow> = deserialize_rows(rdr, "weekly_stats")?;
    Ok(rows.into_iter().map(RawWeeklyRow::into_record).collect())
}

pub fn season_stats_from_reader<R: Read>(
    rdr: R,
) -> std::result::Result<Vec<SeasonStatRecord>, csv::Error> {
    let rows: Vec<RawSeasonRow> = deserialize_rows(rdr, "season_stats")?;
    Ok(rows.into_iter().filter_map(RawSeasonRow::into_record).collect())
}

/// Coaching rows, exact duplicates removed, unused roles dropped.
pub fn coaching_staff_from_reader<R: Read>(
    rdr: R,
) -> std::result::Result<Vec<CoachAssignment>, csv::Error> {
    let rows: Vec<RawCoachRow> = deserialize_rows(rdr, "coaching_staff")?;
    let mut seen = std::collections::HashSet::new();
    Ok(rows
        .into_iter()
        .filter_map(RawCoachRow::into_assignment)
        .filter(|a| seen.insert(a.clone()))
        .collect())
}

pub fn active_rosters_from_reader<R: Read>(
    rdr: R,
) -> std::result::Result<Vec<RosterEntry>, csv::Error> {
    let rows: Vec<RawRosterRow> = deserialize_rows(rdr, "active_rosters")?;
    Ok(rows
        .into_iter()
        .filter(|r| !r.player_id.trim().is_empty())
        .map(|r| RosterEntry {
            player_id: PlayerId::new(r.player_id.trim()),
            player_name: r.player_name.trim().to_string(),
            team: r.team.trim().to_string(),
            position: r.position.trim().to_string(),
        })
        .collect())
}

pub fn active_contracts_from_reader<R: Read>(
    rdr: R,
) -> std::result::Result<Vec<ContractRecord>, csv::Error> {
    let rows: Vec<RawContractRow> = deserialize_rows(rdr, "active_contracts")?;
    Ok(rows
        .into_iter()
        .filter_map(RawContractRow::into_record)
        .collect())
}

// ---------------------------------------------------------------------------
// Path-based loaders
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File> {
    Ok(std::fs::File::open(path)?)
}

pub fn read_weekly_stats(path: &Path) -> Result<Vec<WeeklyStatRecord>> {
    let rows = weekly_stats_from_reader(open(path)?)
        .map_err(|e| DraftGuideError::csv(path, e))?;
    info!("Loaded {} weekly rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn read_season_stats(path: &Path) -> Result<Vec<SeasonStatRecord>> {
    let rows = season_stats_from_reader(open(path)?)
        .map_err(|e| DraftGuideError::csv(path, e))?;
    info!("Loaded {} season rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn read_coaching_staff(path: &Path) -> Result<Vec<CoachAssignment>> {
    let rows = coaching_staff_from_reader(open(path)?)
        .map_err(|e| DraftGuideError::csv(path, e))?;
    info!(
        "Loaded {} coaching assignments from {}",
        rows.len(),
        path.display()
    );
    Ok(rows)
}

pub fn read_active_rosters(path: &Path) -> Result<Vec<RosterEntry>> {
    let rows = active_rosters_from_reader(open(path)?)
        .map_err(|e| DraftGuideError::csv(path, e))?;
    info!("Loaded {} roster entries from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn read_active_contracts(path: &Path) -> Result<Vec<ContractRecord>> {
    let rows = active_contracts_from_reader(open(path)?)
        .map_err(|e| DraftGuideError::csv(path, e))?;
    info!("Loaded {} contracts from {}", rows.len(), path.display());
    Ok(rows)
}

/// A statistics table at the requested granularity.
#[derive(Debug, Clone)]
pub enum StatsTable {
    Season(Vec<SeasonStatRecord>),
    Weekly(Vec<WeeklyStatRecord>),
}

/// Load the season or weekly statistics table by level name.
///
/// # Errors
///
/// [`DraftGuideError::InvalidLevel`] for anything other than `"season"` or
/// `"weekly"`, checked before any file is touched.
pub fn load_season_stats(paths: &crate::core::DataPaths, level: &str) -> Result<StatsTable> {
    match level.parse::<AggregationLevel>()? {
        AggregationLevel::Season => Ok(StatsTable::Season(read_season_stats(
            &paths.season_stats,
        )?)),
        AggregationLevel::Weekly => Ok(StatsTable::Weekly(read_weekly_stats(
            &paths.weekly_stats,
        )?)),
    }
}

/// Serialize season records into CSV using the season table's column names.
pub fn write_season_stats<W: std::io::Write>(
    wtr: W,
    records: &[SeasonStatRecord],
) -> std::result::Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(wtr);
    for record in records {
        writer.serialize(RawSeasonRow::from_record(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write season records to a CSV file, creating parent directories.
pub fn save_season_stats(path: &Path, records: &[SeasonStatRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_season_stats(file, records).map_err(|e| DraftGuideError::csv(path, e))?;
    info!("Saved {} season rows to {}", records.len(), path.display());
    Ok(())
}
