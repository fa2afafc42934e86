//! Build the season statistics table from weekly rows.
//!
//! Reads `weekly_stats.csv`, aggregates regular-season fantasy positions and
//! writes `season_stats.csv` (or an explicit output path).

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    core::{resolve_data_dir, DataPaths, TeamRegistry},
    pipeline::{aggregate_season_stats, AggregationFilter},
    storage::{loader::read_weekly_stats, save_season_stats},
    Result,
};

/// Aggregate the weekly table under `paths` and write the season table.
///
/// Returns the number of season rows written.
pub fn build_season_table(
    paths: &DataPaths,
    registry: &TeamRegistry,
    output: Option<&Path>,
) -> Result<usize> {
    let weekly = read_weekly_stats(&paths.weekly_stats)?;
    let records = aggregate_season_stats(&weekly, registry, &AggregationFilter::default());

    let output = output.unwrap_or(paths.season_stats.as_path());
    save_season_stats(output, &records)?;
    info!(
        "Built {} season rows from {} weekly rows",
        records.len(),
        weekly.len()
    );
    Ok(records.len())
}

/// Handle the build-season command
pub fn handle_build_season(data_dir: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let dir = resolve_data_dir(data_dir)?;
    let paths = DataPaths::in_dir(&dir);
    let target = output.unwrap_or_else(|| paths.season_stats.clone());

    let written = build_season_table(&paths, &TeamRegistry::default(), Some(&target))?;
    println!("Wrote {} season rows to {}", written, target.display());
    Ok(())
}
