//! Integration tests for loading a data directory from disk

use std::fs;
use std::path::Path;

use ffl_draft_guide::{
    commands::{build_season::build_season_table, league_summary::league_summary},
    storage::{loader::read_season_stats, load_season_stats, StatsTable},
    DashboardContext, DataPaths, DataSet, DraftGuideError, FantasyMetric, PlayerId, Season,
    TeamRegistry,
};
use tempfile::TempDir;

const WEEKLY: &str = "\
player_id,player_display_name,position,recent_team,season,week,season_type,attempts,completions,passing_yards,passing_tds,carries,rushing_yards,rushing_tds,targets,receptions,receiving_yards,fantasy_points,fantasy_points_ppr
00-0000010,Dee Runner,RB,SD,2016,1,REG,0,0,0,0,20,100,1,4,3,25,18.5,21.5
00-0000010,Dee Runner,RB,SD,2016,2,REG,0,0,0,0,18,80,0,2,2,10,9.0,11.0
00-0000011,Cal Arm,QB,SD,2016,1,REG,38,25,300,2,2,5,0,0,0,0,20.5,20.5
00-0000012,Sam Hands,WR,LAC,2017,1,REG,0,0,0,0,0,0,0,9,6,88,14.8,20.8
00-0000013,Ken Kick,K,LAC,2017,1,REG,0,0,0,0,0,0,0,0,0,0,9.0,9.0
";

const COACHING: &str = "\
Season,Team,Team Abbr,Team ID,Coach,Coach Type,Playing Calling Duties
2016,San Diego Chargers,SD,17,Mike Flow,Head Coach,No
2016,San Diego Chargers,SD,17,Ken Whiz,Offensive Coordinator,Yes
2017,Los Angeles Chargers,LAC,17,Anthony Lynn,Head Coach,No
";

const ROSTERS: &str = "\
player_id,player_name,team,position
00-0000012,Sam Hands,LAC,WR
";

const CONTRACTS: &str = "\
gsis_id,year_signed,years,value,guaranteed,draft_year,draft_team,draft_round,draft_overall
00-0000012,2019.0,4.0,80.0,40.5,2015.0,Chargers,2.0,40.0
";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn full_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "weekly_stats.csv", WEEKLY);
    write(dir.path(), "coaching_staff.csv", COACHING);
    write(dir.path(), "active_rosters.csv", ROSTERS);
    write(dir.path(), "active_contracts.csv", CONTRACTS);
    dir
}

#[test]
fn test_dataset_loads_and_normalizes_directory() {
    let dir = full_dir();
    let data = DataSet::load(&DataPaths::in_dir(dir.path()), &TeamRegistry::default()).unwrap();

    assert_eq!(data.weekly().len(), 5);
    assert!(data.weekly().iter().all(|w| w.recent_team == "LAC"));
    assert_eq!(data.coaching().len(), 3);
    assert!(data.coaching().iter().all(|c| c.team_abbr == "LAC"));

    let contract = data.contract(&PlayerId::new("00-0000012")).unwrap();
    assert_eq!(contract.year_signed, Some(2019));
    assert_eq!(contract.draft_overall, Some(40));
    assert_eq!(
        data.stat_seasons().into_iter().collect::<Vec<_>>(),
        vec![Season::new(2016), Season::new(2017)]
    );
}

#[test]
fn test_optional_tables_may_be_missing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "weekly_stats.csv", WEEKLY);

    let ctx = DashboardContext::load(Some(dir.path().to_path_buf())).unwrap();
    assert!(ctx.data.coaching().is_empty());
    assert!(ctx.data.rosters().is_empty());
    assert!(ctx.coaches.is_empty());
    // Kicker is dropped during aggregation
    assert_eq!(ctx.season_records.len(), 3);
}

#[test]
fn test_missing_statistics_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "coaching_staff.csv", COACHING);

    match DataSet::load(&DataPaths::in_dir(dir.path()), &TeamRegistry::default()) {
        Err(DraftGuideError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_duplicate_roster_entry_is_rejected() {
    let dir = full_dir();
    write(
        dir.path(),
        "active_rosters.csv",
        "player_id,player_name,team,position\n00-1,A,KC,QB\n00-1,A,KC,QB\n",
    );
    match DataSet::load(&DataPaths::in_dir(dir.path()), &TeamRegistry::default()) {
        Err(DraftGuideError::DuplicateRecord { table, key }) => {
            assert_eq!(table, "active_rosters");
            assert_eq!(key, "00-1");
        }
        other => panic!("expected DuplicateRecord, got {other:?}"),
    }
}

#[test]
fn test_build_season_table_writes_readable_csv() {
    let dir = full_dir();
    let paths = DataPaths::in_dir(dir.path());

    let written = build_season_table(&paths, &TeamRegistry::default(), None).unwrap();
    assert_eq!(written, 3);

    let season = read_season_stats(&paths.season_stats).unwrap();
    assert_eq!(season.len(), 3);
    let runner = season
        .iter()
        .find(|r| r.player_id == PlayerId::new("00-0000010"))
        .unwrap();
    assert_eq!(runner.recent_team, "LAC");
    assert_eq!(runner.games_played, 2);
    assert_eq!(runner.stats.rushing_yards, 180.0);
    assert_eq!(runner.fantasy_points_ppr_pg, Some(16.25));
    // 38 pass attempts plus 40 carries
    assert_eq!(runner.team_total_plays, 78.0);

    match load_season_stats(&paths, "season").unwrap() {
        StatsTable::Season(rows) => assert_eq!(rows, season),
        StatsTable::Weekly(_) => panic!("expected season table"),
    }
}

#[test]
fn test_build_season_table_explicit_output() {
    let dir = full_dir();
    let paths = DataPaths::in_dir(dir.path());
    let target = dir.path().join("out").join("seasons.csv");

    build_season_table(&paths, &TeamRegistry::default(), Some(target.as_path())).unwrap();
    assert!(target.exists());
    assert!(!paths.season_stats.exists());
}

#[test]
fn test_season_table_alone_drives_views() {
    let source = full_dir();
    let paths = DataPaths::in_dir(source.path());
    build_season_table(&paths, &TeamRegistry::default(), None).unwrap();

    // A directory with only the pre-aggregated table
    let dir = TempDir::new().unwrap();
    fs::copy(&paths.season_stats, dir.path().join("season_stats.csv")).unwrap();

    let ctx = DashboardContext::load(Some(dir.path().to_path_buf())).unwrap();
    assert!(ctx.data.weekly().is_empty());
    assert_eq!(ctx.season_records.len(), 3);
    assert!(league_summary(&ctx, Season::new(2016), FantasyMetric::Ppr).is_available());
}

#[test]
fn test_invalid_level_checked_before_io() {
    let dir = TempDir::new().unwrap();
    match load_season_stats(&DataPaths::in_dir(dir.path()), "monthly") {
        Err(DraftGuideError::InvalidLevel { level }) => assert_eq!(level, "monthly"),
        other => panic!("expected InvalidLevel, got {other:?}"),
    }
}
