//! Unit tests for storage functionality

use super::loader::*;
use super::*;
use crate::cli::types::{PlayerId, Position, Season, SeasonType, TeamId, Week};
use crate::core::{DataPaths, TeamRegistry};
use crate::error::DraftGuideError;

const WEEKLY_CSV: &str = "\
player_id,player_name,player_display_name,position,recent_team,season,week,season_type,attempts,completions,passing_yards,passing_tds,interceptions,carries,rushing_yards,rushing_tds,targets,receptions,receiving_yards,receiving_tds,fantasy_points,fantasy_points_ppr
00-0000001,A.Runner,Alpha Runner,RB,STL,2015,1,REG,0,0,0,0,0,12,60,1,3,2,15,0,13.5,15.5
00-0000001,A.Runner,Alpha Runner,RB,STL,2015,2,REG,,,,,,10,40,0,4,4,30,0,7.0,11.0
00-0000002,B.Passer,Bravo Passer,QB,KC,2015,17,POST,35,22,260,2,1,3,10,0,0,0,0,0,17.4,17.4
";

const COACHING_CSV: &str = "\
Season,Team,Team Abbr,Team ID,Coach,Coach Type,Playing Calling Duties
2015,St. Louis Rams,STL,18,Jeff Fisher,Head Coach,No
2015,St. Louis Rams,STL,18,Frank Cignetti,Offensive Coordinator,Yes
2015,St. Louis Rams,STL,18,Frank Cignetti,Offensive Coordinator,Yes
2015,St. Louis Rams,STL,18,Gregg Williams,Defensive Coordinator,No
2015,Kansas City Chiefs,KC,16,Andy Reid,Head Coach,Yes
2015,Kansas City Chiefs,KC,16,,Offensive Coordinator,No
";

#[test]
fn test_weekly_reader_parses_rows_and_blank_stats() {
    let rows = weekly_stats_from_reader(WEEKLY_CSV.as_bytes()).unwrap();
    assert_eq!(rows.len(), 3);

    let second = &rows[1];
    assert_eq!(second.player_id, PlayerId::new("00-0000001"));
    assert_eq!(second.player_display_name, "Alpha Runner");
    assert_eq!(second.week, Week::new(2));
    assert_eq!(second.stats.attempts, 0.0);
    assert_eq!(second.stats.carries, 10.0);
    assert_eq!(second.stats.fantasy_points_ppr, 11.0);

    assert_eq!(rows[2].season_type, SeasonType::Postseason);
}

#[test]
fn test_weekly_reader_skips_malformed_rows() {
    let csv = "\
player_id,player_display_name,position,recent_team,season,week,season_type,carries
00-1,Good Row,RB,NE,2024,1,REG,5
00-2,Bad Week,RB,NE,2024,not-a-week,REG,5
00-3,Bad Type,RB,NE,2024,2,PRE,5
00-4,Another Good,RB,NE,2024,3,REG,8
";
    let rows = weekly_stats_from_reader(csv.as_bytes()).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.player_id.as_str()).collect();
    assert_eq!(ids, vec!["00-1", "00-4"]);
}

#[test]
fn test_coaching_reader_filters_roles_and_dedupes() {
    let rows = coaching_staff_from_reader(COACHING_CSV.as_bytes()).unwrap();

    // Duplicate OC, defensive coordinator and nameless row are dropped
    assert_eq!(rows.len(), 3);
    let oc = rows
        .iter()
        .find(|a| a.role == CoachRole::OffensiveCoordinator)
        .unwrap();
    assert_eq!(oc.coach, "Frank Cignetti");
    assert!(oc.play_calling);
    assert_eq!(oc.team_name, "St. Louis Rams");

    let reid = rows.iter().find(|a| a.coach == "Andy Reid").unwrap();
    assert_eq!(reid.role, CoachRole::HeadCoach);
    assert!(reid.play_calling);
}

#[test]
fn test_contract_reader_handles_float_years_and_blanks() {
    let csv = "\
player,gsis_id,year_signed,years,value,guaranteed,draft_year,draft_team,draft_round,draft_overall
Some QB,00-0033873,2020.0,10.0,450.0,141.48,2017.0,Chiefs,1.0,10.0
Undrafted,00-0039999,2023,3,2.7,,,,,
No Id,,2022,1,1.0,0,,,,
";
    let rows = active_contracts_from_reader(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);

    let qb = &rows[0];
    assert_eq!(qb.year_signed, Some(2020));
    assert_eq!(qb.years, Some(10));
    assert_eq!(qb.value, Some(450.0));
    assert_eq!(qb.draft_team.as_deref(), Some("Chiefs"));
    assert_eq!(qb.draft_overall, Some(10));

    let udfa = &rows[1];
    assert_eq!(udfa.guaranteed, None);
    assert_eq!(udfa.draft_year, None);
    assert_eq!(udfa.draft_team, None);
}

#[test]
fn test_season_reader_skips_non_fantasy_positions() {
    let csv = "\
season,player_id,player_display_name,recent_team,team_id,position,carries,games_played,usage
2024,00-1,Runner,NE,22,RB,200,16,0.2
2024,00-2,Fullback,NE,22,FB,10,16,0.01
";
    let rows = season_stats_from_reader(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].position, Position::RB);
    assert_eq!(rows[0].team_id, Some(TeamId::new(22)));
    assert_eq!(rows[0].games_played, 16);
    assert_eq!(rows[0].usage, Some(0.2));
    assert_eq!(rows[0].target_share, None);
}

#[test]
fn test_season_writer_output_reads_back() {
    let record = SeasonStatRecord {
        season: Season::new(2024),
        player_id: PlayerId::new("00-7"),
        player_display_name: "Writer Test".to_string(),
        recent_team: "BUF".to_string(),
        team_id: Some(TeamId::new(4)),
        position: Position::WR,
        stats: CountingStats {
            targets: 120.0,
            receptions: 80.0,
            receiving_yards: 1000.0,
            fantasy_points_ppr: 220.0,
            ..Default::default()
        },
        games_played: 17,
        team_total_plays: 1000.0,
        team_pass_attempts: 600.0,
        usage: None,
        target_share: Some(0.2),
        fantasy_points_pg: Some(8.235),
        fantasy_points_ppr_pg: Some(12.94),
    };

    let mut buf = Vec::new();
    write_season_stats(&mut buf, std::slice::from_ref(&record)).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("season,player_id,player_display_name,recent_team"));

    let back = season_stats_from_reader(text.as_bytes()).unwrap();
    assert_eq!(back, vec![record]);
}

#[test]
fn test_load_season_stats_rejects_unknown_level() {
    let paths = DataPaths::in_dir(std::path::Path::new("/nonexistent"));
    let err = load_season_stats(&paths, "monthly").unwrap_err();
    assert!(matches!(err, DraftGuideError::InvalidLevel { level } if level == "monthly"));
}

#[test]
fn test_dataset_normalizes_teams_everywhere() {
    let registry = TeamRegistry::default();
    let weekly = weekly_stats_from_reader(WEEKLY_CSV.as_bytes()).unwrap();
    let coaching = coaching_staff_from_reader(COACHING_CSV.as_bytes()).unwrap();
    let rosters = vec![RosterEntry {
        player_id: PlayerId::new("00-0000001"),
        player_name: "Alpha Runner".to_string(),
        team: "OAK".to_string(),
        position: "RB".to_string(),
    }];

    let data = DataSet::from_parts(weekly, vec![], coaching, rosters, vec![], &registry).unwrap();

    assert!(data.weekly().iter().all(|w| w.recent_team != "STL"));
    assert_eq!(data.weekly()[0].recent_team, "LAR");

    let fisher = data
        .coaching()
        .iter()
        .find(|a| a.coach == "Jeff Fisher")
        .unwrap();
    assert_eq!(fisher.team_abbr, "LAR");
    assert_eq!(fisher.team_id, Some(TeamId::new(18)));

    let entry = data.roster_entry(&PlayerId::new("00-0000001")).unwrap();
    assert_eq!(entry.team, "LV");
    assert!(data.contract(&PlayerId::new("00-0000001")).is_none());
}

#[test]
fn test_dataset_dedupes_coaching_after_relocation() {
    let registry = TeamRegistry::default();
    let base = CoachAssignment {
        season: Season::new(2016),
        team_abbr: "LA".to_string(),
        team_name: "Los Angeles Rams".to_string(),
        team_id: None,
        coach: "Jeff Fisher".to_string(),
        role: CoachRole::HeadCoach,
        play_calling: false,
    };
    let alias = CoachAssignment {
        team_abbr: "LAR".to_string(),
        ..base.clone()
    };

    let data =
        DataSet::from_parts(vec![], vec![], vec![base, alias], vec![], vec![], &registry).unwrap();
    assert_eq!(data.coaching().len(), 1);
}

#[test]
fn test_dataset_rejects_duplicate_roster_rows() {
    let entry = RosterEntry {
        player_id: PlayerId::new("00-1"),
        player_name: "Twice".to_string(),
        team: "NE".to_string(),
        position: "WR".to_string(),
    };
    let result = DataSet::from_parts(
        vec![],
        vec![],
        vec![],
        vec![entry.clone(), entry],
        vec![],
        &TeamRegistry::default(),
    );

    match result {
        Err(DraftGuideError::DuplicateRecord { table, key }) => {
            assert_eq!(table, "active_rosters");
            assert_eq!(key, "00-1");
        }
        other => panic!("expected duplicate record error, got {:?}", other),
    }
}

#[test]
fn test_dataset_rejects_duplicate_contracts() {
    let contract = ContractRecord {
        player_id: PlayerId::new("00-9"),
        year_signed: Some(2024),
        years: Some(4),
        value: Some(100.0),
        guaranteed: Some(50.0),
        draft_year: None,
        draft_team: None,
        draft_round: None,
        draft_overall: None,
    };
    let result = DataSet::from_parts(
        vec![],
        vec![],
        vec![],
        vec![],
        vec![contract.clone(), contract],
        &TeamRegistry::default(),
    );
    assert!(matches!(
        result,
        Err(DraftGuideError::DuplicateRecord { ref table, .. }) if table == "active_contracts"
    ));
}

#[test]
fn test_stat_seasons_are_sorted_and_distinct() {
    let weekly = weekly_stats_from_reader(WEEKLY_CSV.as_bytes()).unwrap();
    let data = DataSet::from_parts(
        weekly,
        vec![],
        vec![],
        vec![],
        vec![],
        &TeamRegistry::default(),
    )
    .unwrap();
    let seasons: Vec<Season> = data.stat_seasons().into_iter().collect();
    assert_eq!(seasons, vec![Season::new(2015)]);
}
