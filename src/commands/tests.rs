//! Integration tests for the dashboard views

use super::*;
use crate::{
    cli::types::{FantasyMetric, PlayerId, Position, Season, SeasonType, Week},
    commands::{
        coach_history::{coach_history_view, current_coaches},
        coach_overview::coach_overview,
        league_summary::league_summary,
        player_profile::{player_profile, ContractCard},
        team_history::team_history,
        team_overview::team_overview,
    },
    core::TeamRegistry,
    error::DraftGuideError,
    storage::{
        CoachAssignment, CoachRole, ContractRecord, CountingStats, DataSet, RosterEntry,
        WeeklyStatRecord,
    },
};

fn weekly(id: &str, team: &str, position: &str, week: u16, stats: CountingStats) -> WeeklyStatRecord {
    WeeklyStatRecord {
        player_id: PlayerId::new(id),
        player_display_name: format!("Player {}", id),
        recent_team: team.to_string(),
        position: position.to_string(),
        season: Season::new(2024),
        week: Week::new(week),
        season_type: SeasonType::Regular,
        stats,
    }
}

fn two_weeks(id: &str, team: &str, position: &str, stats: CountingStats) -> Vec<WeeklyStatRecord> {
    vec![
        weekly(id, team, position, 1, stats),
        weekly(id, team, position, 2, stats),
    ]
}

fn coach(team: &str, season: u16, role: CoachRole, name: &str, play_calling: bool) -> CoachAssignment {
    CoachAssignment {
        season: Season::new(season),
        team_abbr: team.to_string(),
        team_name: team.to_string(),
        team_id: None,
        coach: name.to_string(),
        role,
        play_calling,
    }
}

fn fixture() -> DashboardContext {
    let mut rows = Vec::new();
    rows.extend(two_weeks(
        "qb1",
        "KC",
        "QB",
        CountingStats {
            attempts: 30.0,
            completions: 20.0,
            passing_yards: 250.0,
            passing_tds: 2.0,
            fantasy_points: 18.0,
            fantasy_points_ppr: 18.0,
            ..Default::default()
        },
    ));
    rows.extend(two_weeks(
        "rb1",
        "KC",
        "RB",
        CountingStats {
            carries: 15.0,
            rushing_yards: 70.0,
            targets: 3.0,
            receptions: 2.0,
            receiving_yards: 20.0,
            fantasy_points: 10.0,
            fantasy_points_ppr: 12.0,
            ..Default::default()
        },
    ));
    rows.extend(two_weeks(
        "rb2",
        "KC",
        "RB",
        CountingStats {
            carries: 5.0,
            rushing_yards: 20.0,
            fantasy_points: 3.0,
            fantasy_points_ppr: 3.0,
            ..Default::default()
        },
    ));
    rows.extend(two_weeks(
        "wr1",
        "KC",
        "WR",
        CountingStats {
            targets: 10.0,
            receptions: 7.0,
            receiving_yards: 90.0,
            fantasy_points: 12.0,
            fantasy_points_ppr: 19.0,
            ..Default::default()
        },
    ));
    // Historical code, must land on LV
    rows.extend(two_weeks(
        "wr2",
        "OAK",
        "WR",
        CountingStats {
            targets: 8.0,
            receptions: 5.0,
            receiving_yards: 60.0,
            fantasy_points: 9.0,
            fantasy_points_ppr: 14.0,
            ..Default::default()
        },
    ));
    rows.extend(two_weeks(
        "qb2",
        "LV",
        "QB",
        CountingStats {
            attempts: 35.0,
            completions: 22.0,
            passing_yards: 240.0,
            passing_tds: 1.0,
            fantasy_points: 15.0,
            fantasy_points_ppr: 15.0,
            ..Default::default()
        },
    ));

    let coaching = vec![
        coach("KC", 2024, CoachRole::HeadCoach, "Coach Reed", true),
        coach("KC", 2024, CoachRole::OffensiveCoordinator, "Coach Nash", false),
        coach("LV", 2024, CoachRole::HeadCoach, "Coach Pike", false),
        coach("OAK", 2019, CoachRole::HeadCoach, "Coach Grey", true),
        coach("LV", 2024, CoachRole::InterimOffensiveCoordinator, "Coach Temp", false),
    ];

    let rosters = vec![RosterEntry {
        player_id: PlayerId::new("qb1"),
        player_name: "Quinn Arbor".to_string(),
        team: "KC".to_string(),
        position: "QB".to_string(),
    }];

    let contracts = vec![ContractRecord {
        player_id: PlayerId::new("qb1"),
        year_signed: Some(2020),
        years: Some(10),
        value: Some(450.0),
        guaranteed: Some(141.48),
        draft_year: Some(2017),
        draft_team: None,
        draft_round: Some(1),
        draft_overall: Some(10),
    }];

    let registry = TeamRegistry::default();
    let data = DataSet::from_parts(rows, Vec::new(), coaching, rosters, contracts, &registry)
        .expect("fixture dataset");
    DashboardContext::new(data, registry)
}

#[test]
fn test_league_summary_is_cached() {
    let ctx = fixture();
    let first = league_summary(&ctx, Season::new(2024), FantasyMetric::Ppr);
    let second = league_summary(&ctx, Season::new(2024), FantasyMetric::Ppr);
    assert_eq!(first, second);
    assert_eq!(ctx.caches.league_summary.stats().0, 1);

    // A different metric is a different view
    league_summary(&ctx, Season::new(2024), FantasyMetric::Standard);
    assert_eq!(ctx.caches.league_summary.stats().0, 2);
}

#[test]
fn test_league_summary_without_stats_is_no_data() {
    let ctx = fixture();
    let outcome = league_summary(&ctx, Season::new(2030), FantasyMetric::Ppr);
    assert!(!outcome.is_available());
    match outcome {
        DataOutcome::NoData { reason } => assert!(reason.contains("2030")),
        DataOutcome::Available(_) => panic!("expected NoData"),
    }
}

#[test]
fn test_league_summary_ranks_and_leaders() {
    let ctx = fixture();
    let summary = league_summary(&ctx, Season::new(2024), FantasyMetric::Ppr)
        .available()
        .expect("summary");

    let teams: Vec<&str> = summary.teams.iter().map(|t| t.team.as_str()).collect();
    assert_eq!(teams, vec!["KC", "LV"]);
    let kc = &summary.teams[0];
    assert_eq!(kc.total_yards, 680.0);
    assert_eq!(kc.total_rank, Some(1));
    assert_eq!(kc.head_coach, "Coach Reed");
    assert_eq!(kc.offensive_coordinator, "Coach Nash");
    // LV throws fewer yards than KC; KC ranks first on passing too
    assert_eq!(kc.pass_rank, Some(1));
    assert_eq!(summary.teams[1].rush_rank, Some(2));

    let wr = summary
        .leaders
        .iter()
        .find(|l| l.position == Position::WR)
        .expect("WR leaders");
    let DataOutcome::Available(rows) = &wr.leaders else {
        panic!("expected WR leaders");
    };
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Player wr1", "Player wr2"]);
    assert_eq!(rows[0].value, 38.0);
    assert_eq!(rows[1].team, "LV");

    let te = summary
        .leaders
        .iter()
        .find(|l| l.position == Position::TE)
        .expect("TE entry");
    assert!(!te.leaders.is_available());
}

#[test]
fn test_team_overview_sorted_by_total_yards() {
    let ctx = fixture();
    let overview = team_overview(&ctx, Season::new(2024))
        .available()
        .expect("overview");
    assert_eq!(overview.teams[0].team, "KC");
    assert_eq!(overview.teams[0].completion_pct, Some(66.7));
    assert_eq!(overview.teams[0].yards_per_carry, 4.5);

    let lv = &overview.teams[1];
    assert_eq!(lv.team, "LV");
    // No coordinator row and the head coach does not call plays
    assert_eq!(lv.offensive_coordinator, "-");
    assert_eq!(lv.interim_offensive_coordinator, "Coach Temp");
    assert_eq!(lv.pass_pct, Some(100.0));
    assert_eq!(lv.run_pct, Some(0.0));
    assert_eq!(lv.yards_per_carry, 0.0);
}

#[test]
fn test_coach_overview_filters_to_coach_teams() {
    let ctx = fixture();
    let overview = coach_overview(&ctx, Season::new(2024), Some("Coach Nash"))
        .unwrap()
        .available()
        .expect("overview");
    assert_eq!(overview.teams, vec!["KC".to_string()]);
    assert_eq!(overview.passing.len(), 1);
    assert_eq!(overview.passing[0].player_id, PlayerId::new("qb1"));
    let rushing: Vec<&str> = overview.rushing.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(rushing, vec!["Player rb1", "Player rb2"]);
    assert!(overview.receiving.iter().all(|r| r.team == "KC"));

    let league = coach_overview(&ctx, Season::new(2024), None)
        .unwrap()
        .available()
        .expect("league");
    assert_eq!(league.teams, vec!["KC".to_string(), "LV".to_string()]);
    // wr1 (38) outscores qb1 (36) across positions
    assert_eq!(league.receiving[0].name, "Player wr1");
    assert_eq!(league.receiving[0].overall_ppr_rank, Some(1));
    assert_eq!(league.passing[0].overall_ppr_rank, Some(2));
}

#[test]
fn test_coach_overview_unknown_coach() {
    let ctx = fixture();
    match coach_overview(&ctx, Season::new(2024), Some("Nobody")) {
        Err(DraftGuideError::CoachNotFound { name }) => assert_eq!(name, "Nobody"),
        other => panic!("expected CoachNotFound, got {other:?}"),
    }
    // A known coach without a team that season is not an error
    let outcome = coach_overview(&ctx, Season::new(2024), Some("Coach Grey")).unwrap();
    assert!(!outcome.is_available());
    assert_eq!(ctx.caches.coach_overview.stats().0, 1);
}

#[test]
fn test_team_history_resolves_historical_code() {
    let ctx = fixture();
    let history = team_history(&ctx, "oak")
        .unwrap()
        .available()
        .expect("history");
    assert_eq!(history.team, "LV");
    assert_eq!(history.team_id.map(|id| id.as_u8()), Some(19));
    assert_eq!(history.seasons.len(), 1);
    assert_eq!(history.seasons[0].offensive_coordinator, "-");

    let DataOutcome::Available(staff) = &history.current_staff else {
        panic!("expected staff");
    };
    assert_eq!(staff.season, Season::new(2024));
    assert_eq!(staff.head_coach[0].name, "Coach Pike");
    assert_eq!(staff.head_coach[0].hired, Some(Season::new(2024)));
    assert!(staff.offensive_coordinator.is_empty());

    // Same franchise, same cache entry
    team_history(&ctx, "LV").unwrap();
    assert_eq!(ctx.caches.team_history.stats().0, 1);
}

#[test]
fn test_team_history_target_share_and_points() {
    let ctx = fixture();
    let history = team_history(&ctx, "KC")
        .unwrap()
        .available()
        .expect("history");
    let wr = history
        .target_share
        .iter()
        .find(|r| r.position == Position::WR)
        .expect("WR share");
    // 20 of 26 WR/RB/TE targets
    assert_eq!(wr.target_share_pct, Some(76.92));

    let qb = history
        .ppr_by_position
        .iter()
        .find(|r| r.position == Position::QB)
        .expect("QB points");
    assert_eq!(qb.fantasy_points_ppr, 36.0);
    assert_eq!(qb.rank, Some(1));
}

#[test]
fn test_team_history_unknown_team() {
    let ctx = fixture();
    match team_history(&ctx, "XYZ") {
        Err(DraftGuideError::TeamNotFound { team }) => assert_eq!(team, "XYZ"),
        other => panic!("expected TeamNotFound, got {other:?}"),
    }
    // Known franchise without statistics
    assert!(!team_history(&ctx, "SEA").unwrap().is_available());
}

#[test]
fn test_coach_history_rb_usage() {
    let ctx = fixture();
    let history = coach_history_view(&ctx, "Coach Reed", Position::RB, FantasyMetric::Ppr)
        .unwrap()
        .available()
        .expect("history");
    assert_eq!(history.players.len(), 2);
    assert_eq!(history.players[0].position_rank, Some(1));
    assert_eq!(history.top_vs_league[0].top_player, "Player rb1");
    assert_eq!(history.top_vs_league[0].baseline_size, 40);
    assert!(history.target_share.is_none());

    let Some(DataOutcome::Available(usage)) = &history.rb_usage else {
        panic!("expected RB usage");
    };
    let depths: Vec<(u8, &str)> = usage.iter().map(|u| (u.depth, u.name.as_str())).collect();
    assert_eq!(depths, vec![(1, "Player rb1"), (2, "Player rb2")]);
}

#[test]
fn test_coach_history_target_share_threshold() {
    let ctx = fixture();
    let history = coach_history_view(&ctx, "Coach Pike", Position::WR, FantasyMetric::Ppr)
        .unwrap()
        .available()
        .expect("history");
    assert!(history.rb_usage.is_none());
    let Some(DataOutcome::Available(shares)) = &history.target_share else {
        panic!("expected target share");
    };
    // 16 targets over 70 team pass attempts
    assert_eq!(shares.len(), 1);
    assert!((shares[0].target_share_pct - 22.857).abs() < 0.01);
}

#[test]
fn test_coach_history_errors_and_gaps() {
    let ctx = fixture();
    assert!(matches!(
        coach_history_view(&ctx, "Nobody", Position::QB, FantasyMetric::Ppr),
        Err(DraftGuideError::CoachNotFound { .. })
    ));
    // Interim-only coach
    let interim = coach_history_view(&ctx, "Coach Temp", Position::QB, FantasyMetric::Ppr).unwrap();
    assert!(!interim.is_available());
    // Tenure exists but no statistics for that season
    let grey = coach_history_view(&ctx, "Coach Grey", Position::QB, FantasyMetric::Ppr).unwrap();
    assert!(!grey.is_available());
}

#[test]
fn test_current_coaches_lists_latest_season() {
    let ctx = fixture();
    let (season, choices) = current_coaches(&ctx).available().expect("coaches");
    assert_eq!(season, Season::new(2024));
    let listed: Vec<(&str, &str)> = choices
        .iter()
        .map(|c| (c.team.as_str(), c.coach.as_str()))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("KC", "Coach Reed"),
            ("KC", "Coach Nash"),
            ("LV", "Coach Pike")
        ]
    );
}

#[test]
fn test_player_profile_with_contract() {
    let ctx = fixture();
    let profile = player_profile(&ctx, &PlayerId::new("qb1"), None)
        .unwrap()
        .available()
        .expect("profile");
    assert_eq!(profile.name, "Quinn Arbor");
    assert_eq!(profile.team, "KC");
    assert_eq!(profile.contract.value, "$450,000,000");
    assert_eq!(profile.contract.guaranteed, "$141,480,000");
    assert_eq!(profile.contract.draft_year, "2017");
    assert_eq!(profile.contract.draft_team, "N/A");

    assert_eq!(profile.seasons.len(), 1);
    assert_eq!(
        profile.seasons[0].coach_label,
        "HC: Coach Reed, OC: Coach Nash"
    );

    let DataOutcome::Available(usage) = &profile.usage else {
        panic!("expected usage series");
    };
    assert_eq!(usage.points[0].value, Some(30.0));

    assert_eq!(profile.weekly_season, Some(Season::new(2024)));
    let DataOutcome::Available(weeks) = &profile.weekly else {
        panic!("expected weekly series");
    };
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].week, Week::new(1));
}

#[test]
fn test_player_profile_missing_reference_data() {
    let ctx = fixture();
    let profile = player_profile(&ctx, &PlayerId::new("wr2"), None)
        .unwrap()
        .available()
        .expect("profile");
    assert_eq!(profile.name, "Player wr2");
    assert_eq!(profile.team, "N/A");
    assert_eq!(profile.position, "WR");
    assert_eq!(profile.contract.year_signed, "N/A");
    assert_eq!(profile.contract.value, "N/A");
    assert_eq!(profile.seasons[0].team, "LV");

    // No weekly rows in the requested season
    let older = player_profile(&ctx, &PlayerId::new("wr2"), Some(Season::new(2019)))
        .unwrap()
        .available()
        .expect("profile");
    assert!(!older.weekly.is_available());
    assert_eq!(ctx.caches.player_profile.stats().0, 2);
}

#[test]
fn test_player_profile_unknown_player() {
    let ctx = fixture();
    match player_profile(&ctx, &PlayerId::new("00-0000000"), None) {
        Err(DraftGuideError::PlayerNotFound { id }) => assert_eq!(id, "00-0000000"),
        other => panic!("expected PlayerNotFound, got {other:?}"),
    }
    assert_eq!(ctx.caches.player_profile.stats().0, 0);
}

#[test]
fn test_contract_card_money_in_whole_dollars() {
    let record = ContractRecord {
        player_id: PlayerId::new("x"),
        year_signed: None,
        years: None,
        value: Some(0.75),
        guaranteed: Some(0.0001),
        draft_year: None,
        draft_team: None,
        draft_round: None,
        draft_overall: None,
    };
    let card = ContractCard::from_record(Some(&record));
    assert_eq!(card.value, "$750,000");
    assert_eq!(card.guaranteed, "$100");
    assert_eq!(card.years, "N/A");
}
