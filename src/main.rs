//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use ffl_draft_guide::{
    cli::{Commands, DraftGuide},
    commands::{
        build_season::handle_build_season, coach_history::handle_coach_history,
        coach_overview::handle_coach_overview, common::DashboardContext,
        league_summary::handle_league_summary, player_profile::handle_player_profile,
        team_history::handle_team_history, team_overview::handle_team_overview,
    },
};
use tracing::info;

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    let app = DraftGuide::parse();
    init_tracing(app.global.verbose)?;

    let data_dir = app.global.data_dir;
    let json = app.global.json;

    // Only needs the weekly table, so it runs before the full load
    if let Commands::BuildSeason { output } = app.command {
        return handle_build_season(data_dir, output).context("failed to build season table");
    }

    let ctx = DashboardContext::load(data_dir).context("failed to load statistics tables")?;
    let latest = ctx.latest_stat_season().unwrap_or_default();
    info!("Latest season with statistics: {}", latest);

    match app.command {
        Commands::LeagueSummary { season, metric } => {
            handle_league_summary(&ctx, season.unwrap_or(latest), metric, json)?
        }

        Commands::TeamOverview { season } => {
            handle_team_overview(&ctx, season.unwrap_or(latest), json)?
        }

        Commands::CoachOverview { season, coach } => {
            handle_coach_overview(&ctx, season.unwrap_or(latest), coach.as_deref(), json)?
        }

        Commands::TeamHistory { team } => handle_team_history(&ctx, &team, json)?,

        Commands::CoachHistory {
            coach,
            position,
            metric,
        } => handle_coach_history(&ctx, coach.as_deref(), position, metric, json)?,

        Commands::PlayerProfile {
            player_id,
            weekly_season,
        } => handle_player_profile(&ctx, &player_id, weekly_season, json)?,

        Commands::BuildSeason { .. } => {}
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose {
        "ffl_draft_guide=debug,warn"
    } else {
        "ffl_draft_guide=info,warn"
    };

    // stdout carries the tables and JSON
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
