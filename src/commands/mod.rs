//! Command implementations for the draft guide CLI
//!
//! Each dashboard view has a pure, cached `view(ctx, ...)` function returning
//! a serializable model and a `handle_*` function that prints it.

pub mod build_season;
pub mod coach_history;
pub mod coach_overview;
pub mod common;
pub mod league_summary;
pub mod player_profile;
pub mod team_history;
pub mod team_overview;

#[cfg(test)]
mod tests;

pub use common::{DashboardContext, DataOutcome};
