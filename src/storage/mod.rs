//! Storage layer for the draft guide
//!
//! Flat-file input tables, organized into logical components:
//! - `models`: Data structures
//! - `loader`: CSV readers and the season table writer
//! - `dataset`: Normalized, validated in-memory tables

pub mod dataset;
pub mod loader;
pub mod models;

#[cfg(test)]
mod tests;

// Re-export the main types and dataset struct for easy access
pub use dataset::DataSet;
pub use loader::{load_season_stats, save_season_stats, StatsTable};
pub use models::*;
