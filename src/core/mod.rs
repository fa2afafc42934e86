//! Core utilities for the draft guide
//!
//! This module consolidates common utilities that are used across
//! the application:
//! - `cache`: In-memory memoization of computed views
//! - `paths`: Data directory and input file resolution
//! - `teams`: Franchise identity normalization

pub mod cache;
pub mod paths;
pub mod teams;

// Re-export commonly used items for convenience
pub use cache::{CacheKey, ViewCache};
pub use paths::{default_data_dir, resolve_data_dir, DataPaths};
pub use teams::{CanonicalTeam, TeamRegistry};
