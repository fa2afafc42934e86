//! Type-safe wrappers and enums for NFL statistics selections.

pub mod filters;
pub mod ids;
pub mod position;
pub mod time;

pub use filters::{AggregationLevel, FantasyMetric, RankScope, SeasonType, TeamMetric};
pub use ids::{PlayerId, TeamId};
pub use position::Position;
pub use time::{Season, Week};
