//! Fantasy football position types and utilities.

use crate::error::DraftGuideError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fantasy-relevant offensive positions.
///
/// Weekly source rows carry every roster position (FB, K, OL, ...); only these
/// four survive season aggregation.
///
/// # Examples
///
/// ```rust
/// use ffl_draft_guide::Position;
///
/// let qb: Position = "qb".parse().unwrap();
/// assert_eq!(qb, Position::QB);
/// assert_eq!(Position::TE.to_string(), "TE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
}

impl Position {
    /// All fantasy positions in display order.
    pub const FANTASY: [Position; 4] = [Position::QB, Position::RB, Position::WR, Position::TE];

    /// Pass-catching positions used for target share splits.
    pub const RECEIVING: [Position; 3] = [Position::WR, Position::RB, Position::TE];

    /// Long display name used in team history charts.
    pub fn long_name(&self) -> &'static str {
        match self {
            Position::QB => "Quarterback",
            Position::RB => "Running Back",
            Position::WR => "Wide Receiver",
            Position::TE => "Tight End",
        }
    }

    /// How many players at this position form the league baseline for
    /// average comparisons.
    pub fn league_baseline_size(&self) -> u32 {
        match self {
            Position::QB => 32,
            Position::RB => 40,
            Position::WR => 40,
            Position::TE => 20,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = DraftGuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            _ => Err(DraftGuideError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_string_conversion() {
        assert_eq!(Position::QB.to_string(), "QB");
        assert_eq!(Position::RB.to_string(), "RB");
        assert_eq!(Position::WR.to_string(), "WR");
        assert_eq!(Position::TE.to_string(), "TE");
    }

    #[test]
    fn test_position_parsing_is_case_insensitive() {
        assert_eq!("wr".parse::<Position>().unwrap(), Position::WR);
        assert_eq!(" Te ".parse::<Position>().unwrap(), Position::TE);
    }

    #[test]
    fn test_non_fantasy_positions_rejected() {
        // Fullbacks and kickers appear in weekly data but never aggregate
        for raw in ["FB", "K", "OL", "", "D/ST"] {
            match raw.parse::<Position>() {
                Err(DraftGuideError::InvalidPosition { position }) => assert_eq!(position, raw),
                other => panic!("expected InvalidPosition for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_baseline_sizes() {
        assert_eq!(Position::QB.league_baseline_size(), 32);
        assert_eq!(Position::RB.league_baseline_size(), 40);
    }

    #[test]
    fn test_receiving_positions_exclude_qb() {
        assert!(!Position::RECEIVING.contains(&Position::QB));
        assert_eq!(Position::FANTASY.len(), 4);
    }
}
