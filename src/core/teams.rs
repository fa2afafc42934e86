//! Franchise identity normalization.
//!
//! Relocated franchises keep appearing under their old abbreviations in
//! historical data (`SD`, `STL`, `LA`, `OAK`). Every table is passed through a
//! [`TeamRegistry`] before any group-by or join keyed on team, so a franchise
//! has one identity across all seasons.

use crate::cli::types::TeamId;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Canonical abbreviations and numeric IDs for the 32 current franchises.
const CANONICAL_TEAMS: [(&str, u8); 32] = [
    ("ARI", 1),
    ("ATL", 2),
    ("BAL", 3),
    ("BUF", 4),
    ("CAR", 5),
    ("CHI", 6),
    ("CIN", 7),
    ("CLE", 8),
    ("DAL", 9),
    ("DEN", 10),
    ("DET", 11),
    ("GB", 12),
    ("HOU", 13),
    ("IND", 14),
    ("JAX", 15),
    ("KC", 16),
    ("LAC", 17),
    ("LAR", 18),
    ("LV", 19),
    ("MIA", 20),
    ("MIN", 21),
    ("NE", 22),
    ("NO", 23),
    ("NYG", 24),
    ("NYJ", 25),
    ("PHI", 26),
    ("PIT", 27),
    ("SEA", 28),
    ("SF", 29),
    ("TB", 30),
    ("TEN", 31),
    ("WAS", 32),
];

/// Historical abbreviation -> current abbreviation.
const RELOCATIONS: [(&str, &str); 4] = [("SD", "LAC"), ("STL", "LAR"), ("LA", "LAR"), ("OAK", "LV")];

/// A team abbreviation after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalTeam {
    pub abbr: String,
    /// `None` for codes the registry does not know.
    pub id: Option<TeamId>,
}

/// Lookup table from any known team code to its canonical identity.
#[derive(Debug, Clone)]
pub struct TeamRegistry {
    aliases: HashMap<String, String>,
    ids: HashMap<String, TeamId>,
}

impl TeamRegistry {
    /// Registry with no franchises; every code passes through untouched.
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
            ids: HashMap::new(),
        }
    }

    /// Register a canonical franchise code and its numeric ID.
    pub fn with_team(mut self, abbr: &str, id: TeamId) -> Self {
        self.ids.insert(abbr.to_string(), id);
        self
    }

    /// Register a historical code for an existing franchise.
    pub fn with_alias(mut self, historical: &str, canonical: &str) -> Self {
        self.aliases
            .insert(historical.to_string(), canonical.to_string());
        self
    }

    /// Canonical abbreviation for a code. Unknown codes are returned unchanged.
    pub fn canonical_abbr(&self, abbr: &str) -> String {
        let trimmed = abbr.trim();
        match self.aliases.get(trimmed) {
            Some(canonical) => canonical.clone(),
            None => trimmed.to_string(),
        }
    }

    /// Canonical abbreviation plus numeric ID.
    pub fn normalize(&self, abbr: &str) -> CanonicalTeam {
        let canonical = self.canonical_abbr(abbr);
        let id = self.ids.get(&canonical).copied();
        if id.is_none() {
            debug!("team code {:?} not in registry, passing through", abbr);
        }
        CanonicalTeam { abbr: canonical, id }
    }

    /// Numeric ID for a code, following relocations.
    pub fn team_id(&self, abbr: &str) -> Option<TeamId> {
        self.normalize(abbr).id
    }

    /// True when the code resolves to a registered franchise.
    pub fn is_known(&self, abbr: &str) -> bool {
        self.team_id(abbr).is_some()
    }
}

impl Default for TeamRegistry {
    /// The current 32-team league with known relocations.
    fn default() -> Self {
        let registry = CANONICAL_TEAMS
            .iter()
            .fold(Self::empty(), |reg, (abbr, id)| {
                reg.with_team(abbr, TeamId::new(*id))
            });
        RELOCATIONS
            .iter()
            .fold(registry, |reg, (old, new)| reg.with_alias(old, new))
    }
}
