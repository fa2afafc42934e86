//! Coach attribution for team-seasons.
//!
//! Resolution rules for a (team, season, role) slot:
//! 1. Every assignment for the slot contributes; several names are joined.
//! 2. An empty offensive coordinator slot falls back to the head coach, but
//!    only when the head coach carries play-calling duties.
//! 3. A primary role is flagged as replaced mid-season when its interim
//!    counterpart exists for the same team-season.
//! 4. Anything still empty displays as [`MISSING_COACH`].
//!
//! Missing data is normal (future seasons, partial tables) and never an error.

use crate::cli::types::Season;
use crate::storage::{CoachAssignment, CoachRole};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};


/// Display value for an empty coach slot.
pub const MISSING_COACH: &str = "-";
/// Display value for missing reference data outside coaching.
pub const NOT_AVAILABLE: &str = "N/A";

const NAME_SEPARATOR: &str = ", ";

/// The resolved occupant(s) of one coaching slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoachSlot {
    /// Sorted, de-duplicated coach names.
    pub names: Vec<String>,
    pub replaced_mid_season: bool,
    /// True when an empty coordinator slot was filled by a play-calling head coach.
    pub via_play_caller: bool,
}

impl CoachSlot {
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names joined, or `-` when empty.
    pub fn joined(&self) -> String {
        if self.names.is_empty() {
            MISSING_COACH.to_string()
        } else {
            self.names.join(NAME_SEPARATOR)
        }
    }

    /// [`CoachSlot::joined`] with a trailing `*` for mid-season replacements.
    pub fn display(&self) -> String {
        let joined = self.joined();
        if self.replaced_mid_season && !self.is_empty() {
            format!("{}*", joined)
        } else {
            joined
        }
    }
}

/// All four resolved slots for a team-season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachingStaff {
    pub season: Season,
    pub team: String,
    pub head_coach: CoachSlot,
    pub offensive_coordinator: CoachSlot,
    pub interim_head_coach: CoachSlot,
    pub interim_offensive_coordinator: CoachSlot,
}

impl CoachingStaff {
    pub fn slot(&self, role: CoachRole) -> &CoachSlot {
        match role {
            CoachRole::HeadCoach => &self.head_coach,
            CoachRole::OffensiveCoordinator => &self.offensive_coordinator,
            CoachRole::InterimHeadCoach => &self.interim_head_coach,
            CoachRole::InterimOffensiveCoordinator => &self.interim_offensive_coordinator,
        }
    }

    /// Label of the form `HC: X (Interim: Y), OC: Z`.
    ///
    /// Empty primary slots are left out; an empty staff yields `-`.
    pub fn label(&self) -> String {
        let part = |prefix: &str, primary: &CoachSlot, interim: &CoachSlot| {
            if primary.is_empty() {
                return None;
            }
            let mut s = format!("{}: {}", prefix, primary.joined());
            if !interim.is_empty() {
                s.push_str(&format!(" (Interim: {})", interim.joined()));
            }
            Some(s)
        };
        let parts: Vec<String> = [
            part("HC", &self.head_coach, &self.interim_head_coach),
            part(
                "OC",
                &self.offensive_coordinator,
                &self.interim_offensive_coordinator,
            ),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            MISSING_COACH.to_string()
        } else {
            parts.join(NAME_SEPARATOR)
        }
    }
}

/// One season a coach spent in a role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CoachTenure {
    pub season: Season,
    pub team: String,
    pub role: CoachRole,
    pub play_calling: bool,
}

type SlotKey = (Season, String, CoachRole);

/// Index of coaching assignments by (season, team, role).
///
/// Team codes are expected to be canonical already (see
/// [`crate::storage::DataSet`]).
#[derive(Debug, Clone, Default)]
pub struct CoachDirectory {
    slots: BTreeMap<SlotKey, Vec<CoachAssignment>>,
}

impl CoachDirectory {
    pub fn new(assignments: &[CoachAssignment]) -> Self {
        let mut slots: BTreeMap<SlotKey, Vec<CoachAssignment>> = BTreeMap::new();
        for a in assignments {
            slots
                .entry((a.season, a.team_abbr.clone(), a.role))
                .or_default()
                .push(a.clone());
        }
        Self { slots }
    }

    fn assignments(&self, team: &str, season: Season, role: CoachRole) -> &[CoachAssignment] {
        self.slots
            .get(&(season, team.to_string(), role))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn names(assignments: &[CoachAssignment]) -> Vec<String> {
        let unique: BTreeSet<&str> = assignments.iter().map(|a| a.coach.as_str()).collect();
        unique.into_iter().map(str::to_string).collect()
    }

    /// Resolve one slot for a team-season.
    pub fn resolve(&self, team: &str, season: Season, role: CoachRole) -> CoachSlot {
        let mut names = Self::names(self.assignments(team, season, role));
        let mut via_play_caller = false;

        if names.is_empty() && role == CoachRole::OffensiveCoordinator {
            let play_callers: Vec<CoachAssignment> = self
                .assignments(team, season, CoachRole::HeadCoach)
                .iter()
                .filter(|a| a.play_calling)
                .cloned()
                .collect();
            names = Self::names(&play_callers);
            via_play_caller = !names.is_empty();
        }

        let replaced_mid_season = role
            .interim()
            .map(|interim| !self.assignments(team, season, interim).is_empty())
            .unwrap_or(false);

        CoachSlot {
            names,
            replaced_mid_season,
            via_play_caller,
        }
    }

    pub fn staff(&self, team: &str, season: Season) -> CoachingStaff {
        CoachingStaff {
            season,
            team: team.to_string(),
            head_coach: self.resolve(team, season, CoachRole::HeadCoach),
            offensive_coordinator: self.resolve(team, season, CoachRole::OffensiveCoordinator),
            interim_head_coach: self.resolve(team, season, CoachRole::InterimHeadCoach),
            interim_offensive_coordinator: self.resolve(
                team,
                season,
                CoachRole::InterimOffensiveCoordinator,
            ),
        }
    }

    pub fn coach_label(&self, team: &str, season: Season) -> String {
        self.staff(team, season).label()
    }

    /// Earliest season `coach` held `role` with `team`.
    ///
    /// A coordinator promoted to head coach is hired as head coach in the
    /// year of the promotion.
    pub fn hire_year(&self, coach: &str, team: &str, role: CoachRole) -> Option<Season> {
        self.slots
            .iter()
            .filter(|((_, t, r), _)| t == team && *r == role)
            .filter(|(_, assignments)| assignments.iter().any(|a| a.coach == coach))
            .map(|((season, _, _), _)| *season)
            .min()
    }

    /// Every season and role a coach held, ordered by season.
    pub fn coach_history(&self, coach: &str) -> Vec<CoachTenure> {
        let mut history: Vec<CoachTenure> = self
            .slots
            .values()
            .flatten()
            .filter(|a| a.coach == coach)
            .map(|a| CoachTenure {
                season: a.season,
                team: a.team_abbr.clone(),
                role: a.role,
                play_calling: a.play_calling,
            })
            .collect();
        history.sort();
        history.dedup();
        history
    }

    /// Most recent season with any assignment for `team`.
    pub fn latest_season(&self, team: &str) -> Option<Season> {
        self.slots
            .keys()
            .filter(|(_, t, _)| t == team)
            .map(|(season, _, _)| *season)
            .max()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
