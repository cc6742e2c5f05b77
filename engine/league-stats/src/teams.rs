use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::models::{LeagueUser, RosterId, RosterRecord};

/// Shown for rosters with no owner
pub const OWNER_UNKNOWN: &str = "Team name not available";

/// Shown for owners with no user record or no usable name
pub const NAME_UNKNOWN: &str = "Unknown team";

/// Resolved name of a roster's team
///
/// The two unknown states are kept apart: an orphaned roster is not the same
/// failure as an owner whose user record is missing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TeamName {
    Named(String),
    OwnerUnknown,
    NameUnknown,
}

impl TeamName {
    pub fn as_str(&self) -> &str {
        match self {
            TeamName::Named(name) => name,
            TeamName::OwnerUnknown => OWNER_UNKNOWN,
            TeamName::NameUnknown => NAME_UNKNOWN,
        }
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roster id → owner id → team name lookups for one league
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    owners: HashMap<RosterId, Option<String>>,
    names: HashMap<String, String>,
}

impl TeamDirectory {
    pub fn new(rosters: &[RosterRecord], users: &[LeagueUser]) -> Self {
        let owners = rosters.iter().map(|r| (r.roster_id, r.owner_id.clone())).collect();
        let names = users
            .iter()
            .filter_map(|u| u.team_name().map(|name| (u.user_id.clone(), name.to_string())))
            .collect();

        Self { owners, names }
    }

    pub fn owner_of(&self, roster_id: RosterId) -> Option<&str> {
        self.owners.get(&roster_id).and_then(|owner| owner.as_deref())
    }

    /// Never fails: unknown rosters and orphaned rosters both resolve to `OwnerUnknown`
    pub fn team_name(&self, roster_id: RosterId) -> TeamName {
        match self.owner_of(roster_id) {
            None => TeamName::OwnerUnknown,
            Some(owner_id) => match self.names.get(owner_id) {
                Some(name) => TeamName::Named(name.clone()),
                None => TeamName::NameUnknown,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RosterSettings, UserMetadata};

    fn roster(roster_id: RosterId, owner: Option<&str>) -> RosterRecord {
        RosterRecord {
            roster_id,
            owner_id: owner.map(str::to_string),
            settings: RosterSettings::default(),
        }
    }

    fn user(user_id: &str, display: &str, team: Option<&str>) -> LeagueUser {
        LeagueUser {
            user_id: user_id.to_string(),
            display_name: Some(display.to_string()),
            metadata: Some(UserMetadata { team_name: team.map(str::to_string) }),
        }
    }

    #[test]
    fn test_team_name_resolution() {
        let directory = TeamDirectory::new(
            &[
                roster(1, Some("u1")),
                roster(2, Some("u2")),
                roster(3, None),
                roster(4, Some("ghost")),
            ],
            &[user("u1", "dave", Some("Gridiron Goblins")), user("u2", "sam", None)],
        );

        assert_eq!(directory.team_name(1), TeamName::Named("Gridiron Goblins".to_string()));
        assert_eq!(directory.team_name(2), TeamName::Named("sam".to_string()));
        assert_eq!(directory.team_name(3), TeamName::OwnerUnknown);
        assert_eq!(directory.team_name(4), TeamName::NameUnknown);
        assert_eq!(directory.team_name(99), TeamName::OwnerUnknown);
    }

    #[test]
    fn test_placeholders_display() {
        assert_eq!(TeamName::OwnerUnknown.to_string(), "Team name not available");
        assert_eq!(TeamName::NameUnknown.to_string(), "Unknown team");
    }
}
