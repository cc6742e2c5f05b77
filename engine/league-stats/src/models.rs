use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::scoring::CUSTOM_POINTS_KEY;

/// Sleeper player identifier (e.g. "4046", or a team code like "DEN" for defenses)
pub type PlayerId = String;

/// Roster slot within a league (1-based in Sleeper)
pub type RosterId = u32;

/// Identifier shared by the two roster records of one head-to-head matchup
pub type MatchupId = u32;

/// Sleeper fills unused starter slots with this id
pub const EMPTY_SLOT: &str = "0";

/// One player's stat totals for one week, keyed by stat name
///
/// Sleeper stat payloads are flat JSON objects. Values that are not numbers
/// are dropped on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>")]
pub struct StatLine(BTreeMap<String, f64>);

impl StatLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: &str) -> Option<f64> {
        self.0.get(stat).copied()
    }

    pub fn insert(&mut self, stat: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(stat.into(), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Custom points attached by the scoring engine, if it has run on this line
    pub fn custom_points(&self) -> Option<f64> {
        self.get(CUSTOM_POINTS_KEY)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, serde_json::Value>> for StatLine {
    fn from(raw: HashMap<String, serde_json::Value>) -> Self {
        Self(raw.into_iter().filter_map(|(k, v)| v.as_f64().map(|v| (k, v))).collect())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for StatLine {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A league's stat weights (`scoring_settings` on the league object)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>")]
pub struct ScoringSettings(BTreeMap<String, f64>);

impl ScoringSettings {
    pub fn weight(&self, stat: &str) -> Option<f64> {
        self.0.get(stat).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, serde_json::Value>> for ScoringSettings {
    fn from(raw: HashMap<String, serde_json::Value>) -> Self {
        Self(raw.into_iter().filter_map(|(k, v)| v.as_f64().map(|v| (k, v))).collect())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ScoringSettings {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Stat lines for every player with stats in one (season type, season, week)
///
/// Built fresh for every report and never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekStats(HashMap<PlayerId, StatLine>);

impl WeekStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player_id: &str) -> Option<&StatLine> {
        self.0.get(player_id)
    }

    pub fn get_mut(&mut self, player_id: &str) -> Option<&mut StatLine> {
        self.0.get_mut(player_id)
    }

    pub fn insert(&mut self, player_id: impl Into<PlayerId>, line: StatLine) -> Option<StatLine> {
        self.0.insert(player_id.into(), line)
    }

    pub(crate) fn lines_mut(&mut self) -> impl Iterator<Item = &mut StatLine> {
        self.0.values_mut()
    }

    /// Value of `stat` for a player; `None` when the player or the stat is absent
    pub fn points(&self, player_id: &str, stat: &str) -> Option<f64> {
        self.get(player_id).and_then(|line| line.get(stat))
    }

    pub fn custom_points(&self, player_id: &str) -> Option<f64> {
        self.points(player_id, CUSTOM_POINTS_KEY)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<PlayerId>> FromIterator<(S, StatLine)> for WeekStats {
    fn from_iter<I: IntoIterator<Item = (S, StatLine)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One roster's side of a weekly matchup (`/league/{id}/matchups/{week}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub roster_id: RosterId,

    /// `None` for rosters without an opponent (playoff byes, consolation weeks)
    #[serde(default)]
    pub matchup_id: Option<MatchupId>,

    /// Lineup in slot order; may contain `EMPTY_SLOT`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub starters: Vec<PlayerId>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub players: Vec<PlayerId>,

    /// Sleeper's own score for the side
    #[serde(default)]
    pub points: Option<f64>,
}

/// Season record stored on a roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterSettings {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub fpts: u32,
    pub fpts_decimal: u32,
}

impl RosterSettings {
    /// Season points-for (`fpts` holds the integer part, `fpts_decimal` the hundredths)
    pub fn points_for(&self) -> f64 {
        self.fpts as f64 + self.fpts_decimal as f64 / 100.0
    }
}

/// Roster ownership and season record (`/league/{id}/rosters`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub roster_id: RosterId,

    /// `None` for orphaned rosters
    #[serde(default)]
    pub owner_id: Option<String>,

    #[serde(default)]
    pub settings: RosterSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

/// League member (`/league/{id}/users`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueUser {
    pub user_id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub metadata: Option<UserMetadata>,
}

impl LeagueUser {
    /// Custom team name if the user set one, otherwise their display name
    pub fn team_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.team_name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.display_name.as_deref().filter(|name| !name.trim().is_empty()))
    }
}

/// Player directory entry (`/players/nfl`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub position: Option<String>,
}

impl PlayerInfo {
    pub fn full_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }
}

/// All players known to Sleeper, keyed by player id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerDirectory(HashMap<PlayerId, PlayerInfo>);

impl PlayerDirectory {
    pub fn get(&self, player_id: &str) -> Option<&PlayerInfo> {
        self.0.get(player_id)
    }

    pub fn insert(&mut self, player_id: impl Into<PlayerId>, info: PlayerInfo) {
        self.0.insert(player_id.into(), info);
    }

    /// "First Last", falling back to the raw id for players missing from the directory
    pub fn display_name(&self, player_id: &str) -> String {
        self.get(player_id).and_then(PlayerInfo::full_name).unwrap_or_else(|| player_id.to_string())
    }

    pub fn position(&self, player_id: &str) -> Option<&str> {
        self.get(player_id).and_then(|p| p.position.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<PlayerId>> FromIterator<(S, PlayerInfo)> for PlayerDirectory {
    fn from_iter<I: IntoIterator<Item = (S, PlayerInfo)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stat_line_drops_non_numeric_values() {
        let raw = json!({"pts_ppr": 20.5, "rec": 5, "note": "questionable", "gp": null});
        let line: StatLine = serde_json::from_value(raw).unwrap();

        assert_eq!(line.len(), 2);
        assert_eq!(line.get("pts_ppr"), Some(20.5));
        assert_eq!(line.get("rec"), Some(5.0));
        assert_eq!(line.get("note"), None);
    }

    #[test]
    fn test_matchup_record_tolerates_nulls() {
        let record: MatchupRecord = serde_json::from_value(json!({
            "roster_id": 3,
            "matchup_id": null,
            "starters": null,
            "players": ["4046", "6794"],
            "points": 0.0
        }))
        .unwrap();

        assert_eq!(record.roster_id, 3);
        assert_eq!(record.matchup_id, None);
        assert!(record.starters.is_empty());
        assert_eq!(record.players.len(), 2);
    }

    #[test]
    fn test_roster_points_for() {
        let roster: RosterRecord = serde_json::from_value(json!({
            "roster_id": 1,
            "owner_id": "738",
            "settings": {
                "wins": 5,
                "losses": 2,
                "fpts": 601,
                "fpts_decimal": 30,
                "waiver_position": 7
            }
        }))
        .unwrap();

        assert_eq!(roster.settings.wins, 5);
        assert_eq!(roster.settings.ties, 0);
        assert!((roster.settings.points_for() - 601.3).abs() < 1e-9);
    }

    #[test]
    fn test_user_team_name_falls_back_to_display_name() {
        let named: LeagueUser = serde_json::from_value(json!({
            "user_id": "1", "display_name": "dave", "metadata": {"team_name": "Waiver Wire Wizards"}
        }))
        .unwrap();
        assert_eq!(named.team_name(), Some("Waiver Wire Wizards"));

        let blank: LeagueUser = serde_json::from_value(json!({
            "user_id": "2", "display_name": "sam", "metadata": {"team_name": ""}
        }))
        .unwrap();
        assert_eq!(blank.team_name(), Some("sam"));

        let bare: LeagueUser = serde_json::from_value(json!({"user_id": "3"})).unwrap();
        assert_eq!(bare.team_name(), None);
    }

    #[test]
    fn test_player_directory_display_name() {
        let directory: PlayerDirectory = serde_json::from_value(json!({
            "4046": {"first_name": "Patrick", "last_name": "Mahomes", "position": "QB"},
            "DEN": {"first_name": "Denver", "last_name": "Broncos", "position": "DEF"}
        }))
        .unwrap();

        assert_eq!(directory.display_name("4046"), "Patrick Mahomes");
        assert_eq!(directory.position("DEN"), Some("DEF"));
        assert_eq!(directory.display_name("9999"), "9999");
    }
}
