use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::StatsError;
use crate::models::{MatchupId, MatchupRecord, PlayerId, RosterId, WeekStats, EMPTY_SLOT};
use crate::teams::{TeamDirectory, TeamName};

/// One team's line on the weekly scoreboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreboardSide {
    pub roster_id: RosterId,
    pub team_name: TeamName,

    /// Sum of the starters' scores under the aggregator's score key;
    /// `None` when no starter has a score yet
    pub custom_score: Option<f64>,

    /// Sleeper's own score for the side
    pub standard_score: Option<f64>,
}

/// A complete head-to-head pairing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupEntry {
    pub matchup_id: MatchupId,
    pub team_a: ScoreboardSide,
    pub team_b: ScoreboardSide,
}

impl MatchupEntry {
    pub fn sides(&self) -> [&ScoreboardSide; 2] {
        [&self.team_a, &self.team_b]
    }

    /// Absolute custom-score margin, when both sides have a score
    pub fn margin(&self) -> Option<f64> {
        match (self.team_a.custom_score, self.team_b.custom_score) {
            (Some(a), Some(b)) => Some((a - b).abs()),
            _ => None,
        }
    }
}

/// A side that could not be paired: bye weeks, or an opponent missing from the feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnpairedSide {
    pub matchup_id: Option<MatchupId>,
    pub side: ScoreboardSide,
}

/// Weekly scoreboard for a league
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scoreboard {
    /// Complete matchups ordered by matchup id
    pub entries: BTreeMap<MatchupId, MatchupEntry>,

    pub unpaired: Vec<UnpairedSide>,

    /// Matchups dropped because their records contradict each other
    pub errors: Vec<StatsError>,
}

impl Scoreboard {
    /// Every paired side in scoreboard order: matchup id ascending, team A before team B
    pub fn sides(&self) -> impl Iterator<Item = &ScoreboardSide> {
        self.entries.values().flat_map(|entry| entry.sides())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds scoreboards from raw matchup records and a scored week
pub struct MatchupAggregator<'a> {
    teams: &'a TeamDirectory,
    score_key: String,
}

impl<'a> MatchupAggregator<'a> {
    pub fn new(teams: &'a TeamDirectory, score_key: impl Into<String>) -> Self {
        Self { teams, score_key: score_key.into() }
    }

    /// Sum of the starters' `score_key` values, skipping starters without one.
    /// `None` when not a single starter has a value.
    pub fn team_score(&self, starters: &[PlayerId], week: &WeekStats) -> Option<f64> {
        starters
            .iter()
            .filter(|id| id.as_str() != EMPTY_SLOT)
            .filter_map(|id| week.points(id, &self.score_key))
            .fold(None, |total, points| Some(total.unwrap_or(0.0) + points))
    }

    pub fn side(&self, record: &MatchupRecord, week: &WeekStats) -> ScoreboardSide {
        ScoreboardSide {
            roster_id: record.roster_id,
            team_name: self.teams.team_name(record.roster_id),
            custom_score: self.team_score(&record.starters, week),
            standard_score: record.points,
        }
    }

    /// Pairs matchup records by matchup id.
    ///
    /// Sides keep the order they appear in `matchups`. Lone sides land in
    /// `unpaired`; a matchup with more than two sides is reported in `errors`
    /// and left off the board.
    pub fn build(&self, matchups: &[MatchupRecord], week: &WeekStats) -> Scoreboard {
        let mut board = Scoreboard::default();
        let mut groups: BTreeMap<MatchupId, Vec<&MatchupRecord>> = BTreeMap::new();

        for record in matchups {
            match record.matchup_id {
                Some(matchup_id) => groups.entry(matchup_id).or_default().push(record),
                None => {
                    debug!("Roster {} has no matchup this week", record.roster_id);
                    let side = self.side(record, week);
                    board.unpaired.push(UnpairedSide { matchup_id: None, side });
                }
            }
        }

        for (matchup_id, records) in groups {
            match records.as_slice() {
                [a, b] => {
                    let entry = MatchupEntry {
                        matchup_id,
                        team_a: self.side(a, week),
                        team_b: self.side(b, week),
                    };
                    board.entries.insert(matchup_id, entry);
                }
                [lone] => {
                    warn!("Matchup {} has a single side (roster {})", matchup_id, lone.roster_id);
                    let side = self.side(lone, week);
                    board.unpaired.push(UnpairedSide { matchup_id: Some(matchup_id), side });
                }
                _ => {
                    let roster_ids: Vec<RosterId> = records.iter().map(|r| r.roster_id).collect();
                    warn!(
                        "Matchup {} has {} sides: {:?}",
                        matchup_id,
                        roster_ids.len(),
                        roster_ids
                    );
                    board.errors.push(StatsError::MatchupSideCount { matchup_id, roster_ids });
                }
            }
        }

        board
    }
}
