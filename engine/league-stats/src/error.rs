//! Error types for league statistics

use serde::Serialize;
use thiserror::Error;

use crate::models::{MatchupId, PlayerId, RosterId};

/// Data-integrity violations found while aggregating a league week.
///
/// Missing records (unknown players, owners, stat lines) are not errors; they
/// resolve to placeholders or `None`. These variants cover inputs that
/// contradict themselves and abort only the aggregate they were found in.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum StatsError {
    #[error("Roster {roster_id} starts player {player_id} who is not on the roster")]
    StarterNotOnRoster { roster_id: RosterId, player_id: PlayerId },

    #[error(
        "Matchup {matchup_id} has {} sides (rosters {roster_ids:?}), expected 2",
        .roster_ids.len()
    )]
    MatchupSideCount { matchup_id: MatchupId, roster_ids: Vec<RosterId> },
}
