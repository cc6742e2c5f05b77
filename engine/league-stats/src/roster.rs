use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::StatsError;
use crate::models::{MatchupRecord, PlayerId, RosterId, EMPTY_SLOT};
use crate::Result;

/// A roster split into its active lineup and its bench for one week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lineup {
    pub roster_id: RosterId,

    /// Starters in slot order (QB, RB, WR, ...)
    pub starters: Vec<PlayerId>,

    pub bench: BTreeSet<PlayerId>,
}

impl Lineup {
    /// Classifies the lineup carried by a matchup record
    pub fn from_matchup(record: &MatchupRecord) -> Result<Self> {
        classify(record.roster_id, &record.players, &record.starters)
    }
}

/// Splits `all_players` into starters and bench.
///
/// Starters keep the order of `starter_ids`, skipping empty slots. The bench is
/// every remaining player. A starter missing from `all_players` means the two
/// lists disagree and is reported as `StarterNotOnRoster`.
pub fn classify(
    roster_id: RosterId,
    all_players: &[PlayerId],
    starter_ids: &[PlayerId],
) -> Result<Lineup> {
    let all: BTreeSet<&PlayerId> = all_players.iter().collect();

    let mut starters = Vec::with_capacity(starter_ids.len());
    for starter in starter_ids.iter().filter(|id| id.as_str() != EMPTY_SLOT) {
        if !all.contains(starter) {
            return Err(StatsError::StarterNotOnRoster {
                roster_id,
                player_id: starter.clone(),
            });
        }
        starters.push(starter.clone());
    }

    let started: BTreeSet<&PlayerId> = starters.iter().collect();
    let bench = all.into_iter().filter(|id| !started.contains(id)).cloned().collect();

    Ok(Lineup { roster_id, starters, bench })
}
