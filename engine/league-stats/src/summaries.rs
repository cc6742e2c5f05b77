//! Weekly league summaries built from scored stats and scoreboards
//!
//! The two per-roster summaries treat a player without a score differently on
//! purpose. `bench_points` skips them (they add nothing to the total), while
//! `negative_starters` reads them as 0, so a starter with no data is never
//! reported as negative.

use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::error::StatsError;
use crate::models::{
    MatchupRecord, PlayerDirectory, PlayerId, RosterId, RosterRecord, WeekStats, EMPTY_SLOT,
};
use crate::roster::Lineup;
use crate::scoreboard::{MatchupEntry, Scoreboard, ScoreboardSide};
use crate::teams::{TeamDirectory, TeamName};

/// Per-roster results plus the rosters that had to be skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate<T> {
    pub entries: Vec<T>,
    pub errors: Vec<StatsError>,
}

impl<T> Default for Aggregate<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), errors: Vec::new() }
    }
}

/// Team holding the week's highest or lowest score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreLeader {
    pub roster_id: RosterId,
    pub team_name: TeamName,
    pub score: f64,
}

impl From<(&ScoreboardSide, f64)> for ScoreLeader {
    fn from((side, score): (&ScoreboardSide, f64)) -> Self {
        Self { roster_id: side.roster_id, team_name: side.team_name.clone(), score }
    }
}

/// Highest custom score on the board.
///
/// Sides without a score are skipped. On a tie the first side in scoreboard
/// order (matchup id ascending, team A before team B) is kept. `None` when no
/// side has a score.
pub fn highest_scorer(board: &Scoreboard) -> Option<ScoreLeader> {
    scan_scores(board, Ordering::Greater)
}

/// Lowest custom score on the board, with the same rules as `highest_scorer`
pub fn lowest_scorer(board: &Scoreboard) -> Option<ScoreLeader> {
    scan_scores(board, Ordering::Less)
}

fn scan_scores(board: &Scoreboard, wanted: Ordering) -> Option<ScoreLeader> {
    let mut best: Option<(&ScoreboardSide, f64)> = None;

    for side in board.sides() {
        let Some(score) = side.custom_score else { continue };
        match best {
            Some((_, current)) if score.total_cmp(&current) != wanted => {}
            _ => best = Some((side, score)),
        }
    }

    best.map(ScoreLeader::from)
}

/// Points a roster left on its bench
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchPoints {
    pub roster_id: RosterId,
    pub team_name: TeamName,
    pub points: f64,

    /// Bench players that had no score and were counted as 0
    pub unscored: Vec<PlayerId>,
}

/// Custom points scored by each roster's bench.
///
/// `week` must already be scored by the `ScoringEngine`. A bench player
/// without custom points is skipped rather than failing the roster. A roster
/// whose starters are not on its player list is reported in `errors`.
pub fn bench_points(
    matchups: &[MatchupRecord],
    week: &WeekStats,
    teams: &TeamDirectory,
) -> Aggregate<BenchPoints> {
    let mut result = Aggregate::default();

    for record in matchups {
        let lineup = match Lineup::from_matchup(record) {
            Ok(lineup) => lineup,
            Err(e) => {
                warn!("Skipping bench points for roster {}: {}", record.roster_id, e);
                result.errors.push(e);
                continue;
            }
        };

        let mut points = 0.0;
        let mut unscored = Vec::new();
        for player_id in &lineup.bench {
            match week.custom_points(player_id) {
                Some(score) => points += score,
                None => {
                    debug!(
                        "No score for bench player {} on roster {}",
                        player_id, record.roster_id
                    );
                    unscored.push(player_id.clone());
                }
            }
        }

        result.entries.push(BenchPoints {
            roster_id: record.roster_id,
            team_name: teams.team_name(record.roster_id),
            points,
            unscored,
        });
    }

    result
}

/// Bench with the most points; the first one listed wins a tie
pub fn highest_bench(benches: &[BenchPoints]) -> Option<&BenchPoints> {
    benches.iter().fold(None, |best, bench| match best {
        Some(current) if bench.points <= current.points => Some(current),
        _ => Some(bench),
    })
}

/// A starter who cost their team points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NegativeStarter {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Option<String>,
    pub points: f64,
}

/// Every negative starter on one roster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamNegatives {
    pub roster_id: RosterId,
    pub team_name: TeamName,
    pub players: Vec<NegativeStarter>,
}

/// Starters whose custom score went below zero, grouped by roster.
///
/// A starter with no score counts as 0 and is never listed. Rosters without a
/// negative starter are left out; the rest keep the order of `matchups`.
pub fn negative_starters(
    matchups: &[MatchupRecord],
    week: &WeekStats,
    teams: &TeamDirectory,
    players: &PlayerDirectory,
) -> Vec<TeamNegatives> {
    matchups
        .iter()
        .filter_map(|record| {
            let negatives: Vec<NegativeStarter> = record
                .starters
                .iter()
                .filter(|id| id.as_str() != EMPTY_SLOT)
                .filter_map(|id| {
                    let points = week.custom_points(id).unwrap_or(0.0);
                    (points < 0.0).then(|| NegativeStarter {
                        player_id: id.clone(),
                        name: players.display_name(id),
                        position: players.position(id).map(str::to_string),
                        points,
                    })
                })
                .collect();

            (!negatives.is_empty()).then(|| TeamNegatives {
                roster_id: record.roster_id,
                team_name: teams.team_name(record.roster_id),
                players: negatives,
            })
        })
        .collect()
}

/// A team's place in the league table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    /// 1-based
    pub rank: usize,
    pub roster_id: RosterId,
    pub team_name: TeamName,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
}

/// League table ordered by wins (desc), points-for (desc), team name (asc),
/// then roster id (asc), so equal records always rank the same way.
pub fn standings(rosters: &[RosterRecord], teams: &TeamDirectory) -> Vec<Standing> {
    let mut table: Vec<Standing> = rosters
        .iter()
        .map(|roster| Standing {
            rank: 0,
            roster_id: roster.roster_id,
            team_name: teams.team_name(roster.roster_id),
            wins: roster.settings.wins,
            losses: roster.settings.losses,
            ties: roster.settings.ties,
            points_for: roster.settings.points_for(),
        })
        .collect();

    table.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.points_for.total_cmp(&a.points_for))
            .then_with(|| a.team_name.as_str().cmp(b.team_name.as_str()))
            .then_with(|| a.roster_id.cmp(&b.roster_id))
    });

    for (i, standing) in table.iter_mut().enumerate() {
        standing.rank = i + 1;
    }

    table
}

/// Matchups decided by strictly less than `margin` custom points.
///
/// Matchups where either side has no score are left out.
pub fn close_games(board: &Scoreboard, margin: f64) -> Vec<&MatchupEntry> {
    board.entries.values().filter(|entry| entry.margin().is_some_and(|m| m < margin)).collect()
}
