//! League Stats
//!
//! Pure transformations over Sleeper league data: custom scoring from a
//! league's stat weights, starter/bench partitioning, weekly scoreboards and
//! the summaries built on top of them (top and bottom scorers, bench points,
//! negative starters, standings, close games).
//!
//! Nothing here performs I/O or caches between calls. Inputs are the decoded
//! API payloads, outputs are owned snapshots that hold no references back
//! into the inputs.

pub mod error;
pub mod models;
pub mod roster;
pub mod scoreboard;
pub mod scoring;
pub mod summaries;
pub mod teams;

pub use error::StatsError;
pub use models::*;
pub use roster::{classify, Lineup};
pub use scoreboard::{MatchupAggregator, MatchupEntry, Scoreboard, ScoreboardSide, UnpairedSide};
pub use scoring::{ScoringEngine, CUSTOM_POINTS_KEY};
pub use summaries::{
    bench_points, close_games, highest_bench, highest_scorer, lowest_scorer, negative_starters,
    standings, Aggregate, BenchPoints, NegativeStarter, ScoreLeader, Standing, TeamNegatives,
};
pub use teams::{TeamDirectory, TeamName};

/// Result type alias
pub type Result<T> = std::result::Result<T, StatsError>;
