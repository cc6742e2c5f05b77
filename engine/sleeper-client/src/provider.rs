//! Data sources the report pipelines read from

use league_stats::{
    LeagueUser, MatchupRecord, PlayerDirectory, RosterRecord, ScoringSettings, WeekStats,
};

use crate::models::{NflState, Transaction};
use crate::Result;

/// Per-player stat lines for one week
#[async_trait::async_trait]
pub trait StatsProvider: Send + Sync {
    /// Stats for `season_type` ("regular", "post", ...) of `season`, week `week`.
    /// A week without stats yet is an empty `WeekStats`, not an error.
    async fn week_stats(&self, season_type: &str, season: i32, week: u32) -> Result<WeekStats>;
}

/// League-scoped data for the configured league
#[async_trait::async_trait]
pub trait LeagueProvider: Send + Sync {
    async fn matchups(&self, week: u32) -> Result<Vec<MatchupRecord>>;

    async fn users(&self) -> Result<Vec<LeagueUser>>;

    async fn rosters(&self) -> Result<Vec<RosterRecord>>;

    async fn scoring_settings(&self) -> Result<ScoringSettings>;

    async fn transactions(&self, week: u32) -> Result<Vec<Transaction>>;

    async fn nfl_state(&self) -> Result<NflState>;
}

/// The full NFL player directory
#[async_trait::async_trait]
pub trait PlayerProvider: Send + Sync {
    async fn all_players(&self) -> Result<PlayerDirectory>;
}
