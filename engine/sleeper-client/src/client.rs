//! HTTP implementation of the provider traits

use league_stats::{
    LeagueUser, MatchupRecord, PlayerDirectory, RosterRecord, ScoringSettings, WeekStats,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::SleeperClientConfig;
use crate::error::SleeperError;
use crate::models::{League, NflState, Transaction};
use crate::provider::{LeagueProvider, PlayerProvider, StatsProvider};
use crate::Result;

/// Sleeper API client
#[derive(Debug, Clone)]
pub struct SleeperClient {
    config: SleeperClientConfig,
    client: Client,
}

impl SleeperClient {
    /// Create a new Sleeper API client
    pub fn new(config: SleeperClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SleeperClientConfig {
        &self.config
    }

    pub fn league_path(&self, suffix: &str) -> String {
        format!("/league/{}{}", self.config.league_id, suffix)
    }

    /// Get the league object
    pub async fn league(&self) -> Result<League> {
        self.get_json(&self.league_path("")).await
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.config.url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Sleeper API returned {} for {}", status, path);
            return Err(SleeperError::Api {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.get_bytes(path).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Decodes a stats body. Sleeper answers `null` for weeks that have not been played.
pub fn decode_week_stats(body: &[u8]) -> Result<WeekStats> {
    let stats: Option<WeekStats> = serde_json::from_slice(body)?;
    Ok(stats.unwrap_or_default())
}

#[async_trait::async_trait]
impl StatsProvider for SleeperClient {
    async fn week_stats(&self, season_type: &str, season: i32, week: u32) -> Result<WeekStats> {
        let path = format!("/stats/nfl/{}/{}/{}", season_type, season, week);
        let stats = decode_week_stats(&self.get_bytes(&path).await?)?;

        debug!(
            "Fetched stats for {} players ({} {} week {})",
            stats.len(),
            season_type,
            season,
            week
        );
        Ok(stats)
    }
}

#[async_trait::async_trait]
impl LeagueProvider for SleeperClient {
    async fn matchups(&self, week: u32) -> Result<Vec<MatchupRecord>> {
        let matchups: Option<Vec<MatchupRecord>> =
            self.get_json(&self.league_path(&format!("/matchups/{}", week))).await?;
        Ok(matchups.unwrap_or_default())
    }

    async fn users(&self) -> Result<Vec<LeagueUser>> {
        self.get_json(&self.league_path("/users")).await
    }

    async fn rosters(&self) -> Result<Vec<RosterRecord>> {
        self.get_json(&self.league_path("/rosters")).await
    }

    async fn scoring_settings(&self) -> Result<ScoringSettings> {
        Ok(self.league().await?.scoring_settings)
    }

    async fn transactions(&self, week: u32) -> Result<Vec<Transaction>> {
        let transactions: Option<Vec<Transaction>> =
            self.get_json(&self.league_path(&format!("/transactions/{}", week))).await?;
        Ok(transactions.unwrap_or_default())
    }

    async fn nfl_state(&self) -> Result<NflState> {
        self.get_json("/state/nfl").await
    }
}

#[async_trait::async_trait]
impl PlayerProvider for SleeperClient {
    async fn all_players(&self) -> Result<PlayerDirectory> {
        let players: PlayerDirectory = self.get_json("/players/nfl").await?;

        info!("Loaded {} players from the Sleeper directory", players.len());
        Ok(players)
    }
}
