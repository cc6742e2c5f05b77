//! Configuration for the Sleeper client

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://api.sleeper.app/v1";

/// Sleeper API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleeperClientConfig {
    pub api_base_url: String,

    /// League every league-scoped endpoint reads from
    pub league_id: String,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for SleeperClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            league_id: String::new(),
            timeout_secs: 30,
        }
    }
}

impl SleeperClientConfig {
    pub fn new(league_id: impl Into<String>) -> Self {
        Self { league_id: league_id.into(), ..Self::default() }
    }

    /// Full URL for an endpoint path such as `/state/nfl`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SleeperClientConfig::default();
        assert_eq!(config.api_base_url, "https://api.sleeper.app/v1");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.league_id.is_empty());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let mut config = SleeperClientConfig::new("42");
        assert_eq!(config.url("/state/nfl"), "https://api.sleeper.app/v1/state/nfl");

        config.api_base_url = "http://localhost:8080/v1/".to_string();
        assert_eq!(config.url("/league/42"), "http://localhost:8080/v1/league/42");
    }
}
