//! Bot configuration management

use anyhow::{bail, Context, Result};
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use sleeper_client::config::DEFAULT_API_BASE_URL;
use sleeper_client::SleeperClientConfig;
use std::fmt;
use std::path::Path;

/// Reports the bot knows how to post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Matchups,
    Scores,
    CloseGames,
    Standings,
    Highlights,
    Transactions,
    Welcome,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Matchups => "matchups",
            ReportKind::Scores => "scores",
            ReportKind::CloseGames => "close-games",
            ReportKind::Standings => "standings",
            ReportKind::Highlights => "highlights",
            ReportKind::Transactions => "transactions",
            ReportKind::Welcome => "welcome",
        };
        f.write_str(name)
    }
}

/// Main bot configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub sleeper: SleeperSettings,
    pub league: LeagueSettings,
    pub discord: DiscordSettings,
    pub schedule: ScheduleSettings,
    pub logging: LoggingConfig,
}

/// Sleeper API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleeperSettings {
    pub api_base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// League the bot reports on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueSettings {
    pub league_id: String,

    /// Matchups decided by less than this many points are close games
    pub close_game_margin: f64,

    /// Number of teams above the playoff line in the standings
    pub playoff_teams: u32,

    /// Sleeper season type used for stats ("regular", "post")
    pub season_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordSettings {
    pub webhook_url: Option<String>,
}

/// One weekly report slot (times are UTC)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSlot {
    pub report: ReportKind,
    pub weekday: Weekday,

    /// "HH:MM"
    pub time: String,
}

impl ReportSlot {
    pub fn new(report: ReportKind, weekday: Weekday, time: &str) -> Self {
        Self { report, weekday, time: time.to_string() }
    }

    pub fn time_of_day(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.time, "%H:%M")
            .with_context(|| format!("Invalid time for {} report: {}", self.report, self.time))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    pub slots: Vec<ReportSlot>,

    /// How often recent transactions are checked
    pub transaction_poll_secs: u64,

    /// How far back a transaction may be and still be announced
    pub transaction_window_secs: u64,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for SleeperSettings {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_string(), timeout_secs: 30 }
    }
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            league_id: String::new(),
            close_game_margin: 20.0,
            playoff_teams: 6,
            season_type: "regular".to_string(),
        }
    }
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            slots: vec![
                ReportSlot::new(ReportKind::Matchups, Weekday::Thu, "19:00"),
                ReportSlot::new(ReportKind::Scores, Weekday::Fri, "12:00"),
                ReportSlot::new(ReportKind::CloseGames, Weekday::Sun, "23:00"),
                ReportSlot::new(ReportKind::Scores, Weekday::Mon, "12:00"),
                ReportSlot::new(ReportKind::Standings, Weekday::Tue, "15:00"),
                ReportSlot::new(ReportKind::Highlights, Weekday::Tue, "15:01"),
            ],
            transaction_poll_secs: 60,
            transaction_window_secs: 60,
            shutdown_timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl BotConfig {
    /// Client settings for the configured league
    pub fn client_config(&self) -> SleeperClientConfig {
        SleeperClientConfig {
            api_base_url: self.sleeper.api_base_url.clone(),
            league_id: self.league.league_id.clone(),
            timeout_secs: self.sleeper.timeout_secs,
        }
    }

    /// Validate configuration. A webhook is only required when posting to Discord.
    pub fn validate(&self, dry_run: bool) -> Result<()> {
        if self.league.league_id.trim().is_empty() {
            bail!("LEAGUE_ID is not set");
        }

        let has_webhook =
            self.discord.webhook_url.as_deref().is_some_and(|url| !url.trim().is_empty());
        if !dry_run && !has_webhook {
            bail!("DISCORD_WEBHOOK is not set (use --dry-run to print reports instead)");
        }

        if self.league.playoff_teams == 0 {
            bail!("Number of playoff teams must be positive");
        }

        let margin = self.league.close_game_margin;
        if margin.is_nan() || margin <= 0.0 {
            bail!("Invalid close game margin: {}", margin);
        }

        if self.schedule.transaction_poll_secs == 0 {
            bail!("Transaction poll interval must be positive");
        }

        for slot in &self.schedule.slots {
            slot.time_of_day()?;
        }

        // Validate log level
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => bail!("Invalid log level: {}", self.logging.level),
        }

        // Validate log format
        match self.logging.format.as_str() {
            "json" | "pretty" | "compact" => {}
            _ => bail!("Invalid log format: {}", self.logging.format),
        }

        Ok(())
    }
}

/// Load configuration from defaults, an optional TOML file, `.env` and the environment
pub fn load_config(path: Option<&Path>, dry_run: bool) -> Result<BotConfig> {
    let mut config = match path {
        Some(path) => load_from_file(path)?,
        None => BotConfig::default(),
    };

    dotenv::dotenv().ok();
    apply_env(&mut config, |key| std::env::var(key).ok())?;

    config.validate(dry_run)?;
    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path) -> Result<BotConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Override configuration with environment variables read through `lookup`
pub fn apply_env<F>(config: &mut BotConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(league_id) = lookup("LEAGUE_ID") {
        config.league.league_id = league_id;
    }

    if let Some(webhook) = lookup("DISCORD_WEBHOOK") {
        config.discord.webhook_url = Some(webhook);
    }

    if let Some(margin) = lookup("CLOSE_NUM") {
        config.league.close_game_margin =
            margin.trim().parse().with_context(|| format!("Invalid CLOSE_NUM: {}", margin))?;
    }

    if let Some(teams) = lookup("NUMBER_OF_PLAYOFF_TEAMS") {
        config.league.playoff_teams = teams
            .trim()
            .parse()
            .with_context(|| format!("Invalid NUMBER_OF_PLAYOFF_TEAMS: {}", teams))?;
    }

    if let Some(url) = lookup("SLEEPER_API_URL") {
        config.sleeper.api_base_url = url;
    }

    if let Some(level) = lookup("BOT_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(format) = lookup("BOT_LOG_FORMAT") {
        config.logging.format = format;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    fn valid() -> BotConfig {
        let mut config = BotConfig::default();
        config.league.league_id = "784".to_string();
        config.discord.webhook_url = Some("https://discord.com/api/webhooks/1/abc".to_string());
        config
    }

    #[test]
    fn test_default_schedule() {
        let config = BotConfig::default();
        let slots: Vec<(ReportKind, Weekday, &str)> =
            config.schedule.slots.iter().map(|s| (s.report, s.weekday, s.time.as_str())).collect();

        assert_eq!(
            slots,
            vec![
                (ReportKind::Matchups, Weekday::Thu, "19:00"),
                (ReportKind::Scores, Weekday::Fri, "12:00"),
                (ReportKind::CloseGames, Weekday::Sun, "23:00"),
                (ReportKind::Scores, Weekday::Mon, "12:00"),
                (ReportKind::Standings, Weekday::Tue, "15:00"),
                (ReportKind::Highlights, Weekday::Tue, "15:01"),
            ]
        );
        assert_eq!(config.schedule.transaction_poll_secs, 60);
        assert_eq!(config.league.close_game_margin, 20.0);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = BotConfig::default();
        apply_env(
            &mut config,
            env(&[
                ("LEAGUE_ID", "1234"),
                ("DISCORD_WEBHOOK", "https://hook"),
                ("CLOSE_NUM", "12.5"),
                ("NUMBER_OF_PLAYOFF_TEAMS", "4"),
                ("BOT_LOG_FORMAT", "json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.league.league_id, "1234");
        assert_eq!(config.discord.webhook_url.as_deref(), Some("https://hook"));
        assert_eq!(config.league.close_game_margin, 12.5);
        assert_eq!(config.league.playoff_teams, 4);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_bad_env_number_is_an_error() {
        let mut config = BotConfig::default();
        let err = apply_env(&mut config, env(&[("NUMBER_OF_PLAYOFF_TEAMS", "six")])).unwrap_err();
        assert!(err.to_string().contains("NUMBER_OF_PLAYOFF_TEAMS"));
    }

    #[test]
    fn test_validate() {
        assert!(valid().validate(false).is_ok());

        let mut config = valid();
        config.league.league_id.clear();
        assert!(config.validate(true).is_err());

        let mut config = valid();
        config.discord.webhook_url = None;
        assert!(config.validate(false).is_err());
        assert!(config.validate(true).is_ok());

        let mut config = valid();
        config.league.playoff_teams = 0;
        assert!(config.validate(false).is_err());

        let mut config = valid();
        config.league.close_game_margin = 0.0;
        assert!(config.validate(false).is_err());

        let mut config = valid();
        config.logging.level = "loud".to_string();
        assert!(config.validate(false).is_err());

        let mut config = valid();
        config.logging.format = "xml".to_string();
        assert!(config.validate(false).is_err());

        let mut config = valid();
        config.schedule.slots.push(ReportSlot::new(ReportKind::Scores, Weekday::Wed, "25:99"));
        assert!(config.validate(false).is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: BotConfig = toml::from_str(
            r#"
            [league]
            league_id = "999"
            playoff_teams = 4

            [[schedule.slots]]
            report = "close-games"
            weekday = "Sun"
            time = "22:30"
            "#,
        )
        .unwrap();

        assert_eq!(config.league.league_id, "999");
        assert_eq!(config.league.playoff_teams, 4);
        assert_eq!(config.league.season_type, "regular");
        assert_eq!(
            config.schedule.slots,
            vec![ReportSlot::new(ReportKind::CloseGames, Weekday::Sun, "22:30")]
        );
        assert_eq!(config.schedule.transaction_poll_secs, 60);
        assert_eq!(config.sleeper.api_base_url, "https://api.sleeper.app/v1");
    }

    #[test]
    fn test_client_config() {
        let config = valid();
        let client = config.client_config();
        assert_eq!(client.league_id, "784");
        assert_eq!(client.timeout_secs, 30);
    }

    #[test]
    fn test_report_kind_names() {
        assert_eq!(ReportKind::CloseGames.to_string(), "close-games");
        assert_eq!(serde_json::to_string(&ReportKind::CloseGames).unwrap(), "\"close-games\"");
    }
}
