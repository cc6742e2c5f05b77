//! Sleeper response types not covered by `league-stats`

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use league_stats::{PlayerId, RosterId, ScoringSettings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// NFL calendar state (`/state/nfl`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NflState {
    /// Sleeper's own notion of the current week
    #[serde(default)]
    pub week: u32,

    /// "pre", "regular", "post" or "off"
    pub season_type: String,

    pub season: String,

    /// "YYYY-MM-DD"; absent during parts of the offseason
    #[serde(default)]
    pub season_start_date: Option<String>,
}

impl NflState {
    /// Kickoff date of the regular season, if Sleeper published a parseable one
    pub fn season_start(&self) -> Option<NaiveDate> {
        self.season_start_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
    }

    /// Year the season started in; falls back to the `season` field
    pub fn season_year(&self) -> Option<i32> {
        self.season_start().map(|date| date.year()).or_else(|| self.season.parse().ok())
    }
}

/// League object (`/league/{id}`); only the fields the bot reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub league_id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub scoring_settings: ScoringSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Waiver,
    FreeAgent,
    Trade,
    Commissioner,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionSettings {
    /// FAAB spent on a waiver claim
    #[serde(default)]
    pub waiver_bid: Option<u32>,
}

/// Roster move (`/league/{id}/transactions/{week}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// "complete", "failed" or "pending"
    pub status: String,

    /// Creation time in milliseconds since the epoch
    pub created: i64,

    #[serde(default)]
    pub roster_ids: Vec<RosterId>,

    /// Player id → receiving roster
    #[serde(default)]
    pub adds: Option<HashMap<PlayerId, RosterId>>,

    /// Player id → releasing roster
    #[serde(default)]
    pub drops: Option<HashMap<PlayerId, RosterId>>,

    #[serde(default)]
    pub settings: Option<TransactionSettings>,
}

impl Transaction {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created).single()
    }

    pub fn is_complete(&self) -> bool {
        self.status == "complete"
    }

    pub fn waiver_bid(&self) -> Option<u32> {
        self.settings.as_ref().and_then(|s| s.waiver_bid)
    }

    /// Added player ids, sorted for stable output
    pub fn added(&self) -> Vec<&PlayerId> {
        sorted_keys(self.adds.as_ref())
    }

    /// Dropped player ids, sorted for stable output
    pub fn dropped(&self) -> Vec<&PlayerId> {
        sorted_keys(self.drops.as_ref())
    }
}

fn sorted_keys(map: Option<&HashMap<PlayerId, RosterId>>) -> Vec<&PlayerId> {
    let mut keys: Vec<&PlayerId> = map.map(|m| m.keys().collect()).unwrap_or_default();
    keys.sort();
    keys
}
