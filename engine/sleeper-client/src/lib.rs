//! Sleeper API client
//!
//! Typed access to the Sleeper REST endpoints the league bot reads from. The
//! provider traits in [`provider`] are what the report pipelines depend on;
//! [`SleeperClient`] is the HTTP implementation.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;

pub use client::SleeperClient;
pub use config::SleeperClientConfig;
pub use error::SleeperError;
pub use models::{League, NflState, Transaction, TransactionKind, TransactionSettings};
pub use provider::{LeagueProvider, PlayerProvider, StatsProvider};

// Result type alias
pub type Result<T> = std::result::Result<T, SleeperError>;
