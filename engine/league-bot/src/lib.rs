//! League Bot
//!
//! Pulls a Sleeper league's matchups, rosters and weekly stats, scores them
//! with the league's own settings and posts reports to Discord on a weekly
//! schedule.

pub mod calendar;
pub mod config;
pub mod discord;
pub mod format;
pub mod logging;
pub mod reports;
pub mod scheduler;
pub mod signals;
pub mod transactions;

pub use config::{load_config, BotConfig, ReportKind};
pub use discord::{ChatSink, DiscordWebhook, StdoutSink};
pub use logging::initialize_logging;
pub use reports::Reports;
pub use scheduler::{run_report, Scheduler};
pub use signals::{graceful_shutdown, setup_signal_handlers};
