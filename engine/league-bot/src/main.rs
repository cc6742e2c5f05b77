//! League Bot service entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use league_bot::{
    graceful_shutdown, initialize_logging, load_config, setup_signal_handlers, ChatSink,
    DiscordWebhook, ReportKind, Reports, Scheduler, StdoutSink,
};
use sleeper_client::SleeperClient;

#[derive(Parser)]
#[command(name = "league-bot")]
#[command(about = "Posts weekly Sleeper fantasy league reports to Discord")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print reports to stdout instead of posting them
    #[arg(long)]
    dry_run: bool,

    /// Render a single report now and exit
    #[arg(long, value_enum)]
    once: Option<ReportKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config =
        load_config(cli.config.as_deref(), cli.dry_run).context("Failed to load configuration")?;
    initialize_logging(&config.logging)?;

    info!(
        "Starting League Bot v{} for league {}",
        env!("CARGO_PKG_VERSION"),
        config.league.league_id
    );

    let client = SleeperClient::new(config.client_config())
        .context("Failed to create Sleeper client")?;
    let client = Arc::new(client);
    let reports = Arc::new(Reports::new(client, &config));

    let sink: Arc<dyn ChatSink> = match (&config.discord.webhook_url, cli.dry_run) {
        (Some(url), false) => Arc::new(DiscordWebhook::new(url.clone())?),
        _ => Arc::new(StdoutSink),
    };

    if let Some(kind) = cli.once {
        let sent = reports.publish(kind, sink.as_ref(), chrono::Utc::now()).await?;
        info!("{} report produced {} message(s)", kind, sent);
        return Ok(());
    }

    let shutdown_signal = setup_signal_handlers()?;
    let handles = Scheduler::new(reports, sink, config.schedule.clone()).start()?;

    info!("League Bot is running. Press Ctrl+C to shutdown gracefully.");
    let _ = shutdown_signal.await;

    info!("Shutdown signal received. Initiating graceful shutdown...");
    graceful_shutdown(handles, Duration::from_secs(config.schedule.shutdown_timeout_secs)).await;

    info!("League Bot shutdown complete");
    Ok(())
}
