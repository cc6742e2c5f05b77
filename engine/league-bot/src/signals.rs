//! Signal handling for graceful shutdown

use anyhow::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{error, info, warn};

type ShutdownSender = Arc<Mutex<Option<oneshot::Sender<()>>>>;

fn notify(sender: &ShutdownSender) {
    if let Ok(mut slot) = sender.lock() {
        if let Some(tx) = slot.take() {
            let _ = tx.send(());
        }
    }
}

/// Setup signal handlers for graceful shutdown. The receiver fires on the first
/// Ctrl+C or SIGTERM.
pub fn setup_signal_handlers() -> Result<oneshot::Receiver<()>> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let shutdown_tx: ShutdownSender = Arc::new(Mutex::new(Some(shutdown_tx)));

    // Handle Ctrl+C (SIGINT)
    {
        let shutdown_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C signal: {}", e);
                return;
            }

            info!("Ctrl+C signal received");
            notify(&shutdown_tx);
        });
    }

    // Handle SIGTERM (Unix only)
    #[cfg(unix)]
    {
        use signal_hook::consts::SIGTERM;
        use std::sync::atomic::{AtomicBool, Ordering};

        let shutdown_flag = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(SIGTERM, shutdown_flag.clone())?;

        tokio::spawn(async move {
            loop {
                if shutdown_flag.load(Ordering::Relaxed) {
                    info!("SIGTERM signal received");
                    notify(&shutdown_tx);
                    break;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        });
    }

    Ok(shutdown_rx)
}

/// Stops the scheduler tasks, waiting up to `shutdown_timeout` for each to finish
pub async fn graceful_shutdown(handles: Vec<(String, JoinHandle<()>)>, shutdown_timeout: Duration) {
    info!("Starting graceful shutdown...");

    for (name, handle) in handles {
        handle.abort();
        match timeout(shutdown_timeout, handle).await {
            Ok(Ok(())) => info!("{} task stopped", name),
            Ok(Err(e)) if e.is_cancelled() => info!("{} task cancelled", name),
            Ok(Err(e)) => error!("{} task failed: {}", name, e),
            Err(_) => warn!("{} task did not stop within timeout", name),
        }
    }

    info!("Graceful shutdown complete");
}
