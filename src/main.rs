//! Query Cache - An in-process query result cache
//!
//! Runs a cache behind a line-oriented shell on stdin/stdout.

use std::time::Duration;

use anyhow::Context as _;
use tokio::io::{self, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use query_cache::{destroy_context, shell, spawn_cleanup_task, CacheConfig, CacheContext};

/// Grace period given to blocking tasks when the runtime shuts down.
///
/// A stdin read parked on the blocking pool only finishes when a line or
/// EOF arrives, so it is abandoned after this long.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Main entry point for the query cache shell.
///
/// Builds the tokio runtime by hand so shutdown does not wait on a pending
/// stdin read.
fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let result = runtime.block_on(run());
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

/// Runs the shell until input ends or a shutdown signal arrives.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the cache context
/// 4. Start the TTL cleanup task if a purge interval is configured
/// 5. Serve commands from stdin until EOF, QUIT or a shutdown signal
/// 6. Destroy the context
async fn run() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "query_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting query cache shell");

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: max_entries={}, max_size={}, default_ttl={}s, duplicate_keys={}, purge_interval={:?}",
        config.max_entries,
        config.max_size,
        config.default_ttl.as_secs(),
        config.duplicate_keys,
        config.purge_interval
    );

    let purge_interval = config.purge_interval;
    let context = CacheContext::from_config(config).context("invalid cache configuration")?;

    let cleanup_handle = purge_interval.map(|interval| {
        info!("Background cleanup task started");
        spawn_cleanup_task(context.clone(), interval)
    });

    let stdin = BufReader::new(io::stdin());
    let stdout = io::stdout();

    tokio::select! {
        result = shell::serve(&context, stdin, stdout) => {
            let answered = result.context("shell session failed")?;
            info!("Input closed after {} commands", answered);
        }
        _ = shutdown_signal() => {}
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }

    let released = destroy_context(&context)?;
    info!("Query cache shut down, released {} entries", released);
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
