//! Librarian orchestrator daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!   permissions.yaml ──notify──▶ trigger (debounce) ──▶ reconcile cycle
//!                                                          │
//!        ┌─────────────────────────────┬───────────────────┼──────────────┐
//!        ▼                             ▼                   ▼              ▼
//!   linkfarm                  workload + routing        reaper         reload
//!   /spaces/<tenant>/*        docker rm/run,            orphan routes  docker kill
//!   (relative symlinks)       conf.d/space-<t>.conf     + workloads    -s HUP proxy
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use librarian::config::loader::load_settings;
use librarian::lifecycle::signals::spawn_signal_listener;
use librarian::lifecycle::startup::{build_reconciler, run_daemon};
use librarian::observability::{logging, metrics};
use librarian::Shutdown;

#[derive(Parser)]
#[command(name = "librarian")]
#[command(about = "Keeps tenant spaces, workloads and routes in sync with permissions.yaml", long_about = None)]
struct Cli {
    /// Optional TOML settings file.
    #[arg(short, long, env = "LIBRARIAN_SETTINGS")]
    settings: Option<PathBuf>,

    /// Host-visible root used to build bind-mount sources.
    #[arg(long, env = "HOST_ROOT_DIR")]
    host_root: PathBuf,

    /// Run a single cycle, print its report as JSON and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref(), &cli.host_root)?;

    logging::init(&settings.observability);
    tracing::info!("librarian v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        content_root = %settings.paths.content_root.display(),
        spaces_root = %settings.paths.spaces_root.display(),
        routing_dir = %settings.paths.routing_dir.display(),
        host_root = %settings.paths.host_root.display(),
        debounce_ms = settings.trigger.debounce_ms,
        "Settings loaded"
    );

    if settings.observability.metrics_enabled {
        match settings.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %settings.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let reconciler = build_reconciler(Arc::new(settings));

    if cli.once {
        let report = reconciler
            .run_logged("once")
            .await
            .ok_or("declarative document could not be loaded")?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let shutdown = Arc::new(Shutdown::new());
    spawn_signal_listener(shutdown.clone());
    run_daemon(reconciler, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
