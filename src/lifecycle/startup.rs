//! Startup orchestration.
//!
//! # Responsibilities
//! - Wire the runtime and reload boundaries into a Reconciler
//! - Run the unconditional initial cycle
//! - Start the document watcher and hand its channel to the trigger loop
//!
//! # Design Decisions
//! - Fail fast: a watcher that cannot start is fatal
//! - Subsystems initialize in order, not concurrently

use std::sync::Arc;

use crate::config::Settings;
use crate::lifecycle::shutdown::Shutdown;
use crate::reconcile::Reconciler;
use crate::reload::SignalReloader;
use crate::trigger::{run_trigger_loop, Debouncer, DocumentWatcher};
use crate::workload::DockerCli;

/// Reconciler driving the real container runtime and reverse proxy.
pub fn build_reconciler(settings: Arc<Settings>) -> Reconciler {
    let runtime = Arc::new(DockerCli::new(&settings));
    let reloader = Arc::new(SignalReloader::new(&settings));
    Reconciler::new(settings, runtime, reloader)
}

/// Initial cycle, then watch and reconcile until shutdown.
pub async fn run_daemon(reconciler: Reconciler, shutdown: &Shutdown) -> Result<(), notify::Error> {
    let shutdown_rx = shutdown.subscribe();
    reconciler.run_logged("startup").await;

    let paths = &reconciler.settings().paths;
    let (watcher, rx) = DocumentWatcher::start(&paths.content_root, &paths.document_name)?;
    tracing::info!(document = %paths.document_path().display(), "Watching declarative document");

    let debouncer = Debouncer::new(rx, reconciler.settings().trigger.debounce());
    let reconciler = &reconciler;
    let cycles = run_trigger_loop(debouncer, shutdown_rx, move |_| async move {
        reconciler.run_logged("document-changed").await;
    })
    .await;

    drop(watcher);
    tracing::info!(cycles, "Trigger loop stopped");
    Ok(())
}
