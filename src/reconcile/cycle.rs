//! Cycle orchestration.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::config::Settings;
use crate::error::ReconcileError;
use crate::linkfarm::LinkFarm;
use crate::observability::metrics;
use crate::permissions::{load_desired_state, DesiredState};
use crate::reaper::reap_orphans;
use crate::reconcile::report::CycleReport;
use crate::reload::ProxyReloader;
use crate::routing::RouteGenerator;
use crate::workload::{ContainerRuntime, WorkloadManager};

/// Converges the filesystem, workloads and routes to the document.
pub struct Reconciler {
    settings: Arc<Settings>,
    workloads: WorkloadManager,
    reloader: Arc<dyn ProxyReloader>,
}

impl Reconciler {
    pub fn new(
        settings: Arc<Settings>,
        runtime: Arc<dyn ContainerRuntime>,
        reloader: Arc<dyn ProxyReloader>,
    ) -> Self {
        let workloads = WorkloadManager::new(runtime, settings.clone());
        Self {
            settings,
            workloads,
            reloader,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Load the document and apply it. Errors only when the document cannot
    /// be read or parsed; nothing is touched in that case.
    pub async fn run_cycle(&self) -> Result<CycleReport, ReconcileError> {
        let state = load_desired_state(&self.settings.paths.document_path())?;
        Ok(self.apply(&state).await)
    }

    /// Apply an already loaded desired state.
    pub async fn apply(&self, state: &DesiredState) -> CycleReport {
        let mut report = CycleReport::new(Uuid::new_v4());
        report.tenants = state.len();

        let links = LinkFarm::new(&self.settings.paths).sync_all(state);
        report.links = links.links.len();
        report.errors.extend(links.errors);

        let routes = RouteGenerator::new(&self.settings);
        for tenant in state.workload_tenants() {
            match self.workloads.recreate(tenant).await {
                Ok(record) => report.workloads.push(record.identity),
                Err(e) => report.errors.push(e),
            }
            match routes.write(&tenant.name) {
                Ok(route) => report.routes.push(route.hostname),
                Err(e) => report.errors.push(e),
            }
        }

        let reaped = reap_orphans(state, &routes, &self.workloads).await;
        report.reaped = reaped.reaped;
        report.errors.extend(reaped.errors);

        match self.reloader.reload().await {
            Ok(()) => report.reloaded = true,
            Err(e) => report.errors.push(ReconcileError::ReloadSignal { diagnostic: e.0 }),
        }

        report
    }

    /// Run one cycle inside its own span, then log and record the outcome.
    /// This is the only place cycle failures are logged.
    pub async fn run_logged(&self, reason: &str) -> Option<CycleReport> {
        let cycle_id = Uuid::new_v4();
        let span = tracing::info_span!("cycle", %cycle_id, reason);

        async {
            tracing::info!("Reconciliation started");
            let started = Instant::now();
            match self.run_cycle().await {
                Ok(mut report) => {
                    report.cycle_id = cycle_id;
                    report.log();
                    metrics::record_cycle(&report, started);
                    Some(report)
                }
                Err(e) => {
                    tracing::error!(
                        kind = e.kind(),
                        error = %e,
                        "Skipping cycle, keeping previously applied state"
                    );
                    metrics::record_aborted_cycle(&e, started);
                    None
                }
            }
        }
        .instrument(span)
        .await
    }
}
