//! Orphan reaping.
//!
//! Runs after every declared tenant's workload and route have been
//! (re)created. Each rule file whose tenant is no longer a declared,
//! non-reserved tenant is deleted together with the workload of the same
//! tenant. This is the only way a tenant removal takes effect.

use serde::Serialize;

use crate::error::ReconcileError;
use crate::permissions::DesiredState;
use crate::routing::RouteGenerator;
use crate::workload::WorkloadManager;

#[derive(Debug, Default, Serialize)]
pub struct ReapReport {
    /// Tenants whose route and workload were reaped.
    pub reaped: Vec<String>,
    #[serde(skip)]
    pub errors: Vec<ReconcileError>,
}

/// Tenants with a rule file that the desired state no longer owns.
pub fn find_orphans(existing: &[String], state: &DesiredState) -> Vec<String> {
    existing
        .iter()
        .filter(|tenant| !state.has_workload_tenant(tenant))
        .cloned()
        .collect()
}

pub async fn reap_orphans(
    state: &DesiredState,
    routes: &RouteGenerator<'_>,
    workloads: &WorkloadManager,
) -> ReapReport {
    let mut report = ReapReport::default();

    let existing = match routes.list_tenants() {
        Ok(existing) => existing,
        Err(e) => {
            report.errors.push(e);
            return report;
        }
    };

    for tenant in find_orphans(&existing, state) {
        tracing::info!(tenant = %tenant, "Reaping orphan");
        if let Err(e) = routes.delete(&tenant) {
            report.errors.push(e);
        }
        if let Err(e) = workloads.remove(&tenant).await {
            report.errors.push(e);
        }
        report.reaped.push(tenant);
    }

    report
}
