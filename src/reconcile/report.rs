//! Per-cycle outcome.

use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::error::ReconcileError;

#[derive(Debug, Serialize)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    /// Declared tenants, reserved ones included.
    pub tenants: usize,
    /// Links created across all spaces.
    pub links: usize,
    /// Identities of workloads launched this cycle.
    pub workloads: Vec<String>,
    /// Hostnames whose rule file was written this cycle.
    pub routes: Vec<String>,
    /// Tenants whose route and workload were reaped.
    pub reaped: Vec<String>,
    pub reloaded: bool,
    #[serde(serialize_with = "as_messages")]
    pub errors: Vec<ReconcileError>,
}

impl CycleReport {
    pub fn new(cycle_id: Uuid) -> Self {
        Self {
            cycle_id,
            tenants: 0,
            links: 0,
            workloads: Vec::new(),
            routes: Vec::new(),
            reaped: Vec::new(),
            reloaded: false,
            errors: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Emit one warning per failure plus a summary line.
    pub fn log(&self) {
        for error in &self.errors {
            tracing::warn!(kind = error.kind(), error = %error, "Reconciliation step failed");
        }
        tracing::info!(
            tenants = self.tenants,
            links = self.links,
            workloads = self.workloads.len(),
            routes = self.routes.len(),
            reaped = self.reaped.len(),
            reloaded = self.reloaded,
            failures = self.errors.len(),
            "Cycle complete"
        );
    }
}

fn as_messages<S: Serializer>(errors: &[ReconcileError], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}
