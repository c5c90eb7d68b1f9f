//! Per-tenant workload recreation.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::ReconcileError;
use crate::permissions::TenantSpec;
use crate::workload::runtime::{ContainerRuntime, WorkloadRecord};

pub struct WorkloadManager {
    runtime: Arc<dyn ContainerRuntime>,
    settings: Arc<Settings>,
}

impl WorkloadManager {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, settings: Arc<Settings>) -> Self {
        Self { runtime, settings }
    }

    /// Remove any workload with the tenant's identity, then launch a fresh one.
    ///
    /// A failed removal skips the launch: starting a second workload under
    /// the same identity could only fail or duplicate.
    pub async fn recreate(&self, tenant: &TenantSpec) -> Result<WorkloadRecord, ReconcileError> {
        let record = WorkloadRecord::derive(tenant, &self.settings);

        self.runtime
            .remove(&record.identity)
            .await
            .map_err(|e| ReconcileError::WorkloadRemove {
                tenant: tenant.name.clone(),
                diagnostic: e.0,
            })?;

        tracing::info!(
            tenant = %tenant.name,
            identity = %record.identity,
            credential = record.injected_secret.is_some(),
            "Spawning workload"
        );
        self.runtime
            .run(&record)
            .await
            .map_err(|e| ReconcileError::WorkloadLaunch {
                tenant: tenant.name.clone(),
                diagnostic: e.0,
            })?;

        Ok(record)
    }

    /// Force-remove the workload a tenant would own. Used by the reaper.
    pub async fn remove(&self, tenant: &str) -> Result<(), ReconcileError> {
        let identity = self.settings.workload.identity(tenant);
        self.runtime
            .remove(&identity)
            .await
            .map_err(|e| ReconcileError::WorkloadRemove {
                tenant: tenant.to_string(),
                diagnostic: e.0,
            })
    }
}
