//! Container runtime boundary.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::Settings;
use crate::permissions::TenantSpec;
use crate::resilience::CommandError;

/// Runtime failures only carry diagnostic text.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct RuntimeError(pub String);

impl From<CommandError> for RuntimeError {
    fn from(e: CommandError) -> Self {
        Self(e.diagnostic())
    }
}

/// A host bind mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mount {
    pub source: String,
    pub target: String,
}

impl Mount {
    pub fn spec(&self) -> String {
        format!("{}:{}", self.source, self.target)
    }
}

/// Everything needed to launch one tenant's workload. Re-derived from the
/// desired state every cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkloadRecord {
    pub tenant: String,
    pub identity: String,
    pub image: String,
    pub mounts: Vec<Mount>,
    /// `NAME=tenant:secret`, when the tenant declares a secret.
    #[serde(skip)]
    pub injected_secret: Option<String>,
}

impl WorkloadRecord {
    pub fn derive(tenant: &TenantSpec, settings: &Settings) -> Self {
        let paths = &settings.paths;
        let workload = &settings.workload;
        let mounts = vec![
            Mount {
                source: paths.host_space_dir(&tenant.name).display().to_string(),
                target: workload.space_mount.clone(),
            },
            Mount {
                source: paths.host_content_root().display().to_string(),
                target: workload.content_mount.clone(),
            },
        ];
        let injected_secret = tenant
            .effective_secret()
            .map(|secret| format!("{}={}:{}", workload.credential_env, tenant.name, secret));

        Self {
            tenant: tenant.name.clone(),
            identity: workload.identity(&tenant.name),
            image: workload.image.clone(),
            mounts,
            injected_secret,
        }
    }
}

/// Operations the orchestrator needs from a container runtime.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Force-stop and remove the workload named `identity`. Removing a
    /// workload that does not exist succeeds.
    async fn remove(&self, identity: &str) -> Result<(), RuntimeError>;

    /// Launch a detached workload described by `record`.
    async fn run(&self, record: &WorkloadRecord) -> Result<(), RuntimeError>;
}
