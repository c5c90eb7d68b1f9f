//! Reconciliation error taxonomy.
//!
//! Only `ConfigRead` and `ConfigParse` abort a cycle. Every other variant is
//! collected into the cycle report and logged by the caller; the next cycle
//! re-derives and re-applies the full desired state regardless.

use std::path::PathBuf;
use thiserror::Error;

use crate::permissions::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("cannot read declarative document {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse declarative document {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch workload for tenant {tenant}: {diagnostic}")]
    WorkloadLaunch { tenant: String, diagnostic: String },

    #[error("failed to remove workload for tenant {tenant}: {diagnostic}")]
    WorkloadRemove { tenant: String, diagnostic: String },

    #[error("failed to write route for tenant {tenant} at {path}: {source}")]
    RouteWrite {
        tenant: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to signal reverse proxy reload: {diagnostic}")]
    ReloadSignal { diagnostic: String },
}

impl ReconcileError {
    /// Whether this error skips all reconciliation work for the trigger.
    pub fn aborts_cycle(&self) -> bool {
        matches!(self, Self::ConfigRead { .. } | Self::ConfigParse { .. })
    }

    /// Short stable label, used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigRead { .. } => "config_read",
            Self::ConfigParse { .. } => "config_parse",
            Self::Filesystem { .. } => "filesystem",
            Self::WorkloadLaunch { .. } => "workload_launch",
            Self::WorkloadRemove { .. } => "workload_remove",
            Self::RouteWrite { .. } => "route_write",
            Self::ReloadSignal { .. } => "reload_signal",
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_document(path: impl Into<PathBuf>, errors: &[ValidationError]) -> Self {
        let reason = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::ConfigParse {
            path: path.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_document_errors_abort() {
        let read = ReconcileError::ConfigRead {
            path: "/content/permissions.yaml".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(read.aborts_cycle());

        let launch = ReconcileError::WorkloadLaunch {
            tenant: "alice".into(),
            diagnostic: "boom".into(),
        };
        assert!(!launch.aborts_cycle());
        assert_eq!(launch.kind(), "workload_launch");
    }

    #[test]
    fn test_invalid_document_joins_reasons() {
        let err = ReconcileError::invalid_document(
            "/content/permissions.yaml",
            &[
                ValidationError::EmptyTenantName,
                ValidationError::EmptyPath { tenant: "bob".into() },
            ],
        );
        let msg = err.to_string();
        assert!(msg.contains("empty tenant name"));
        assert!(msg.contains("bob"));
        assert!(err.aborts_cycle());
    }
}
