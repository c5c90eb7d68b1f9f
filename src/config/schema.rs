//! Settings schema definitions.
//!
//! All types derive Serde traits for deserialization from the settings file.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root settings for the orchestrator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Well-known filesystem locations.
    pub paths: PathsConfig,

    /// Container runtime invocation.
    pub workload: WorkloadConfig,

    /// Reverse-proxy rule generation.
    pub routing: RoutingConfig,

    /// Reverse-proxy reload signal.
    pub reload: ReloadConfig,

    /// Change detection and debounce.
    pub trigger: TriggerConfig,

    /// Bounds on external command invocations.
    pub timeouts: TimeoutConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Filesystem layout, as seen by this process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Shared content root, watched for document changes.
    pub content_root: PathBuf,

    /// Parent of the per-tenant link farms.
    pub spaces_root: PathBuf,

    /// Declarative document file name, relative to `content_root`.
    pub document_name: String,

    /// Directory the reverse proxy loads rule files from.
    pub routing_dir: PathBuf,

    /// Host-visible root used for bind-mount sources. Supplied through
    /// `HOST_ROOT_DIR`; never read from the settings file.
    #[serde(skip)]
    pub host_root: PathBuf,

    /// Host-side sub-directory (under `host_root`) holding the link farms.
    pub host_spaces_dir: String,

    /// Host-side sub-directory (under `host_root`) holding shared content.
    pub host_content_dir: String,

    /// Shared resources linked into every tenant's space.
    pub shared_links: Vec<String>,

    /// Version-control directory only the privileged tenant may see.
    pub vcs_dir: String,
}

impl PathsConfig {
    pub fn document_path(&self) -> PathBuf {
        self.content_root.join(&self.document_name)
    }

    pub fn host_space_dir(&self, tenant: &str) -> PathBuf {
        self.host_root.join(&self.host_spaces_dir).join(tenant)
    }

    pub fn host_content_root(&self) -> PathBuf {
        self.host_root.join(&self.host_content_dir)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("/content"),
            spaces_root: PathBuf::from("/spaces"),
            document_name: "permissions.yaml".to_string(),
            routing_dir: PathBuf::from("/etc/nginx/conf.d"),
            host_root: PathBuf::new(),
            host_spaces_dir: "spaces".to_string(),
            host_content_dir: "content".to_string(),
            shared_links: vec!["_plug".to_string(), "Library".to_string()],
            vcs_dir: ".git".to_string(),
        }
    }
}

/// Container runtime settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Runtime CLI binary.
    pub runtime_binary: String,

    /// Image every tenant workload runs.
    pub image: String,

    /// Container name prefix; the tenant name is appended.
    pub name_prefix: String,

    /// Network shared with the reverse proxy.
    pub network: String,

    /// Fixed non-root `uid:gid`.
    pub user: String,

    /// Restart policy passed to the runtime.
    pub restart_policy: String,

    /// In-container mount point of the tenant's link farm.
    pub space_mount: String,

    /// In-container mount point of the shared content root.
    pub content_mount: String,

    /// Environment variable carrying `tenant:secret`.
    pub credential_env: String,
}

impl WorkloadConfig {
    /// Deterministic workload identity for a tenant.
    pub fn identity(&self, tenant: &str) -> String {
        format!("{}{}", self.name_prefix, tenant)
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            runtime_binary: "docker".to_string(),
            image: "ghcr.io/silverbulletmd/silverbullet".to_string(),
            name_prefix: "ng-space-".to_string(),
            network: "ng-brain_default".to_string(),
            user: "1001:1001".to_string(),
            restart_policy: "always".to_string(),
            space_mount: "/space".to_string(),
            content_mount: "/content".to_string(),
            credential_env: "SB_USER".to_string(),
        }
    }
}

/// Route rule settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Tenants are served at `<tenant>.<base_domain>`.
    pub base_domain: String,

    /// Port the reverse proxy listens on.
    pub listen_port: u16,

    /// Port the workload serves on inside its container.
    pub upstream_port: u16,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_domain: "docs.example.com".to_string(),
            listen_port: 80,
            upstream_port: 3000,
        }
    }
}

/// Reverse-proxy reload settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Container running the reverse proxy.
    pub proxy_container: String,

    /// Signal that makes the proxy re-read its rules.
    pub signal: String,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            proxy_container: "ng-gatekeeper".to_string(),
            signal: "HUP".to_string(),
        }
    }
}

/// Change trigger settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Quiet period after the last matching event before a cycle starts.
    pub debounce_ms: u64,
}

impl TriggerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

/// Timeout configuration for external commands.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Launching a workload (may include an image pull).
    pub launch_secs: u64,

    /// Force-removing a workload.
    pub remove_secs: u64,

    /// Signalling the reverse proxy.
    pub reload_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            launch_secs: 120,
            remove_secs: 30,
            reload_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
