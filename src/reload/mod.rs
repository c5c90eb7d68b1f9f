//! Reverse-proxy reload.
//!
//! Sent after every cycle whether or not anything changed: a redundant
//! reload is cheap, a missed one leaves stale routing in place. A failed
//! signal is reported and retried implicitly by the next cycle.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::Settings;
use crate::resilience::run_with_timeout;
use crate::workload::RuntimeError;

#[async_trait]
pub trait ProxyReloader: Send + Sync {
    async fn reload(&self) -> Result<(), RuntimeError>;
}

/// Signals the proxy container through the runtime CLI.
#[derive(Debug, Clone)]
pub struct SignalReloader {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl SignalReloader {
    pub fn new(settings: &Settings) -> Self {
        Self {
            program: settings.workload.runtime_binary.clone(),
            args: vec![
                "kill".into(),
                "-s".into(),
                settings.reload.signal.clone(),
                settings.reload.proxy_container.clone(),
            ],
            timeout: Duration::from_secs(settings.timeouts.reload_secs),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl ProxyReloader for SignalReloader {
    async fn reload(&self) -> Result<(), RuntimeError> {
        tracing::info!(args = ?self.args, "Reloading reverse proxy");
        run_with_timeout(&self.program, &self.args, self.timeout).await?;
        Ok(())
    }
}
