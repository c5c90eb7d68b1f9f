//! Docker CLI implementation of the runtime boundary.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{Settings, WorkloadConfig};
use crate::resilience::{run_with_timeout, CommandError};
use crate::workload::runtime::{ContainerRuntime, RuntimeError, WorkloadRecord};

/// Drives the runtime through its command-line interface.
#[derive(Debug, Clone)]
pub struct DockerCli {
    config: WorkloadConfig,
    launch_timeout: Duration,
    remove_timeout: Duration,
}

impl DockerCli {
    pub fn new(settings: &Settings) -> Self {
        Self {
            config: settings.workload.clone(),
            launch_timeout: Duration::from_secs(settings.timeouts.launch_secs),
            remove_timeout: Duration::from_secs(settings.timeouts.remove_secs),
        }
    }

    pub fn remove_args(identity: &str) -> Vec<String> {
        vec!["rm".into(), "-f".into(), identity.to_string()]
    }

    pub fn run_args(&self, record: &WorkloadRecord) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "run".into(),
            "-d".into(),
            "--name".into(),
            record.identity.clone(),
            "--restart".into(),
            self.config.restart_policy.clone(),
            "--network".into(),
            self.config.network.clone(),
            "--user".into(),
            self.config.user.clone(),
        ];
        for mount in &record.mounts {
            args.push("-v".into());
            args.push(mount.spec());
        }
        if let Some(env) = &record.injected_secret {
            args.push("-e".into());
            args.push(env.clone());
        }
        args.push(record.image.clone());
        args
    }
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn remove(&self, identity: &str) -> Result<(), RuntimeError> {
        match run_with_timeout(&self.config.runtime_binary, &Self::remove_args(identity), self.remove_timeout).await {
            Ok(_) => Ok(()),
            Err(CommandError::Failed { diagnostic, .. }) if is_missing_container(&diagnostic) => {
                tracing::debug!(identity, "No existing workload to remove");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn run(&self, record: &WorkloadRecord) -> Result<(), RuntimeError> {
        let output = run_with_timeout(&self.config.runtime_binary, &self.run_args(record), self.launch_timeout).await?;
        tracing::debug!(
            identity = %record.identity,
            container_id = %String::from_utf8_lossy(&output.stdout).trim(),
            "Runtime accepted workload"
        );
        Ok(())
    }
}

fn is_missing_container(diagnostic: &str) -> bool {
    diagnostic.to_ascii_lowercase().contains("no such container")
}
