//! Timeout enforcement for external commands.
//!
//! # Responsibilities
//! - Run a runtime/proxy CLI command with a deadline
//! - Capture combined diagnostic output on failure
//! - Kill the child when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - Failures carry text only; the runtime has no structured error channel

use std::process::Output;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("{program} exited with {status}: {diagnostic}")]
    Failed {
        program: String,
        status: String,
        diagnostic: String,
    },
}

impl CommandError {
    /// Diagnostic text suitable for the per-tenant error taxonomy.
    pub fn diagnostic(&self) -> String {
        self.to_string()
    }
}

/// Runs `program args…` and waits at most `timeout` for it to exit.
pub async fn run_with_timeout(program: &str, args: &[String], timeout: Duration) -> Result<Output, CommandError> {
    let mut cmd = Command::new(program);
    cmd.args(args).kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(CommandError::Spawn {
                program: program.to_string(),
                source,
            })
        }
        Err(_) => {
            return Err(CommandError::Timeout {
                program: program.to_string(),
                timeout,
            })
        }
    };

    if output.status.success() {
        Ok(output)
    } else {
        Err(CommandError::Failed {
            program: program.to_string(),
            status: output.status.to_string(),
            diagnostic: combined_output(&output),
        })
    }
}

/// stdout followed by stderr, trimmed.
pub fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut text = stdout.trim().to_string();
    if !stderr.trim().is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(stderr.trim());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_success_returns_output() {
        let out = run_with_timeout("sh", &args(&["-c", "echo ok"]), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(combined_output(&out), "ok");
    }

    #[tokio::test]
    async fn test_failure_carries_diagnostic() {
        let err = run_with_timeout("sh", &args(&["-c", "echo nope >&2; exit 3"]), Duration::from_secs(5))
            .await
            .unwrap_err();
        match err {
            CommandError::Failed { diagnostic, .. } => assert_eq!(diagnostic, "nope"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_timeout() {
        let err = run_with_timeout("sleep", &args(&["5"]), Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let err = run_with_timeout("definitely-not-a-real-binary", &[], Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
