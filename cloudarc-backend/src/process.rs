//! External process invocation.

use std::process::Stdio;

use tokio::process::Command;

use cloudarc_common::error::ToolError;

/// Captured output of a completed command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs external commands and captures their output.
///
/// Kept behind a trait so tests can substitute a scripted runner.
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ToolError>;
}

/// Production runner backed by `tokio::process`. Blocks the calling task
/// until the child exits; no timeout is imposed.
pub struct ProcessRunner;

#[async_trait::async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ToolError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ToolError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(ToolError::Failed {
                command: format!("{} {}", program, args.join(" ")),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }

        tracing::debug!(program = %program, args = ?args, "command completed");
        Ok(CommandOutput { stdout, stderr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_runner_captures_stdout() {
        let out = ProcessRunner
            .run("echo", &["hello".to_string()])
            .await
            .unwrap();
        assert_eq!(out.stdout.trim(), "hello");
        assert!(out.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_runner_nonzero_exit() {
        let err = ProcessRunner.run("false", &[]).await.unwrap_err();
        assert!(matches!(err, ToolError::Failed { .. }));
    }

    #[tokio::test]
    async fn test_runner_missing_program() {
        let err = ProcessRunner
            .run("cloudarc-test-no-such-program", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }
}
