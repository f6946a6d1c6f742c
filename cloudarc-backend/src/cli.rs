//! `drivecli` implementation of the transfer tool.
//!
//! Every operation is exactly one invocation of the external client, with
//! stdout as the only parsed channel. The `metadata` subcommand answers
//! with a JSON document whose `contentProperties.md5` field carries the
//! object checksum; `list` answers with one whitespace-delimited row per
//! object, filename in the third column.

use std::path::Path;

use serde::Deserialize;

use cloudarc_common::error::{BackendError, ToolError};

use crate::config::BackendConfig;
use crate::process::{CommandOutput, CommandRunner, ProcessRunner};
use crate::tool::{ObjectMetadata, TransferTool};

/// Wire shape of the `metadata` subcommand's JSON answer.
#[derive(Debug, Deserialize)]
struct MetadataResponse {
    #[serde(rename = "contentProperties")]
    content_properties: ContentProperties,
}

#[derive(Debug, Deserialize)]
struct ContentProperties {
    md5: String,
}

pub struct DriveCli {
    program: String,
    runner: Box<dyn CommandRunner>,
}

impl DriveCli {
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_runner(config.program.clone(), Box::new(ProcessRunner))
    }

    pub fn with_runner(program: impl Into<String>, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    async fn run(&self, args: Vec<String>) -> Result<CommandOutput, ToolError> {
        self.runner.run(&self.program, &args).await
    }
}

#[async_trait::async_trait]
impl TransferTool for DriveCli {
    async fn mkdir(&self, remote_dir: &str) -> Result<(), BackendError> {
        self.run(vec!["mkdir".to_string(), remote_dir.to_string()])
            .await
            .map_err(|source| BackendError::Initialization {
                path: remote_dir.to_string(),
                source,
            })?;
        Ok(())
    }

    async fn upload(&self, local: &Path, remote_dir: &str) -> Result<(), BackendError> {
        self.run(vec![
            "upload".to_string(),
            local.display().to_string(),
            remote_dir.to_string(),
        ])
        .await
        .map_err(|source| BackendError::Transfer {
            operation: "upload",
            target: local.display().to_string(),
            source,
        })?;
        Ok(())
    }

    async fn rename(&self, remote_path: &str, new_name: &str) -> Result<(), BackendError> {
        self.run(vec![
            "rename".to_string(),
            remote_path.to_string(),
            new_name.to_string(),
        ])
        .await
        .map_err(|source| BackendError::Transfer {
            operation: "rename",
            target: remote_path.to_string(),
            source,
        })?;
        Ok(())
    }

    async fn metadata(&self, remote_path: &str) -> Result<ObjectMetadata, BackendError> {
        let output = self
            .run(vec!["metadata".to_string(), remote_path.to_string()])
            .await
            .map_err(|source| BackendError::Transfer {
                operation: "metadata fetch",
                target: remote_path.to_string(),
                source,
            })?;
        let response: MetadataResponse =
            serde_json::from_str(&output.stdout).map_err(|e| BackendError::Parsing {
                context: "metadata response",
                detail: format!("{}: {}", remote_path, e),
            })?;
        Ok(ObjectMetadata {
            md5: response.content_properties.md5,
        })
    }

    async fn download(&self, remote_path: &str, local_dir: &Path) -> Result<(), BackendError> {
        self.run(vec![
            "download".to_string(),
            remote_path.to_string(),
            local_dir.display().to_string(),
        ])
        .await
        .map_err(|source| BackendError::Transfer {
            operation: "download",
            target: remote_path.to_string(),
            source,
        })?;
        Ok(())
    }

    async fn list(&self, remote_dir: &str) -> Result<Vec<String>, BackendError> {
        let output = self
            .run(vec!["list".to_string(), remote_dir.to_string()])
            .await
            .map_err(|source| BackendError::Transfer {
                operation: "list",
                target: remote_dir.to_string(),
                source,
            })?;
        parse_listing(&output.stdout)
    }

    async fn delete(&self, remote_path: &str) -> Result<(), BackendError> {
        self.run(vec!["delete".to_string(), remote_path.to_string()])
            .await
            .map_err(|source| BackendError::Transfer {
                operation: "delete",
                target: remote_path.to_string(),
                source,
            })?;
        Ok(())
    }
}

/// Extract the filename column from `list` output.
///
/// The trailing newline is discarded; any remaining row with fewer than
/// three whitespace-delimited tokens means the tool's column layout has
/// drifted, and is rejected rather than mis-parsed.
fn parse_listing(stdout: &str) -> Result<Vec<String>, BackendError> {
    stdout
        .lines()
        .map(|line| {
            line.split_whitespace()
                .nth(2)
                .map(str::to_string)
                .ok_or_else(|| BackendError::Parsing {
                    context: "listing row",
                    detail: line.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Runner that records every invocation and answers from a script.
    #[derive(Clone, Default)]
    struct ScriptedRunner {
        calls: Arc<Mutex<Vec<Vec<String>>>>,
        stdout: Arc<Mutex<String>>,
        fail: Arc<Mutex<bool>>,
    }

    #[async_trait::async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ToolError> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().cloned());
            self.calls.lock().unwrap().push(call);
            if *self.fail.lock().unwrap() {
                return Err(ToolError::Spawn {
                    program: program.to_string(),
                    source: io::Error::new(io::ErrorKind::Other, "scripted failure"),
                });
            }
            Ok(CommandOutput {
                stdout: self.stdout.lock().unwrap().clone(),
                stderr: String::new(),
            })
        }
    }

    fn cli_with(runner: &ScriptedRunner) -> DriveCli {
        DriveCli::with_runner("drivecli", Box::new(runner.clone()))
    }

    #[tokio::test]
    async fn test_mkdir_argv() {
        let runner = ScriptedRunner::default();
        cli_with(&runner).mkdir("/a/b").await.unwrap();
        assert_eq!(
            runner.calls.lock().unwrap().as_slice(),
            &[vec![
                "drivecli".to_string(),
                "mkdir".to_string(),
                "/a/b".to_string()
            ]]
        );
    }

    #[tokio::test]
    async fn test_upload_argv() {
        let runner = ScriptedRunner::default();
        cli_with(&runner)
            .upload(Path::new("/tmp/f.dat"), "/backups")
            .await
            .unwrap();
        assert_eq!(
            runner.calls.lock().unwrap().as_slice(),
            &[vec![
                "drivecli".to_string(),
                "upload".to_string(),
                "/tmp/f.dat".to_string(),
                "/backups".to_string()
            ]]
        );
    }

    #[tokio::test]
    async fn test_mkdir_failure_is_initialization_error() {
        let runner = ScriptedRunner::default();
        *runner.fail.lock().unwrap() = true;
        let err = cli_with(&runner).mkdir("/a").await.unwrap_err();
        match err {
            BackendError::Initialization { path, .. } => assert_eq!(path, "/a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_download_failure_is_transfer_error() {
        let runner = ScriptedRunner::default();
        *runner.fail.lock().unwrap() = true;
        let err = cli_with(&runner)
            .download("/a/f.txt", Path::new("/tmp"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BackendError::Transfer {
                operation: "download",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_metadata_extracts_md5() {
        let runner = ScriptedRunner::default();
        *runner.stdout.lock().unwrap() =
            r#"{"name":"f.txt","contentProperties":{"md5":"900150983cd24fb0d6963f7d28e17f72","size":3}}"#
                .to_string();
        let meta = cli_with(&runner).metadata("/a/f.txt").await.unwrap();
        assert_eq!(meta.md5, "900150983cd24fb0d6963f7d28e17f72");
    }

    #[tokio::test]
    async fn test_metadata_invalid_json_rejected() {
        let runner = ScriptedRunner::default();
        *runner.stdout.lock().unwrap() = "not json".to_string();
        let err = cli_with(&runner).metadata("/a/f.txt").await.unwrap_err();
        assert!(matches!(
            err,
            BackendError::Parsing {
                context: "metadata response",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_metadata_missing_checksum_rejected() {
        let runner = ScriptedRunner::default();
        *runner.stdout.lock().unwrap() = r#"{"contentProperties":{"size":3}}"#.to_string();
        let err = cli_with(&runner).metadata("/a/f.txt").await.unwrap_err();
        assert!(matches!(err, BackendError::Parsing { .. }));
    }

    #[tokio::test]
    async fn test_list_parses_third_column() {
        let runner = ScriptedRunner::default();
        *runner.stdout.lock().unwrap() = "a.txt  1024  a.txt\nb.txt  2048  b.txt\n".to_string();
        let names = cli_with(&runner).list("/backups").await.unwrap();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_parse_listing_rejects_short_row() {
        let err = parse_listing("a.txt 1024 a.txt\nbroken row\n").unwrap_err();
        match err {
            BackendError::Parsing { detail, .. } => assert_eq!(detail, "broken row"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_listing_empty_output() {
        assert!(parse_listing("").unwrap().is_empty());
    }
}
