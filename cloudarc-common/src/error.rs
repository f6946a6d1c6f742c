use std::process::ExitStatus;

/// Failure of a single external tool invocation.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Errors surfaced to the backup engine by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("bad backup URL {url:?}: remote path must begin with '//'")]
    Configuration { url: String },

    #[error("could not create remote directory {path}")]
    Initialization {
        path: String,
        #[source]
        source: ToolError,
    },

    #[error("{operation} failed for {target}")]
    Transfer {
        operation: &'static str,
        target: String,
        #[source]
        source: ToolError,
    },

    #[error("checksum mismatch for {remote_path}: local md5 {local_md5} != remote md5 {remote_md5}")]
    Integrity {
        remote_path: String,
        local_md5: String,
        remote_md5: String,
    },

    #[error("unparseable {context} from external tool: {detail}")]
    Parsing {
        context: &'static str,
        detail: String,
    },

    #[error("local I/O error: {0}")]
    Io(#[from] std::io::Error),
}
