use std::path::Path;

use cloudarc_common::error::BackendError;

/// Metadata the remote service reports for one object.
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    /// Content checksum, lowercase hex.
    pub md5: String,
}

/// The narrow set of operations the external transfer tool provides.
///
/// All command construction and output parsing stays behind this trait, so
/// the CLI client can later be swapped for a native one without touching
/// the adapter's control logic.
#[async_trait::async_trait]
pub trait TransferTool: Send + Sync {
    /// Create a remote directory. Re-creating an existing directory is not
    /// fatal; idempotence is delegated to the tool.
    async fn mkdir(&self, remote_dir: &str) -> Result<(), BackendError>;

    /// Upload a local file into a remote directory under its base name.
    async fn upload(&self, local: &Path, remote_dir: &str) -> Result<(), BackendError>;

    /// Rename a remote object within its directory.
    async fn rename(&self, remote_path: &str, new_name: &str) -> Result<(), BackendError>;

    /// Fetch a remote object's metadata.
    async fn metadata(&self, remote_path: &str) -> Result<ObjectMetadata, BackendError>;

    /// Download a remote object into a local directory under its remote name.
    async fn download(&self, remote_path: &str, local_dir: &Path) -> Result<(), BackendError>;

    /// List the object names in a remote directory.
    async fn list(&self, remote_dir: &str) -> Result<Vec<String>, BackendError>;

    /// Delete a remote object.
    async fn delete(&self, remote_path: &str) -> Result<(), BackendError>;
}
