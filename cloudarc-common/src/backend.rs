use std::path::Path;

use crate::error::BackendError;

/// Trait implemented by all storage backends.
///
/// Each backend handles the raw transfer of backup files to a specific
/// target. The backup engine is responsible for scheduling, retry policy,
/// and serializing calls against a single backend instance; the backend is
/// responsible only for storing, retrieving, listing, and deleting objects
/// under its configured remote directory.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store a local file under the remote directory. The object keeps the
    /// source file's base name unless `remote_name` overrides it.
    async fn put(&self, source: &Path, remote_name: Option<&str>) -> Result<(), BackendError>;

    /// Retrieve a remote object, saving it to `local_dest`. The destination's
    /// parent directory must already exist.
    async fn get(&self, remote_name: &str, local_dest: &Path) -> Result<(), BackendError>;

    /// List the object names in the remote directory, in tool order.
    async fn list(&self) -> Result<Vec<String>, BackendError>;

    /// Delete the named objects, one by one, stopping at the first failure.
    async fn delete(&self, filenames: &[String]) -> Result<(), BackendError>;
}
