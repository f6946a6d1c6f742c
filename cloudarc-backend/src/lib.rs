//! Cloud-drive storage backend for backup engines.
//!
//! Backup URLs look like `drive://directory1/directory2`. All network
//! transfer is delegated to the service's command-line client; this crate
//! builds the command lines, parses their output, and gates every upload
//! on an MD5 checksum comparison.

pub mod adapter;
pub mod checksum;
pub mod cli;
pub mod config;
pub mod process;
pub mod tool;

use cloudarc_common::backend::StorageBackend;
use cloudarc_common::error::BackendError;

use crate::adapter::CloudDriveBackend;
use crate::cli::DriveCli;
use crate::config::BackendConfig;

/// Construct a storage backend for `url` using the configured external
/// client, creating the remote directory tree as a side effect.
pub async fn from_url(
    url: &str,
    config: &BackendConfig,
) -> Result<Box<dyn StorageBackend>, BackendError> {
    let tool = DriveCli::new(config);
    let backend = CloudDriveBackend::open(url, Box::new(tool)).await?;
    Ok(Box::new(backend))
}
