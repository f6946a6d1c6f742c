//! Cloud-drive storage backend.
//!
//! Translates the backup engine's storage calls into external tool
//! invocations. Uploads are gated on an MD5 comparison between the local
//! file and the checksum the remote service reports; downloads are not
//! verified.

use std::ffi::OsStr;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use cloudarc_common::backend::StorageBackend;
use cloudarc_common::error::BackendError;
use cloudarc_common::remote::RemoteDirectory;

use crate::checksum;
use crate::tool::TransferTool;

pub struct CloudDriveBackend {
    remote_dir: RemoteDirectory,
    tool: Box<dyn TransferTool>,
}

impl std::fmt::Debug for CloudDriveBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudDriveBackend")
            .field("remote_dir", &self.remote_dir)
            .finish_non_exhaustive()
    }
}

impl CloudDriveBackend {
    /// Parse the backend URL and create the remote directory tree, parents
    /// before children. Fails with `Configuration` before issuing any
    /// command if the URL does not encode an absolute remote directory.
    pub async fn open(url: &str, tool: Box<dyn TransferTool>) -> Result<Self, BackendError> {
        let remote_dir = RemoteDirectory::from_url(url)?;
        for prefix in remote_dir.prefixes() {
            tool.mkdir(&prefix).await?;
        }
        info!(remote_dir = %remote_dir, "remote directory initialized");
        Ok(Self { remote_dir, tool })
    }

    pub fn remote_dir(&self) -> &RemoteDirectory {
        &self.remote_dir
    }
}

fn file_name(path: &Path) -> Result<&str, BackendError> {
    path.file_name().and_then(OsStr::to_str).ok_or_else(|| {
        BackendError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("path has no usable file name: {}", path.display()),
        ))
    })
}

#[async_trait::async_trait]
impl StorageBackend for CloudDriveBackend {
    async fn put(&self, source: &Path, remote_name: Option<&str>) -> Result<(), BackendError> {
        let base_name = file_name(source)?;
        let final_name = remote_name.unwrap_or(base_name);
        let remote_path = self.remote_dir.join(final_name);
        info!(object = %remote_path, "writing remote object");

        // The tool cannot rename during upload: transfer under the base
        // name first, then move the object into place.
        self.tool.upload(source, &self.remote_dir.path()).await?;
        if remote_name.is_some() {
            let uploaded = self.remote_dir.join(base_name);
            self.tool.rename(&uploaded, final_name).await?;
        }

        let remote_md5 = self.tool.metadata(&remote_path).await?.md5;
        let local_md5 = checksum::md5_hex(source).await?;
        if local_md5 != remote_md5 {
            return Err(BackendError::Integrity {
                remote_path,
                local_md5,
                remote_md5,
            });
        }
        debug!(object = %remote_path, md5 = %local_md5, "upload verified");
        Ok(())
    }

    async fn get(&self, remote_name: &str, local_dest: &Path) -> Result<(), BackendError> {
        let remote_path = self.remote_dir.join(remote_name);
        let parent = local_dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| {
                BackendError::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("destination has no parent directory: {}", local_dest.display()),
                ))
            })?;
        self.tool.download(&remote_path, parent).await?;

        // The tool writes the object under its remote name; move it into
        // place when the caller asked for a different filename.
        if remote_name != file_name(local_dest)? {
            let downloaded = parent.join(remote_name);
            tokio::fs::rename(&downloaded, local_dest).await?;
        }
        debug!(object = %remote_path, dest = %local_dest.display(), "download complete");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>, BackendError> {
        let names = self.tool.list(&self.remote_dir.path()).await?;
        debug!(remote_dir = %self.remote_dir, count = names.len(), "listed remote objects");
        Ok(names)
    }

    async fn delete(&self, filenames: &[String]) -> Result<(), BackendError> {
        for filename in filenames {
            let remote_path = self.remote_dir.join(filename);
            self.tool.delete(&remote_path).await?;
            debug!(object = %remote_path, "deleted remote object");
        }
        Ok(())
    }
}
