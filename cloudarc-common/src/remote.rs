use std::fmt;

use crate::error::BackendError;

/// The backup's root directory on the remote service.
///
/// Parsed once from the backend URL at construction and immutable
/// thereafter. URLs look like `drive://dir1/dir2`: everything after the
/// scheme is the remote path, and it must begin with `//` to signal an
/// absolute directory (`//dir1/dir2` encodes the remote root `/dir1/dir2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDirectory {
    segments: Vec<String>,
}

impl RemoteDirectory {
    pub fn from_url(url: &str) -> Result<Self, BackendError> {
        let bad = || BackendError::Configuration { url: url.to_string() };
        let (scheme, path) = url.split_once(':').ok_or_else(bad)?;
        if scheme.is_empty() || !path.starts_with("//") {
            return Err(bad());
        }
        let segments = path[2..]
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self { segments })
    }

    /// Absolute remote path of the directory, e.g. `/dir1/dir2`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Absolute remote path of an object directly under this directory.
    pub fn join(&self, name: &str) -> String {
        if self.segments.is_empty() {
            format!("/{name}")
        } else {
            format!("/{}/{}", self.segments.join("/"), name)
        }
    }

    /// The ordered ancestor paths to create, parents before children:
    /// `/dir1`, then `/dir1/dir2`, and so on.
    pub fn prefixes(&self) -> Vec<String> {
        (1..=self.segments.len())
            .map(|i| format!("/{}", self.segments[..i].join("/")))
            .collect()
    }
}

impl fmt::Display for RemoteDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
