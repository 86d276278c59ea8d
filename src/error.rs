//! Error type for hosts file operations.

use std::io;
use std::path::{Path, PathBuf};

/// Failure of a read, backup or write against a hosts file, or of caller input.
#[derive(Debug, thiserror::Error)]
pub enum HostsError {
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),
    #[error("invalid host: {0:?}")]
    InvalidHost(String),
}

impl HostsError {
    /// Wrap an I/O error for `path`, keeping permission failures distinct.
    pub fn io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::PermissionDenied {
            HostsError::PermissionDenied { path, source }
        } else {
            HostsError::Io { path, source }
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, HostsError::PermissionDenied { .. })
    }
}

pub type Result<T, E = HostsError> = std::result::Result<T, E>;
