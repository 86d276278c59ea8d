//! Platform defaults for the hosts file location and line terminator.

use std::path::PathBuf;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

/// Native line terminator used when rendering a document.
#[cfg(unix)]
pub const LINE_ENDING: &str = unix::LINE_ENDING;

#[cfg(windows)]
pub const LINE_ENDING: &str = windows::LINE_ENDING;

/// Default hosts file for this platform.
pub fn default_hosts_path() -> PathBuf {
    #[cfg(unix)]
    return unix::hosts_path();

    #[cfg(windows)]
    return windows::hosts_path();
}
