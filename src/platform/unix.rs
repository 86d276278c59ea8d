//! Unix (macOS, Linux) defaults.

use std::path::PathBuf;

pub const LINE_ENDING: &str = "\n";

pub fn hosts_path() -> PathBuf {
    PathBuf::from("/etc/hosts")
}
