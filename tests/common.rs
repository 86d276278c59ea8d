//! Shared test helpers.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a scratch directory for a hosts file and its backups.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("etchosts_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| Path::new(".").into()))
        .expect("temp dir")
}

/// Write `content` to `<dir>/hosts` and return its path.
pub fn hosts_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hosts");
    fs::write(&path, content).unwrap();
    path
}

/// Backup files (`hosts.<timestamp>`) next to `hosts`.
pub fn backups(hosts: &Path) -> Vec<PathBuf> {
    let prefix = format!("{}.", hosts.file_name().unwrap().to_string_lossy());
    let mut found: Vec<PathBuf> = fs::read_dir(hosts.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.file_name().unwrap().to_string_lossy().starts_with(&prefix))
        .collect();
    found.sort();
    found
}

pub const SAMPLE: &str = "# static table\n127.0.0.1 localhost\n::1 localhost ip6-localhost # v6 loopback\n\nnot a hosts line\n10.0.0.5 foo.test # dev box\n";
