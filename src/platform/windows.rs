//! Windows defaults.

use std::path::PathBuf;

pub const LINE_ENDING: &str = "\r\n";

/// `%SystemRoot%\System32\drivers\etc\hosts`, assuming `C:\Windows` when unset.
pub fn hosts_path() -> PathBuf {
    let root = std::env::var_os("SystemRoot")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows"));
    root.join("System32").join("drivers").join("etc").join("hosts")
}
