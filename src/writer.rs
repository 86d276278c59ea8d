//! Rendering a document back to text and persisting it with a backup.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Local, Timelike};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::document::Document;
use crate::error::{HostsError, Result};

/// Each line with its terminator; the final line has none.
fn chunks<'a>(doc: &'a Document, line_ending: &'a str) -> impl Iterator<Item = String> + 'a {
    let last = doc.len().saturating_sub(1);
    doc.lines().iter().enumerate().map(move |(i, line)| {
        if i == last {
            line.to_string()
        } else {
            format!("{line}{line_ending}")
        }
    })
}

/// Render `doc` as file content, lines joined by `line_ending`.
pub fn render(doc: &Document, line_ending: &str) -> String {
    chunks(doc, line_ending).collect()
}

/// `YYYY_M_D_H_MM_SS` in local time; minutes and seconds are zero-padded.
pub fn timestamp(now: &DateTime<Local>) -> String {
    format!(
        "{}_{}_{}_{}_{:02}_{:02}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Sibling backup path `<target>.<timestamp>`. Two backups in the same second
/// share a path and the later one wins.
pub fn backup_path(target: &Path, now: &DateTime<Local>) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".");
    name.push(timestamp(now));
    PathBuf::from(name)
}

/// Back up `target`, then overwrite it with `doc`, keeping its permissions.
/// Returns the backup path.
pub fn persist(target: &Path, doc: &Document, line_ending: &str) -> Result<PathBuf> {
    let text = render(doc, line_ending);
    let metadata = fs::metadata(target).map_err(|e| HostsError::io(target, e))?;

    let backup = backup_path(target, &Local::now());
    fs::copy(target, &backup).map_err(|e| HostsError::io(&backup, e))?;
    tracing::info!("Backed up {} to {}", target.display(), backup.display());

    fs::write(target, text).map_err(|e| HostsError::io(target, e))?;
    fs::set_permissions(target, metadata.permissions()).map_err(|e| HostsError::io(target, e))?;
    tracing::info!("Wrote {} lines to {}", doc.len(), target.display());
    Ok(backup)
}

/// Streaming form of [`persist`]: same backup and output bytes.
pub async fn persist_async(target: &Path, doc: &Document, line_ending: &str) -> Result<PathBuf> {
    let metadata = tokio::fs::metadata(target)
        .await
        .map_err(|e| HostsError::io(target, e))?;

    let backup = backup_path(target, &Local::now());
    copy_async(target, &backup, metadata.permissions()).await?;
    tracing::info!("Backed up {} to {}", target.display(), backup.display());

    let file = tokio::fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(target)
        .await
        .map_err(|e| HostsError::io(target, e))?;
    let mut out = BufWriter::new(file);
    for chunk in chunks(doc, line_ending) {
        out.write_all(chunk.as_bytes())
            .await
            .map_err(|e| HostsError::io(target, e))?;
    }
    out.flush().await.map_err(|e| HostsError::io(target, e))?;

    tokio::fs::set_permissions(target, metadata.permissions())
        .await
        .map_err(|e| HostsError::io(target, e))?;
    tracing::info!("Wrote {} lines to {}", doc.len(), target.display());
    Ok(backup)
}

/// Stream `from` into `to` and give it `from`'s permissions, as `fs::copy` does.
async fn copy_async(from: &Path, to: &Path, permissions: fs::Permissions) -> Result<()> {
    let mut src = tokio::fs::File::open(from)
        .await
        .map_err(|e| HostsError::io(from, e))?;
    let mut dst = tokio::fs::File::create(to)
        .await
        .map_err(|e| HostsError::io(to, e))?;
    tokio::io::copy(&mut src, &mut dst)
        .await
        .map_err(|e| HostsError::io(to, e))?;
    dst.flush().await.map_err(|e| HostsError::io(to, e))?;
    tokio::fs::set_permissions(to, permissions)
        .await
        .map_err(|e| HostsError::io(to, e))
}
