//! Hosts file read/set/remove/write, blocking and async.

use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::document::Document;
use crate::error::{HostsError, Result};
use crate::line::{Address, Entry};
use crate::platform;
use crate::writer;

/// Read and classify `path`. Non-entry lines are kept only when
/// `preserve_formatting` is set.
pub fn read_document(path: &Path, preserve_formatting: bool) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| HostsError::io(path, e))?;
    let doc = Document::parse(&content, preserve_formatting);
    tracing::debug!("Read {} lines from {}", doc.len(), path.display());
    Ok(doc)
}

/// Same as [`read_document`], streaming the file line by line.
pub async fn read_document_async(path: &Path, preserve_formatting: bool) -> Result<Document> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| HostsError::io(path, e))?;
    let mut lines = BufReader::new(file).lines();
    let mut doc = Document::new(preserve_formatting);
    while let Some(raw) = lines.next_line().await.map_err(|e| HostsError::io(path, e))? {
        doc.push_raw(&raw);
    }
    tracing::debug!("Read {} lines from {}", doc.len(), path.display());
    Ok(doc)
}

/// A hosts file at a fixed path. Each operation reads the file fresh.
#[derive(Debug, Clone)]
pub struct HostsFile {
    path: PathBuf,
    line_ending: &'static str,
}

impl HostsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            line_ending: platform::LINE_ENDING,
        }
    }

    /// Override the platform line terminator used on write.
    pub fn with_line_ending(mut self, line_ending: &'static str) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self, preserve_formatting: bool) -> Result<Document> {
        read_document(&self.path, preserve_formatting)
    }

    pub async fn read_async(&self, preserve_formatting: bool) -> Result<Document> {
        read_document_async(&self.path, preserve_formatting).await
    }

    /// Back up the current file and replace it with `doc`. Returns the backup path.
    pub fn write(&self, doc: &Document) -> Result<PathBuf> {
        writer::persist(&self.path, doc, self.line_ending)
    }

    pub async fn write_async(&self, doc: &Document) -> Result<PathBuf> {
        writer::persist_async(&self.path, doc, self.line_ending).await
    }

    /// Add or update `entry`; see [`Document::set_entry`] for the count.
    /// Nothing is written when the file would not change.
    pub fn set(&self, entry: Entry) -> Result<usize> {
        let mut doc = self.read(true)?;
        let before = doc.clone();
        let matched = doc.set_entry(entry);
        if doc != before {
            self.write(&doc)?;
        } else {
            tracing::debug!("{} already up to date", self.path.display());
        }
        Ok(matched)
    }

    pub async fn set_async(&self, entry: Entry) -> Result<usize> {
        let mut doc = self.read_async(true).await?;
        let before = doc.clone();
        let matched = doc.set_entry(entry);
        if doc != before {
            self.write_async(&doc).await?;
        } else {
            tracing::debug!("{} already up to date", self.path.display());
        }
        Ok(matched)
    }

    /// Remove entries matching `address` and `host` exactly. A miss touches
    /// nothing on disk.
    pub fn remove(&self, address: &str, host: &str) -> Result<usize> {
        let mut doc = self.read(true)?;
        let removed = doc.remove_entry(address, host);
        if removed > 0 {
            self.write(&doc)?;
        } else {
            tracing::debug!("No {address} {host} entry in {}", self.path.display());
        }
        Ok(removed)
    }

    pub async fn remove_async(&self, address: &str, host: &str) -> Result<usize> {
        let mut doc = self.read_async(true).await?;
        let removed = doc.remove_entry(address, host);
        if removed > 0 {
            self.write_async(&doc).await?;
        } else {
            tracing::debug!("No {address} {host} entry in {}", self.path.display());
        }
        Ok(removed)
    }

    /// Remove every entry for `host` whatever its address, in one write.
    /// Returns the addresses that were removed.
    pub fn remove_host(&self, host: &str) -> Result<Vec<Address>> {
        let mut doc = self.read(true)?;
        let removed = remove_host_from(&mut doc, host);
        if removed.is_empty() {
            tracing::debug!("No {host} entry in {}", self.path.display());
        } else {
            self.write(&doc)?;
        }
        Ok(removed)
    }

    pub async fn remove_host_async(&self, host: &str) -> Result<Vec<Address>> {
        let mut doc = self.read_async(true).await?;
        let removed = remove_host_from(&mut doc, host);
        if removed.is_empty() {
            tracing::debug!("No {host} entry in {}", self.path.display());
        } else {
            self.write_async(&doc).await?;
        }
        Ok(removed)
    }
}

fn remove_host_from(doc: &mut Document, host: &str) -> Vec<Address> {
    let mut addresses: Vec<Address> = Vec::new();
    for entry in doc.entries().filter(|e| e.host == host) {
        if !addresses.contains(&entry.address) {
            addresses.push(entry.address.clone());
        }
    }
    for address in &addresses {
        doc.remove_entry(address.as_str(), host);
    }
    addresses
}
