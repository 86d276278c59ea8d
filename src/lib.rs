//! etchosts - structured, scriptable edits of the hosts file.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod hosts;
pub mod line;
pub mod platform;
pub mod writer;

pub use document::Document;
pub use error::HostsError;
pub use hosts::{read_document, read_document_async, HostsFile};
pub use line::{classify, Address, Entry, Family, Line};
