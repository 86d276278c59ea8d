//! Line classification: one raw hosts-file line to an entry or an opaque line.
//!
//! Entry grammar:
//!
//! ```text
//! line    = [ws] address ws host [ws] [comment]
//! address = IPv4 or IPv6 literal, kept as written
//! host    = 1*( ALPHA / DIGIT / "_" / "." / "-" / ws )   ; trimmed
//! comment = "# " *ANY
//! ```
//!
//! Anything else (blank lines, comment-only lines, garbage) is opaque.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{HostsError, Result};

/// Address family of an entry. Entries for the same host in different
/// families never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    pub fn of(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }
}

/// An address literal exactly as written, with its parsed value.
///
/// Equality is on the text, so `::1` and `0:0:0:0:0:0:0:1` differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    text: String,
    ip: IpAddr,
}

impl Address {
    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn family(&self) -> Family {
        Family::of(&self.ip)
    }
}

impl FromStr for Address {
    type Err = std::net::AddrParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self {
            ip: s.parse()?,
            text: s.to_string(),
        })
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        Self {
            text: ip.to_string(),
            ip,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Structured address-to-host mapping.
///
/// `host` is the whole host token, aliases included ("a.test b.test" stays one
/// token).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub address: Address,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Entry {
    pub fn new(address: impl Into<Address>, host: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            host: host.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.is_empty()).then_some(comment);
        self
    }

    /// Build an entry from user input. `local` and `localhost` stand for the
    /// IPv4 loopback address.
    pub fn parse(address: &str, host: &str, comment: Option<&str>) -> Result<Self> {
        let address: Address = match address {
            "local" | "localhost" => IpAddr::V4(Ipv4Addr::LOCALHOST).into(),
            other => other
                .parse()
                .map_err(|_| HostsError::InvalidAddress(other.to_string()))?,
        };
        let host = host.trim();
        if !is_host_token(host) {
            return Err(HostsError::InvalidHost(host.to_string()));
        }
        let entry = Entry::new(address, host);
        Ok(match comment {
            Some(c) => entry.with_comment(c),
            None => entry,
        })
    }

    pub fn family(&self) -> Family {
        self.address.family()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.address, self.host)?;
        if let Some(comment) = &self.comment {
            write!(f, " # {comment}")?;
        }
        Ok(())
    }
}

/// One line of a hosts file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Line {
    Entry(Entry),
    /// Blank, comment-only or unrecognised line, kept verbatim.
    Opaque(String),
}

impl Line {
    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            Line::Entry(e) => Some(e),
            Line::Opaque(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Line::Opaque(raw) if raw.trim().is_empty())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Entry(e) => fmt::Display::fmt(e, f),
            Line::Opaque(raw) => f.write_str(raw),
        }
    }
}

/// Classify a raw line (without its terminator). Never fails.
pub fn classify(raw: &str) -> Line {
    match parse_entry(raw) {
        Some(entry) => Line::Entry(entry),
        None => Line::Opaque(raw.to_string()),
    }
}

fn parse_entry(raw: &str) -> Option<Entry> {
    let (body, comment) = split_comment(raw)?;
    let body = body.trim_start();
    let (address, host) = body.split_at(body.find(char::is_whitespace)?);
    let address: Address = address.parse().ok()?;
    let host = host.trim();
    if !is_host_token(host) {
        return None;
    }
    let entry = Entry::new(address, host);
    Some(match comment {
        Some(c) => entry.with_comment(c),
        None => entry,
    })
}

/// Split off a `# ` comment. A `#` not followed by a space makes the line opaque.
fn split_comment(raw: &str) -> Option<(&str, Option<&str>)> {
    match raw.split_once('#') {
        None => Some((raw, None)),
        Some((body, rest)) => Some((body, Some(rest.strip_prefix(' ')?))),
    }
}

/// Whether `host` (already trimmed) is a valid host token.
pub fn is_host_token(host: &str) -> bool {
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') || c.is_whitespace())
}
