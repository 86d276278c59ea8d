//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{self, EtchostsPaths};
use crate::error::HostsError;
use crate::hosts::{read_document, HostsFile};
use crate::line::Entry;

#[derive(Parser)]
#[command(name = "etchosts")]
#[command(about = "Scriptable editing of the hosts file")]
pub struct Cli {
    /// Hosts file to edit (default: ETCHOSTS_FILE, config.toml, then the system hosts file)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List host entries
    #[command(alias = "ls")]
    List {
        /// Also print comments, blank lines and other non-entry lines
        #[arg(long)]
        all: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a host entry, or point existing entries for the host at a new address
    Set {
        /// IPv4/IPv6 address, or "local"/"localhost" for 127.0.0.1
        ip: String,
        host: String,
        comment: Option<String>,
    },
    /// Remove every entry for a host
    Remove { host: String },
    /// Set every entry listed in a hosts-format file
    Load { file: PathBuf },
    /// Remove every host listed in a hosts-format file
    Unload { file: PathBuf },
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let paths = EtchostsPaths::default_paths();
    let hosts = HostsFile::new(config::hosts_path(cli.file, &paths)?);

    match cli.command {
        Commands::List { all, json } => cmd_list(&hosts, all, json),
        Commands::Set { ip, host, comment } => {
            cmd_set(&hosts, &ip, &host, comment.as_deref()).map(|_| ())
        }
        Commands::Remove { host } => cmd_remove(&hosts, &host).map(|_| ()),
        Commands::Load { file } => cmd_load(&hosts, &file),
        Commands::Unload { file } => cmd_unload(&hosts, &file),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Permission failures get a hint to re-run elevated.
fn hint(e: HostsError) -> anyhow::Error {
    if e.is_permission_denied() {
        anyhow::anyhow!("{e}. Are you running as root?")
    } else {
        e.into()
    }
}

fn cmd_list(hosts: &HostsFile, all: bool, json: bool) -> Result<()> {
    let doc = hosts.read(all).map_err(hint)?;
    if json {
        println!("{}", serde_json::to_string_pretty(doc.lines())?);
    } else {
        for line in &doc {
            println!("{line}");
        }
    }
    Ok(())
}

fn cmd_set(hosts: &HostsFile, ip: &str, host: &str, comment: Option<&str>) -> Result<usize> {
    set_entry(hosts, Entry::parse(ip, host, comment)?)
}

/// Returns 1 if the host was newly added.
fn set_entry(hosts: &HostsFile, entry: Entry) -> Result<usize> {
    let host = entry.host.clone();
    let matched = hosts.set(entry).map_err(hint)?;
    if matched == 0 {
        println!("Added: {host}");
        Ok(1)
    } else {
        println!("Updated: {host}");
        Ok(0)
    }
}

/// Returns how many entries were removed.
fn cmd_remove(hosts: &HostsFile, host: &str) -> Result<usize> {
    let removed = hosts.remove_host(host).map_err(hint)?;
    if removed.is_empty() {
        println!("Not found: {host}");
    }
    for address in &removed {
        println!("Removed: {address} {host}");
    }
    Ok(removed.len())
}

fn cmd_load(hosts: &HostsFile, file: &Path) -> Result<()> {
    let source = read_document(file, false).with_context(|| format!("load {}", file.display()))?;
    let mut added = 0;
    for entry in source.entries() {
        added += set_entry(hosts, entry.clone())?;
    }
    println!("Added {added} hosts");
    Ok(())
}

fn cmd_unload(hosts: &HostsFile, file: &Path) -> Result<()> {
    let source =
        read_document(file, false).with_context(|| format!("unload {}", file.display()))?;
    let mut removed = 0;
    for entry in source.entries() {
        removed += cmd_remove(hosts, &entry.host)?;
    }
    println!("Removed {removed} hosts");
    Ok(())
}
