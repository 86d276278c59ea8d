//! Configuration loading and hosts path resolution.
//!
//! Supports ETCHOSTS_HOME (config dir) and ETCHOSTS_FILE (target file)
//! env var overrides.

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::platform;

pub const HOME_ENV: &str = "ETCHOSTS_HOME";
pub const FILE_ENV: &str = "ETCHOSTS_FILE";

/// Where etchosts keeps its own configuration.
#[derive(Debug, Clone)]
pub struct EtchostsPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl EtchostsPaths {
    pub fn from_base(base: PathBuf) -> Self {
        let config_file = base.join("config.toml");
        Self {
            config_dir: base,
            config_file,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Default paths (respects ETCHOSTS_HOME).
    pub fn default_paths() -> Self {
        let base = if let Some(home) = std::env::var_os(HOME_ENV) {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("", "", "etchosts") {
            dirs.config_dir().to_path_buf()
        } else {
            PathBuf::from(".etchosts")
        };
        Self::from_base(base)
    }
}

/// config.toml structure.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Hosts file to edit instead of the platform default.
    #[serde(default)]
    pub hosts_file: Option<PathBuf>,
}

impl Config {
    /// Load config (with shared lock when the file exists). Missing file means defaults.
    pub fn load(paths: &EtchostsPaths) -> Result<Config> {
        if !paths.config_file.is_file() {
            return Ok(Config::default());
        }
        let mut file = fs::File::open(&paths.config_file)
            .with_context(|| format!("open {}", paths.config_file.display()))?;
        fs2::FileExt::lock_shared(&file)?;
        let mut s = String::new();
        file.read_to_string(&mut s)?;
        let cfg: Config = toml::from_str(&s)
            .with_context(|| format!("parse {}", paths.config_file.display()))?;
        Ok(cfg)
    }
}

/// Pick the hosts file: explicit flag, then `env`, then config, then the
/// platform default.
pub fn resolve_hosts_path(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    config: &Config,
) -> PathBuf {
    flag.or(env)
        .or_else(|| config.hosts_file.clone())
        .unwrap_or_else(platform::default_hosts_path)
}

/// Resolve the hosts file for this process (reads ETCHOSTS_FILE and config.toml).
pub fn hosts_path(flag: Option<PathBuf>, paths: &EtchostsPaths) -> Result<PathBuf> {
    let env = std::env::var_os(FILE_ENV).map(PathBuf::from);
    let config = Config::load(paths)?;
    let path = resolve_hosts_path(flag, env, &config);
    tracing::debug!("Using hosts file {}", path.display());
    Ok(path)
}
