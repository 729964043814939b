//! Application configuration management.
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config <FILE>`, or `config.toml` in the platform config
//!    directory, e.g. `~/.config/dupscan/config.toml` on Linux)
//! 3. Environment variables prefixed `DUPSCAN_` (e.g. `DUPSCAN_MIN_SIZE=1MiB`)
//! 4. Command-line flags ([`Config::merge_cli`])
//!
//! ```toml
//! min_size = "16KiB"
//! parallelism = 4
//! thorough = false
//! output = "csv"
//! exclusions_file = "/home/me/.dupscan-ignore"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Deserializer, Serialize};

use crate::cli::Cli;
use crate::duplicates::default_parallelism;
use crate::size::parse_size;

/// Default minimum file size: 4 KiB.
pub const DEFAULT_MIN_SIZE: u64 = 4 * 1024;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "DUPSCAN_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum file size in bytes; accepts `4096` or `"4KiB"`
    #[serde(deserialize_with = "deserialize_size")]
    pub min_size: u64,
    /// Hashing workers; 0 picks processors minus one
    pub parallelism: usize,
    /// Hash entire files with SHA-256
    pub thorough: bool,
    /// Report mode name (`text`, `csv`, `json` or `stdout`)
    pub output: String,
    /// Exclusions file; the built-in list is used when unset
    pub exclusions_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            parallelism: 0,
            thorough: false,
            output: "text".to_string(),
            exclusions_file: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeValue {
    Bytes(u64),
    Text(String),
}

fn deserialize_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match SizeValue::deserialize(deserializer)? {
        SizeValue::Bytes(n) => Ok(n),
        SizeValue::Text(s) => parse_size(&s).map_err(serde::de::Error::custom),
    }
}

impl Config {
    /// Load defaults, the config file and the environment.
    ///
    /// `explicit` overrides the platform config path. A broken config file
    /// is reported as a warning and defaults are used instead.
    #[must_use]
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load_from_path(path),
            None => Self::load_from_figment(Figment::from(Serialized::defaults(Self::default()))),
        }
    }

    /// Load from a specific TOML file (missing files are fine), then the environment.
    #[must_use]
    pub fn load_from_path(path: PathBuf) -> Self {
        log::debug!("Loading configuration from {}", path.display());
        Self::load_from_figment(
            Figment::from(Serialized::defaults(Self::default())).merge(Toml::file(path)),
        )
    }

    fn load_from_figment(figment: Figment) -> Self {
        let figment = figment.merge(Env::prefixed(ENV_PREFIX));
        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Platform-specific configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "dupscan").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply command-line flags on top of the loaded settings.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(min_size) = cli.min_size {
            self.min_size = min_size;
        }
        if let Some(parallelism) = cli.parallelism {
            self.parallelism = parallelism;
        }
        if cli.thorough {
            self.thorough = true;
        }
        if let Some(ref output) = cli.output {
            self.output.clone_from(output);
        }
        if let Some(ref exclusions) = cli.exclusions {
            self.exclusions_file = Some(exclusions.clone());
        }
    }

    /// Worker count with 0 resolved to the default.
    #[must_use]
    pub fn effective_parallelism(&self) -> usize {
        if self.parallelism == 0 {
            default_parallelism()
        } else {
            self.parallelism
        }
    }
}
