//! Configuration management.
//!
//! Settings come from flags, their environment variables, and an optional
//! TOML file. A value given on the command line or in the environment wins
//! over the file.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tailflare::{IdentifierMode, SyncError, SyncOptions};

use crate::cli::args::Cli;
use crate::telemetry::LogFormat;

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tailscale API key.
    pub tailscale_key: Option<String>,

    /// Tailnet name.
    pub tailscale_tailnet: Option<String>,

    /// Cloudflare API token.
    pub cloudflare_token: Option<String>,

    /// Cloudflare zone ID.
    pub cloudflare_zone: Option<String>,

    /// Subdomain under the zone.
    pub cloudflare_subdomain: Option<String>,

    /// Zone name override.
    pub cloudflare_zone_name: Option<String>,

    pub dry_run: Option<bool>,

    pub sync_hostnames: Option<bool>,

    pub apply_updates: Option<bool>,

    /// Debug-level logging.
    pub verbose: Option<bool>,

    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Default config file path.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tailflare").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `explicit`, or from the default path when it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file just yields empty settings.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => match Self::path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

/// Logging settings, merged the same way as everything else.
///
/// Needed before [`Settings::resolve`] so its errors are logged.
pub fn logging(cli: &Cli, file: &Config) -> (bool, LogFormat) {
    let verbose = cli.verbose.or(file.verbose).unwrap_or(false);
    let format = cli.log_format.or(file.log_format).unwrap_or_default();
    (verbose, format)
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub tailscale_key: String,
    pub cloudflare_token: String,
    pub zone_id: String,
    pub options: SyncOptions,
    pub tailscale_api_url: Option<String>,
    pub cloudflare_api_url: Option<String>,
}

impl Settings {
    /// Merge the command line over the file and check every required value.
    pub fn resolve(cli: &Cli, file: Config) -> Result<Self, SyncError> {
        let tailscale_key = required(
            cli.tailscale_key.clone().or(file.tailscale_key),
            "--tailscale-key",
            "TAILSCALE_KEY",
        )?;
        let tailnet = required(
            cli.tailscale_tailnet.clone().or(file.tailscale_tailnet),
            "--tailscale-tailnet",
            "TAILSCALE_TAILNET",
        )?;
        let cloudflare_token = required(
            cli.cloudflare_token.clone().or(file.cloudflare_token),
            "--cloudflare-token",
            "CLOUDFLARE_TOKEN",
        )?;
        let zone_id = required(
            cli.cloudflare_zone.clone().or(file.cloudflare_zone),
            "--cloudflare-zone",
            "CLOUDFLARE_ZONE",
        )?;

        let mode = if cli.sync_hostnames.or(file.sync_hostnames).unwrap_or(false) {
            IdentifierMode::Hostname
        } else {
            IdentifierMode::MachineName
        };

        let options = SyncOptions {
            tailnet,
            subdomain: cli
                .cloudflare_subdomain
                .clone()
                .or(file.cloudflare_subdomain)
                .unwrap_or_default(),
            zone_name: cli
                .cloudflare_zone_name
                .clone()
                .or(file.cloudflare_zone_name)
                .filter(|name| !name.is_empty()),
            mode,
            dry_run: cli.dry_run.or(file.dry_run).unwrap_or(false),
            apply_updates: cli.apply_updates.or(file.apply_updates).unwrap_or(false),
        };

        options.validate().map_err(|err| match err {
            SyncError::Config(msg) if msg.contains("subdomain") => SyncError::Config(format!(
                "{msg} (set by --cloudflare-subdomain / CLOUDFLARE_SUBDOMAIN)"
            )),
            SyncError::Config(msg) if msg.contains("zone name") => SyncError::Config(format!(
                "{msg} (set by --cloudflare-zone-name / CLOUDFLARE_ZONE_NAME)"
            )),
            other => other,
        })?;

        Ok(Self {
            tailscale_key,
            cloudflare_token,
            zone_id,
            options,
            tailscale_api_url: cli.tailscale_api_url.clone(),
            cloudflare_api_url: cli.cloudflare_api_url.clone(),
        })
    }
}

fn required(value: Option<String>, flag: &str, env: &str) -> Result<String, SyncError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SyncError::Config(format!("{flag} / {env} must be set")))
}
