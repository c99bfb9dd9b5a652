//! Command-line argument definitions using clap.

use clap::builder::BoolishValueParser;
use clap::Parser;
use std::path::PathBuf;

use crate::output::OutputFormat;
use crate::telemetry::LogFormat;

/// Synchronizes Tailscale device lists with a Cloudflare (sub)domain.
///
/// 1. GET the devices of the tailnet.
/// 2. For each authorized device, make sure `<machine>.<subdomain>.<zone>`
///    has an A record per IPv4 address.
/// 3. Delete A records under the subdomain whose device is gone.
///
/// Every flag can also be given as the environment variable shown. Switches
/// take an optional value, so `--dry-run=false` or `DRY_RUN=false` turns off
/// a setting from the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "tailflare")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Tailscale API key, usually looks like `tskey-api-...`
    #[arg(long, env = "TAILSCALE_KEY", hide_env_values = true)]
    pub tailscale_key: Option<String>,

    /// Tailscale tailnet name
    #[arg(long, env = "TAILSCALE_TAILNET")]
    pub tailscale_tailnet: Option<String>,

    /// Cloudflare API token
    #[arg(long, env = "CLOUDFLARE_TOKEN", hide_env_values = true)]
    pub cloudflare_token: Option<String>,

    /// Cloudflare zone ID
    #[arg(long, env = "CLOUDFLARE_ZONE")]
    pub cloudflare_zone: Option<String>,

    /// Cloudflare subdomain. Blank means records are created at the apex.
    #[arg(long, env = "CLOUDFLARE_SUBDOMAIN")]
    pub cloudflare_subdomain: Option<String>,

    /// Zone name (e.g. `example.com`). Only needed when the zone has no A records yet.
    #[arg(long, env = "CLOUDFLARE_ZONE_NAME")]
    pub cloudflare_zone_name: Option<String>,

    /// Perform a dry run instead of updating
    #[arg(
        short = 'n',
        long,
        env = "DRY_RUN",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub dry_run: Option<bool>,

    /// Enable debug-level logging
    #[arg(
        short,
        long,
        env = "VERBOSE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub verbose: Option<bool>,

    /// Retain the old behavior of syncing hostnames instead of unique machine names
    #[arg(
        long,
        env = "SYNC_HOSTNAMES",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub sync_hostnames: Option<bool>,

    /// Also rewrite existing records whose address changed
    #[arg(
        long,
        env = "APPLY_UPDATES",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub apply_updates: Option<bool>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,

    /// Print the computed change set to stdout
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// TOML file with any of the settings above
    #[arg(short, long, env = "TAILFLARE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Tailscale API base URL
    #[arg(long, env = "TAILSCALE_API_URL", hide = true)]
    pub tailscale_api_url: Option<String>,

    /// Cloudflare API base URL
    #[arg(long, env = "CLOUDFLARE_API_URL", hide = true)]
    pub cloudflare_api_url: Option<String>,
}
