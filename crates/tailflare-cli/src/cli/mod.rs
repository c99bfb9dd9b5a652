//! CLI argument parsing and the sync run.

pub mod args;

use anyhow::{Context as _, Result};
use args::Cli;
use clap::Parser;
use tailflare::{
    ApiClient, Auth, LogDiagnostics, Outcome, Synchronizer, CLOUDFLARE_API_URL, TAILSCALE_API_URL,
};
use tracing::info;

use crate::config::{self, Config, Settings};
use crate::output;
use crate::telemetry;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // No subscriber yet, so these two report on stderr directly.
    let file = match Config::load(cli.config.as_deref()) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("tailflare: {err:#}");
            return Err(err);
        }
    };
    let (verbose, log_format) = config::logging(&cli, &file);
    if let Err(err) = telemetry::init(verbose, log_format) {
        eprintln!("tailflare: {err:#}");
        return Err(err);
    }

    // Everything else that can fail without the network fails here.
    let settings = Settings::resolve(&cli, file)?;

    let tailscale = client(
        settings.tailscale_api_url.as_deref(),
        TAILSCALE_API_URL,
        Auth::Basic(settings.tailscale_key.clone()),
    )?;
    let cloudflare = client(
        settings.cloudflare_api_url.as_deref(),
        CLOUDFLARE_API_URL,
        Auth::Bearer(settings.cloudflare_token.clone()),
    )?;

    let sync = Synchronizer::new(
        tailscale.tailnet(settings.options.tailnet.as_str()),
        cloudflare.zone(settings.zone_id.as_str()),
        settings.options,
    )?;

    let plan = sync
        .plan(&mut LogDiagnostics)
        .await
        .context("computing DNS changes")?;

    if let Some(format) = cli.output {
        output::print_plan(&plan, format)?;
    }

    match sync.execute(plan).await.context("applying DNS changes")? {
        Outcome::DryRun => info!("dry run complete"),
        Outcome::Applied(summary) => info!(
            created = summary.created,
            updated = summary.updated,
            deleted = summary.deleted,
            "sync complete"
        ),
    }

    Ok(())
}

/// Build a client against `base_url`, or the public API when unset
fn client(base_url: Option<&str>, default: &str, auth: Auth) -> Result<ApiClient> {
    Ok(ApiClient::builder(base_url.unwrap_or(default), auth).build()?)
}
