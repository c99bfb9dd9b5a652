//! tailflare - sync a Tailscale tailnet into Cloudflare DNS
//!
//! Meant to be run from cron or a systemd timer; exits non-zero on any error.

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match tailflare_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(
                error = format!("{err:#}"),
                "error synchronizing Tailscale -> Cloudflare records"
            );
            ExitCode::FAILURE
        }
    }
}
