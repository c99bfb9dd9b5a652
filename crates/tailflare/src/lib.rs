//! Keep a Cloudflare DNS zone in sync with the devices of a Tailscale tailnet.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tailflare::{ApiClient, LogDiagnostics, SyncOptions, Synchronizer};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> tailflare::Result<()> {
//!     let tailscale = ApiClient::tailscale("tskey-api-...")?;
//!     let cloudflare = ApiClient::cloudflare("cf-token")?;
//!
//!     let sync = Synchronizer::new(
//!         tailscale.tailnet("example.com"),
//!         cloudflare.zone("023e105f4ecef8ad9ca31a8372d0c353"),
//!         SyncOptions {
//!             tailnet: "example.com".into(),
//!             subdomain: "ts".into(),
//!             dry_run: true,
//!             ..Default::default()
//!         },
//!     )?;
//!
//!     let plan = sync.plan(&mut LogDiagnostics).await?;
//!     println!("{} records to create", plan.changes.create_count());
//!     sync.execute(plan).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/tailflare/0.3.0")]

mod apply;
mod source;
mod sync;
#[cfg(test)]
mod testing;

// Re-export core types
pub use tailflare_core::*;

// Re-export client
pub use tailflare_client::{
    api, ApiClient, ApiClientBuilder, Auth, CLOUDFLARE_API_URL, RECORDS_PAGE_SIZE,
    TAILSCALE_API_URL,
};

pub use apply::{apply, MutationSummary};
pub use source::{DeviceSource, RecordStore};
pub use sync::{Outcome, Plan, SyncOptions, Synchronizer};
