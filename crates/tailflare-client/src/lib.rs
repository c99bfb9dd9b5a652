//! HTTP clients for the Tailscale and Cloudflare APIs.
//!
//! One [`ApiClient`] type serves both providers; only the base URL and the
//! authentication scheme differ. Endpoints are grouped per resource:
//! [`ApiClient::tailnet`] for the device roster and [`ApiClient::zone`] for
//! DNS records.

#![doc(html_root_url = "https://docs.rs/tailflare-client/0.3.0")]

mod client;
mod config;
pub mod api;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::*;
pub use tailflare_core::{Result, SyncError};
