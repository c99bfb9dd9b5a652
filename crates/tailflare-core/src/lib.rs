//! Core types and reconciliation logic for tailflare.
//!
//! This crate has no I/O. It provides:
//!
//! - **Types**: the tailnet device roster and Cloudflare DNS record payloads
//! - **Errors**: the run-aborting [`SyncError`] taxonomy
//! - **Normalization**: device → identifier and IPv4 address list
//! - **Reconciliation**: desired state vs. zone records → [`ChangeSet`]
//!
//! # Example
//!
//! ```rust
//! use tailflare_core::{desired_mapping, reconcile, Device, IdentifierMode, RecordSuffix};
//!
//! let devices = vec![Device::authorized("node-a.example.ts.net", ["100.64.0.1"])];
//! let mut warnings = Vec::new();
//! let desired = desired_mapping(
//!     &devices,
//!     "example.ts.net",
//!     IdentifierMode::MachineName,
//!     &mut warnings,
//! );
//!
//! let suffix = RecordSuffix::new("example.com", "tailnet").unwrap();
//! let changes = reconcile(&desired, &[], &suffix, &mut warnings).unwrap();
//! assert_eq!(changes.create_count(), 1);
//! assert!(changes.to_create().contains_key("node-a.tailnet.example.com"));
//! ```

#![doc(html_root_url = "https://docs.rs/tailflare-core/0.3.0")]

mod diagnostics;
mod error;
mod normalize;
mod reconcile;
pub mod types;
mod zone;

pub use diagnostics::{Diagnostics, LogDiagnostics, SkipReason, Warning};
pub use error::{Result, SyncError};
pub use normalize::{
    desired_mapping, identifier, ipv4_addresses, DesiredMapping, IdentifierMode, DENY_LIST,
};
pub use reconcile::{reconcile, ChangeSet, RecordUpdate};
pub use types::*;
pub use zone::{
    group_by_name, validate_subdomain, zone_name_from_records, RecordSuffix, RecordsByName,
};
