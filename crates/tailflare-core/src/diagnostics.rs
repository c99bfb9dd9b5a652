//! Non-fatal findings raised while building and diffing state.
//!
//! Normalization and reconciliation never log directly. They report
//! [`Warning`]s to a caller-supplied [`Diagnostics`] sink, so the same code
//! can feed `tracing` in the binary and a plain `Vec` in tests.

use serde::Serialize;
use std::fmt;

/// A soft problem that does not stop the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A device address was not an IP literal and was skipped
    UnparseableAddress {
        /// Identifier of the device carrying the address
        identifier: String,
        /// The raw address string
        address: String,
    },

    /// Two devices normalized to the same identifier; the later one won
    DuplicateIdentifier {
        /// The shared identifier
        identifier: String,
    },

    /// The record listing filled a whole page, so records may be missing
    PageCeiling {
        /// Number of records received
        count: usize,
    },

    /// An existing record matches a device that has no IPv4 address left
    NoAddressForExisting {
        /// Fully-qualified record name
        record_name: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparseableAddress { identifier, address } => {
                write!(f, "skipping unparseable address {address:?} on {identifier}")
            }
            Self::DuplicateIdentifier { identifier } => write!(
                f,
                "found multiple devices named {identifier}; the last listed one will be used"
            ),
            Self::PageCeiling { count } => write!(
                f,
                "received {count} DNS records, a full page; pagination is not supported \
                 so some records may be missing"
            ),
            Self::NoAddressForExisting { record_name } => write!(
                f,
                "{record_name} exists but its device has no IPv4 address; leaving it alone"
            ),
        }
    }
}

/// Why a device was left out of the desired mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not yet approved into the tailnet
    Unauthorized,
    /// One of the mesh provider's own hosts
    DenyListed,
}

/// Sink for [`Warning`]s
pub trait Diagnostics {
    /// Record one warning
    fn warn(&mut self, warning: Warning);

    /// A device was deliberately excluded. Ignored unless overridden.
    fn skipped(&mut self, _identifier: &str, _reason: SkipReason) {}
}

impl Diagnostics for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Forwards every warning to `tracing` at WARN level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&mut self, warning: Warning) {
        match &warning {
            Warning::UnparseableAddress { identifier, address } => {
                tracing::warn!(%identifier, %address, "{warning}");
            }
            Warning::DuplicateIdentifier { identifier } => {
                tracing::warn!(%identifier, "{warning}");
            }
            Warning::PageCeiling { count } => tracing::warn!(count, "{warning}"),
            Warning::NoAddressForExisting { record_name } => {
                tracing::warn!(%record_name, "{warning}");
            }
        }
    }

    fn skipped(&mut self, identifier: &str, reason: SkipReason) {
        match reason {
            SkipReason::Unauthorized => tracing::info!(identifier, "skipping unauthorized device"),
            SkipReason::DenyListed => tracing::debug!(identifier, "skipping deny-listed device"),
        }
    }
}
