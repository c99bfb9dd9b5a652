//! Turning the device roster into the desired identifier → addresses mapping.

use crate::diagnostics::{Diagnostics, SkipReason, Warning};
use crate::types::Device;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};

/// Desired state: identifier → IPv4 addresses, ordered by identifier
pub type DesiredMapping = BTreeMap<String, Vec<Ipv4Addr>>;

/// Identifiers published by the mesh provider itself, never synced
pub const DENY_LIST: &[&str] = &["hello.ipn.dev", "hello.tailscale.com"];

/// How a device's identifier is derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierMode {
    /// Strip `.<tailnet>` from the unique machine name
    #[default]
    MachineName,
    /// Use the OS hostname verbatim (older behavior, not unique)
    Hostname,
}

/// Derive a device's identifier under the given mode
#[must_use]
pub fn identifier<'a>(device: &'a Device, tailnet: &str, mode: IdentifierMode) -> &'a str {
    match mode {
        IdentifierMode::Hostname => device.hostname.as_str(),
        IdentifierMode::MachineName => device
            .name
            .strip_suffix(tailnet)
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|_| !tailnet.is_empty())
            .unwrap_or(device.name.as_str()),
    }
}

/// Keep only the IPv4 addresses, reporting strings that are not IPs at all
pub fn ipv4_addresses(
    identifier: &str,
    addresses: &[String],
    diag: &mut impl Diagnostics,
) -> Vec<Ipv4Addr> {
    addresses
        .iter()
        .filter_map(|raw| match raw.parse::<IpAddr>() {
            Ok(IpAddr::V4(v4)) => Some(v4),
            Ok(IpAddr::V6(_)) => None,
            Err(_) => {
                diag.warn(Warning::UnparseableAddress {
                    identifier: identifier.to_string(),
                    address: raw.clone(),
                });
                None
            }
        })
        .collect()
}

/// Build the desired mapping from a device roster
///
/// Unauthorized and deny-listed devices are left out. A device whose
/// addresses are all IPv6 or invalid still gets a key with an empty list.
/// When two devices share an identifier, the later one wins.
pub fn desired_mapping(
    devices: &[Device],
    tailnet: &str,
    mode: IdentifierMode,
    diag: &mut impl Diagnostics,
) -> DesiredMapping {
    let mut mapping = DesiredMapping::new();

    for device in devices {
        let name = identifier(device, tailnet, mode);

        if !device.authorized {
            diag.skipped(name, SkipReason::Unauthorized);
            continue;
        }
        if DENY_LIST.contains(&name) {
            diag.skipped(name, SkipReason::DenyListed);
            continue;
        }

        let addresses = ipv4_addresses(name, &device.addresses, diag);
        if mapping.insert(name.to_string(), addresses).is_some() {
            diag.warn(Warning::DuplicateIdentifier {
                identifier: name.to_string(),
            });
        }
    }

    mapping
}
