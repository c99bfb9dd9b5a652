use serde::{Deserialize, Serialize};

/// Response body of the tailnet device listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevicesResponse {
    /// Devices in the tailnet
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// A tailnet device, as listed by the mesh provider
///
/// The API returns many more fields; only the ones the sync needs are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Machine name, formatted as `<machine>.<tailnet>`
    #[serde(default)]
    pub name: String,

    /// OS-reported hostname (legacy identifier)
    #[serde(default)]
    pub hostname: String,

    /// Tailnet addresses, IPv4 and IPv6 mixed
    #[serde(default)]
    pub addresses: Vec<String>,

    /// Whether the device has been approved into the tailnet
    #[serde(default)]
    pub authorized: bool,
}

impl Device {
    /// Convenience constructor for an authorized device
    #[must_use]
    pub fn authorized<I, S>(name: impl Into<String>, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        Self {
            hostname: name.split('.').next().unwrap_or_default().to_string(),
            name,
            addresses: addresses.into_iter().map(Into::into).collect(),
            authorized: true,
        }
    }
}
