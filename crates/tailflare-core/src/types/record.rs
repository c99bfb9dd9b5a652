use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// The only record type the sync manages
pub const ADDRESS_RECORD_TYPE: &str = "A";

/// TTL value Cloudflare interprets as "automatic"
pub const AUTOMATIC_TTL: u32 = 1;

/// Standard Cloudflare v4 response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Whether the API call succeeded
    #[serde(default)]
    pub success: bool,

    /// Error objects, passed through untouched
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,

    /// Informational messages
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,

    /// Call result
    pub result: T,
}

/// An existing DNS record in the zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned record identifier
    pub id: String,

    /// Record type (always `A` for records the sync fetches)
    #[serde(rename = "type", default)]
    pub record_type: String,

    /// Fully-qualified record name
    pub name: String,

    /// Record value, a single address
    #[serde(default)]
    pub content: String,

    /// Name of the zone the record lives in
    #[serde(default)]
    pub zone_name: String,

    /// TTL in seconds (1 = automatic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    /// Whether traffic is proxied through Cloudflare
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl DnsRecord {
    /// Build an unproxied `A` record, mostly useful for fixtures
    #[must_use]
    pub fn address(
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
        zone_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            record_type: ADDRESS_RECORD_TYPE.to_string(),
            name: name.into(),
            content: content.into(),
            zone_name: zone_name.into(),
            ttl: Some(AUTOMATIC_TTL),
            proxied: Some(false),
        }
    }

    /// Parse the record content as an IPv4 address
    #[must_use]
    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        self.content.parse().ok()
    }
}

/// Body of a record creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,

    /// Fully-qualified record name
    pub name: String,

    /// Single address
    pub content: String,

    /// TTL in seconds
    pub ttl: u32,

    /// Always false for tailnet addresses
    pub proxied: bool,
}

impl NewRecord {
    /// An unproxied `A` record with automatic TTL
    #[must_use]
    pub fn address(name: impl Into<String>, addr: Ipv4Addr) -> Self {
        Self {
            record_type: ADDRESS_RECORD_TYPE.to_string(),
            name: name.into(),
            content: addr.to_string(),
            ttl: AUTOMATIC_TTL,
            proxied: false,
        }
    }
}

/// Body of a record content update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    /// New address
    pub content: String,
}

/// Result of a record deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRecord {
    /// Identifier of the removed record
    pub id: String,
}
