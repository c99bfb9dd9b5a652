//! Client configuration types.

use std::fmt;
use std::time::Duration;

/// Tailscale API v2 base URL
pub const TAILSCALE_API_URL: &str = "https://api.tailscale.com/api/v2";

/// Cloudflare API v4 base URL
pub const CLOUDFLARE_API_URL: &str = "https://api.cloudflare.com/client/v4";

/// Records requested per listing call; pagination is not followed
pub const RECORDS_PAGE_SIZE: usize = 100;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How requests authenticate
#[derive(Clone)]
pub enum Auth {
    /// HTTP basic auth with the key as username and an empty password
    Basic(String),
    /// `Authorization: Bearer <token>`
    Bearer(String),
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(_) => f.write_str("Basic(<redacted>)"),
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

/// Status codes a call accepts as success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessRange {
    /// Only `200 OK`; used for listings
    Ok,
    /// `200` through `202 Accepted`; used for mutations
    UpToAccepted,
}

impl SuccessRange {
    /// Whether `status` counts as success
    #[must_use]
    pub const fn contains(self, status: u16) -> bool {
        match self {
            Self::Ok => status == 200,
            Self::UpToAccepted => status >= 200 && status <= 202,
        }
    }
}
