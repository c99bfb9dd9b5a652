use thiserror::Error;

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that abort a sync run
#[derive(Error, Debug)]
pub enum SyncError {
    /// Missing or malformed configuration, detected before any mutation
    #[error("configuration error: {0}")]
    Config(String),

    /// Request could not be sent or the response body could not be read
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider answered with a status outside the expected success range
    #[error("provider returned {status}: {body}")]
    Protocol {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body did not match the expected schema
    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// More than one existing record shares a desired record name
    #[error("{count} records share the name {record_name}; refusing to guess which one to keep")]
    Ambiguous {
        /// Fully-qualified record name
        record_name: String,
        /// Number of records found under that name
        count: usize,
    },
}

impl SyncError {
    /// Returns the HTTP status code if the provider rejected a request
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the error was raised before talking to either provider
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
