//! Unified error types for the minbar gateway.
//!
//! Every message carries a stable upper-case code prefix so that callers and
//! logs can classify failures without matching on variants.

/// Unified error type for the content gateway.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Connection failure or timeout that survived every retry.
    #[error("TRANSIENT_TRANSPORT: {0}")]
    TransientTransport(String),

    /// The provider answered with a non-success HTTP status.
    #[error("PROVIDER_ERROR: status {status}")]
    ProviderError { status: u16 },

    /// The provider body did not match the expected schema or envelope.
    #[error("MALFORMED_RESPONSE: {0}")]
    MalformedResponse(String),

    /// No fresh or stale data could be obtained for a request.
    #[error("PROVIDER_UNAVAILABLE: {0}")]
    ProviderUnavailable(String),

    /// Latitude/longitude outside the valid range or not finite.
    #[error("INVALID_COORDINATES: {0}")]
    InvalidCoordinates(String),

    /// Search query shorter than the minimum length.
    #[error("QUERY_TOO_SHORT: {len} chars (min {min})")]
    QueryTooShort { len: usize, min: usize },

    /// Search query longer than the accepted maximum.
    #[error("QUERY_TOO_LONG: {len} chars (max {max})")]
    QueryTooLong { len: usize, max: usize },

    /// Invalid input parameters (e.g., surah number out of range).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid provider URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// An optional capability (e.g., Hijri conversion) is not installed.
    #[error("FEATURE_UNAVAILABLE: {0}")]
    FeatureUnavailable(String),
}

impl Error {
    /// Whether the fetch client may retry the failed call.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::TransientTransport(_))
    }

    /// Stable code prefix for the error, as used in the display string.
    pub fn code(&self) -> &'static str {
        match self {
            Error::TransientTransport(_) => "TRANSIENT_TRANSPORT",
            Error::ProviderError { .. } => "PROVIDER_ERROR",
            Error::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Error::ProviderUnavailable(_) => "PROVIDER_UNAVAILABLE",
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::QueryTooShort { .. } => "QUERY_TOO_SHORT",
            Error::QueryTooLong { .. } => "QUERY_TOO_LONG",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::FeatureUnavailable(_) => "FEATURE_UNAVAILABLE",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedResponse(err.to_string())
    }
}
