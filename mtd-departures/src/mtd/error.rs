//! MTD client error types.

/// Errors from the MTD HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum MtdError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with something other than 200 OK
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// 200 OK, but the body did not have the shape we consume
    #[error("malformed response: {message}")]
    Malformed {
        message: String,
        body: Option<String>,
    },

    /// API key cannot be sent as a query parameter
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),
}

impl MtdError {
    /// Whether this is a transport or status failure, as opposed to a
    /// response we received but could not understand.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, MtdError::Http(_) | MtdError::Api { .. })
    }
}
