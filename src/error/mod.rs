//! Error types for the Amadeus proxy.
//!
//! Every failure is terminal for the request it occurred in: nothing is
//! retried, and each variant maps to exactly one response envelope at the
//! server boundary.

use thiserror::Error;

/// Root error type for the proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The OAuth2 credentials grant was rejected by the provider.
    #[error("token grant failed with status {status}: {body}")]
    Token {
        /// HTTP status returned by the token endpoint.
        status: u16,
        /// Raw response body from the token endpoint.
        body: String,
    },

    /// The upstream flight-offers search returned a non-success status.
    #[error("flight offers search failed with status {status}")]
    Api {
        /// HTTP status returned by the search endpoint.
        status: u16,
        /// Response body, parsed as JSON when possible, raw text otherwise.
        detail: serde_json::Value,
    },

    /// Malformed input, transport failure, or any other internal error.
    #[error("{message}")]
    Uncaught {
        /// String form of the underlying error.
        message: String,
    },

    /// Invalid or missing configuration.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the problem.
        message: String,
    },
}

impl ProxyError {
    /// Wire code used in the response envelope.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Token { .. } => "TOKEN_ERROR",
            Self::Api { .. } => "API_ERROR",
            Self::Uncaught { .. } | Self::Configuration { .. } => "UNCAUGHT",
        }
    }

    /// Creates an uncaught error from anything displayable.
    pub fn uncaught(err: impl std::fmt::Display) -> Self {
        Self::Uncaught {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        Self::uncaught(err)
    }
}

/// Result type for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Interprets an upstream response body as JSON when possible, falling back
/// to the raw text. Used for the `detail` field of error envelopes so callers
/// see structured provider errors when the provider sent them.
pub fn detail_from_body(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
}
