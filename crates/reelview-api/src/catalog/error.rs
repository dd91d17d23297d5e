//! Catalog error types.

use thiserror::Error;

/// Errors returned by catalog operations.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum CatalogError {
    /// Transport failure (connect, TLS, timeout, truncated body).
    #[error("catalog unavailable ({path})")]
    RemoteUnavailable {
        /// Endpoint path of the failed request.
        path: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with a non-2xx status other than 404.
    #[error("catalog error (HTTP {status}): {message}")]
    RemoteError {
        /// HTTP status code.
        status: u16,
        /// Remote status message, or the raw body.
        message: String,
    },

    /// The payload did not match the expected shape.
    #[error("failed to decode {path} at `{field}`")]
    Decode {
        /// Endpoint path of the request.
        path: String,
        /// JSON path of the mismatch (`.` for the document root).
        field: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The request was valid but the resource does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// Endpoint path of the missing resource.
        resource: String,
    },

    /// A required configuration value was not supplied.
    #[error("configuration missing: {0} is required")]
    ConfigMissing(&'static str),

    /// The endpoint path could not be joined onto the base URL.
    #[error("invalid request URL for {path}")]
    InvalidUrl {
        /// Endpoint path that failed to join.
        path: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// A movie identifier of zero was supplied.
    #[error("invalid movie id: must be a positive integer")]
    InvalidMovieId,
}

impl CatalogError {
    /// Returns `true` if the failure is worth offering a manual retry for.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RemoteUnavailable { .. } => true,
            Self::RemoteError { status, .. } => *status >= 500 || *status == 429,
            Self::Decode { .. }
            | Self::NotFound { .. }
            | Self::ConfigMissing(_)
            | Self::InvalidUrl { .. }
            | Self::InvalidMovieId => false,
        }
    }

    /// Returns `true` for [`CatalogError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
