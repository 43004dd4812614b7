use reqwest::StatusCode;
use thiserror::Error;

use crate::transport::Response;

/// Boxed error from a transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by every job operation.
///
/// Variants that come from a server answer carry the response metadata.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request URL could not be built. Nothing was sent.
    #[error("invalid request url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request body could not be encoded. Nothing was sent.
    #[error("encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Connectivity, timeout or TLS failure.
    #[error("transport: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a non-success status.
    #[error("server returned {}: {body}", response.status)]
    Status { response: Response, body: String },

    /// The response body did not match the expected shape.
    #[error("decode response body ({}): {source}", response.status)]
    Decode {
        response: Response,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Wraps any transport-level failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Transport(err.into())
    }

    /// Response metadata, when the server answered at all.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Status { response, .. } | Self::Decode { response, .. } => Some(response),
            Self::InvalidUrl { .. } | Self::Encode(_) | Self::Transport(_) => None,
        }
    }

    /// Shorthand for `self.response().map(|r| r.status)`.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }
}
