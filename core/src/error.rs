//! Error types for the monitoring API client.
//!
//! # Design
//! Building requests never fails, so these errors only come out of the
//! `parse_*` functions and the blocking transport. `NotFound` gets a
//! dedicated variant; every other non-2xx response lands in `Http` with the
//! raw status and body. A 2xx response whose envelope reports a failure
//! becomes `Backend`, carrying the backend's own code and message.

use thiserror::Error;

/// Errors returned by the `parse_*` functions.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The envelope decoded but its `code` was not 200.
    #[error("backend error {code}: {message}")]
    Backend { code: i32, message: String },

    /// The envelope reported success but carried no `data`.
    #[error("response envelope has no data")]
    MissingData,

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// Errors produced by [`crate::UreqTransport`] before a response exists.
#[cfg(feature = "blocking")]
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("reading response body from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: ureq::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_backend_message() {
        let err = ApiError::Backend {
            code: 500,
            message: "product not found".to_string(),
        };
        assert_eq!(err.to_string(), "backend error 500: product not found");
    }

    #[test]
    fn display_includes_http_status() {
        let err = ApiError::Http {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
    }
}
