//! Error types for request construction and execution.
//!
//! Construction-time variants (`InvalidProxyKind`, `MalformedProxyUrl`,
//! `DialerConstruction`, `RequestConstruction`, `BodyEncoding`) are captured by
//! the builder and only surface from `send`/`send_with_struct`.

use crate::request::{Method, Response, UrlError};
use crate::transport::TransportError;

/// Errors produced by the request pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Proxy kind outside {http, socks5, http+socks5}.
    #[error("invalid proxy kind: {0}")]
    InvalidProxyKind(String),

    /// The HTTP proxy URL composed from the config did not parse.
    /// Only the `host:port` is kept so credentials never end up in logs.
    #[error("malformed proxy URL for {address}: {source}")]
    MalformedProxyUrl {
        address: String,
        #[source]
        source: url::ParseError,
    },

    /// SOCKS5 dialer could not be set up for the endpoint.
    #[error("cannot set up SOCKS5 dialer for {address}: {reason}")]
    DialerConstruction { address: String, reason: String },

    /// Bad URL (unparsable, relative, or not http/https) for the requested method.
    #[error("cannot build {method} request for {url}: {source}")]
    RequestConstruction {
        method: Method,
        url: String,
        #[source]
        source: UrlError,
    },

    /// `send` was called before `head`, `get` or `post`.
    #[error("no request to send: call head, get or post first")]
    MissingRequest,

    /// Request body could not be serialized.
    #[error("cannot encode request body: {0}")]
    BodyEncoding(#[source] serde_json::Error),

    /// Network-level failure of the last attempt.
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),

    /// The response arrived but its body was not the expected JSON.
    /// The response (with its body drained) is returned alongside.
    #[error("cannot decode response body (HTTP {}): {source}", response.status)]
    Decode {
        response: Box<Response>,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// True for errors captured while configuring the builder, before any
    /// network activity.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Error::InvalidProxyKind(_)
                | Error::MalformedProxyUrl { .. }
                | Error::DialerConstruction { .. }
                | Error::RequestConstruction { .. }
                | Error::MissingRequest
                | Error::BodyEncoding(_)
        )
    }
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
