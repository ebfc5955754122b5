//! Fluent HTTP request builder on top of libcurl.
//!
//! Configure a [`RequestBuilder`] (headers, cookies, retry count, proxy),
//! pick a method with `head`/`get`/`post`, then `send`. Construction errors
//! are held until `send`; transport errors are retried a fixed number of times.

pub mod config;
pub mod logging;

pub mod builder;
pub mod error;
mod executor;
pub mod proxy;
pub mod request;
pub mod retry;
pub mod transport;

pub use builder::RequestBuilder;
pub use error::{Error, Result};
pub use proxy::{ProxyConfig, ProxyKind};
pub use request::{Body, Method, Request, Response, UrlError, Values};
pub use transport::{CurlTransport, ProxyRoute, Transport, TransportError};

pub use cookie::Cookie;
