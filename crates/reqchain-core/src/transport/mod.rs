//! Transport seam: the only place bytes leave the process.
//!
//! The builder and executor only depend on the `Transport` trait. The default
//! implementation drives libcurl through the `curl` crate, optionally routed
//! through an HTTP or SOCKS5 proxy.

mod easy;
mod error;
mod parse;

pub use easy::{CurlTransport, ProxyRoute};
pub use error::TransportError;

use crate::request::{Request, Response};
use std::fmt;

/// Sends one request and returns the buffered response.
///
/// Implementations are shared behind `Arc` across builders and threads.
pub trait Transport: Send + Sync + fmt::Debug {
    fn send(&self, request: &Request) -> Result<Response, TransportError>;
}
