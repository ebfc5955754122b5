//! Proxy config → transport.

use super::{http, socks5, ProxyConfig, ProxyKind};
use crate::error::{Error, Result};
use crate::transport::CurlTransport;

/// Builds a transport that routes every request through `config`.
///
/// SOCKS-capable kinds (including the dual HTTP+SOCKS5 kind) always take the
/// SOCKS5 path; only plain `Http` uses the HTTP proxy path.
pub fn build(config: &ProxyConfig) -> Result<CurlTransport> {
    tracing::debug!(kind = %config.kind, proxy = %config.proxy_url(), "building proxy transport");

    if config.is_socks_capable() {
        return socks5::build_transport(config);
    }

    match config.kind {
        ProxyKind::Http => http::build_transport(config),
        other => Err(Error::InvalidProxyKind(other.to_string())),
    }
}
