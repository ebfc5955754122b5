//! SOCKS5 dialer: endpoint plus optional username/password.

use super::ProxyConfig;
use crate::error::{Error, Result};
use crate::transport::{CurlTransport, ProxyRoute};
use std::fmt;
use url::Url;

/// Username/password for SOCKS5 method 0x02.
#[derive(Clone, PartialEq, Eq)]
pub struct Socks5Auth {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Socks5Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Socks5Auth")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Validated SOCKS5 endpoint. Target host names are resolved by the proxy,
/// and the connection to the proxy itself is a direct TCP dial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Socks5Dialer {
    address: String,
    auth: Option<Socks5Auth>,
}

impl Socks5Dialer {
    /// Checks that `address` is a usable `host:port`; no connection is made.
    pub fn new(address: &str, auth: Option<Socks5Auth>) -> Result<Self> {
        let fail = |reason: &str| Error::DialerConstruction {
            address: address.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(&format!("socks5h://{}", address))
            .map_err(|e| fail(&e.to_string()))?;
        match url.host_str() {
            Some(h) if !h.is_empty() => {}
            _ => return Err(fail("missing host")),
        }
        match url.port() {
            Some(0) | None => return Err(fail("missing or zero port")),
            Some(_) => {}
        }
        if url.path() != "" || url.query().is_some() || !url.username().is_empty() {
            return Err(fail("endpoint must be host:port"));
        }

        Ok(Self {
            address: address.to_string(),
            auth,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn auth(&self) -> Option<&Socks5Auth> {
        self.auth.as_ref()
    }

    /// `socks5h://host:port`, the form libcurl expects for proxy-side resolution.
    pub fn proxy_url(&self) -> String {
        format!("socks5h://{}", self.address)
    }
}

/// Builds a transport dialing through SOCKS5. Credentials are only sent when
/// both user and password are set; otherwise the handshake is anonymous.
pub(super) fn build_transport(config: &ProxyConfig) -> Result<CurlTransport> {
    let auth = if !config.user.is_empty() && !config.password.is_empty() {
        Some(Socks5Auth {
            user: config.user.clone(),
            password: config.password.clone(),
        })
    } else {
        None
    };

    let dialer = Socks5Dialer::new(&config.address(), auth).map_err(|e| {
        tracing::warn!(proxy = %config.address(), error = %e, "SOCKS5 dialer setup failed");
        e
    })?;
    Ok(CurlTransport::with_proxy(ProxyRoute::Socks5(dialer)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::ProxyKind;

    #[test]
    fn dialer_accepts_host_port() {
        let d = Socks5Dialer::new("127.0.0.1:1080", None).unwrap();
        assert_eq!(d.address(), "127.0.0.1:1080");
        assert_eq!(d.proxy_url(), "socks5h://127.0.0.1:1080");
        assert!(d.auth().is_none());
    }

    #[test]
    fn dialer_rejects_malformed_endpoints() {
        for bad in [":1080", "host:0", "ho st:1080", "host:99999", "host:1080/path"] {
            let err = Socks5Dialer::new(bad, None).unwrap_err();
            assert!(
                matches!(err, Error::DialerConstruction { .. }),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn anonymous_unless_user_and_password() {
        let cfg = ProxyConfig::new(ProxyKind::Socks5, "127.0.0.1", 1080).with_auth("u", "");
        let t = build_transport(&cfg).unwrap();
        match t.proxy() {
            Some(ProxyRoute::Socks5(d)) => assert!(d.auth().is_none()),
            other => panic!("expected socks5 route, got {:?}", other),
        }
    }

    #[test]
    fn authenticated_when_both_set() {
        let cfg = ProxyConfig::new(ProxyKind::HttpAndSocks5, "127.0.0.1", 1080).with_auth("u", "p");
        let t = build_transport(&cfg).unwrap();
        match t.proxy() {
            Some(ProxyRoute::Socks5(d)) => {
                let auth = d.auth().unwrap();
                assert_eq!((auth.user.as_str(), auth.password.as_str()), ("u", "p"));
            }
            other => panic!("expected socks5 route, got {:?}", other),
        }
    }
}
