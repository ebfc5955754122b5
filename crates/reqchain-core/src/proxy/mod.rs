//! Declarative proxy configuration and the factory that turns it into a transport.
//!
//! `ProxyConfig` is plain data (it also lives in `config.toml`); `build`
//! picks the HTTP-proxy or SOCKS5 path from its kind. Nothing is dialed until
//! the first request goes through the returned transport.

mod factory;
mod http;
mod kind;
mod socks5;

pub use factory::build;
pub use kind::ProxyKind;
pub use socks5::{Socks5Auth, Socks5Dialer};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::Url;

/// Default port for `socks5://host` without an explicit port.
const DEFAULT_SOCKS5_PORT: u16 = 1080;

/// Proxy endpoint. Empty `user`/`password` mean "not set".
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub kind: ProxyKind,
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl ProxyConfig {
    pub fn new(kind: ProxyKind, host: impl Into<String>, port: u16) -> Self {
        Self {
            kind,
            host: host.into(),
            port,
            user: String::new(),
            password: String::new(),
        }
    }

    /// With authentication
    pub fn with_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// SOCKS5 and the dual HTTP+SOCKS5 kind both go through the SOCKS5 dialer.
    pub fn is_socks_capable(&self) -> bool {
        matches!(self.kind, ProxyKind::Socks5 | ProxyKind::HttpAndSocks5)
    }

    /// Only the user name is checked; the SOCKS5 path additionally requires a
    /// password before sending credentials.
    pub fn needs_auth(&self) -> bool {
        !self.user.is_empty()
    }

    /// `host:port`, regardless of kind or credentials.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Proxy URL without credentials, safe to log.
    pub fn proxy_url(&self) -> String {
        if self.is_socks_capable() {
            format!("socks5h://{}", self.address())
        } else {
            format!("http://{}", self.address())
        }
    }
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Parses `http://[user:pass@]host[:port]` or `socks5://[user:pass@]host[:port]`
/// (`socks5h://` accepted as an alias). Credentials are percent-decoded.
impl FromStr for ProxyConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let url = Url::parse(s).map_err(|source| Error::MalformedProxyUrl {
            address: strip_userinfo(s).to_string(),
            source,
        })?;

        let kind = match url.scheme() {
            "http" => ProxyKind::Http,
            "socks5" | "socks5h" => ProxyKind::Socks5,
            other => return Err(Error::InvalidProxyKind(other.to_string())),
        };
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or(Error::MalformedProxyUrl {
                address: strip_userinfo(s).to_string(),
                source: url::ParseError::EmptyHost,
            })?
            .to_string();
        let port = url.port_or_known_default().unwrap_or(DEFAULT_SOCKS5_PORT);

        Ok(ProxyConfig::new(kind, host, port).with_auth(
            decode_component(url.username()),
            decode_component(url.password().unwrap_or("")),
        ))
    }
}

fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Drops `user:pass@` from a proxy string so errors never carry credentials.
fn strip_userinfo(s: &str) -> &str {
    match (s.find("://"), s.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => &s[at + 1..],
        (None, Some(at)) => &s[at + 1..],
        _ => s,
    }
}
