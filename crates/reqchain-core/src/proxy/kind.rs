//! Proxy kind and its text/numeric forms.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which proxy protocol an endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProxyKind {
    Http,
    Socks5,
    /// Endpoint that accepts both; routed through SOCKS5.
    HttpAndSocks5,
}

impl ProxyKind {
    /// Stable numeric code (1 = http, 2 = socks5, 3 = http+socks5).
    pub fn code(self) -> u8 {
        match self {
            ProxyKind::Http => 1,
            ProxyKind::Socks5 => 2,
            ProxyKind::HttpAndSocks5 => 3,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, Error> {
        match code {
            1 => Ok(ProxyKind::Http),
            2 => Ok(ProxyKind::Socks5),
            3 => Ok(ProxyKind::HttpAndSocks5),
            other => Err(Error::InvalidProxyKind(other.to_string())),
        }
    }

    /// Name used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyKind::Http => "http",
            ProxyKind::Socks5 => "socks5",
            ProxyKind::HttpAndSocks5 => "http+socks5",
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProxyKind::Http => "HTTP",
            ProxyKind::Socks5 => "SOCKS5",
            ProxyKind::HttpAndSocks5 => "HTTP&SOCKS5",
        })
    }
}

impl FromStr for ProxyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(ProxyKind::Http),
            "socks5" | "socks" => Ok(ProxyKind::Socks5),
            "http+socks5" | "http&socks5" | "http&socks" => Ok(ProxyKind::HttpAndSocks5),
            _ => Err(Error::InvalidProxyKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for ProxyKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProxyKind> for String {
    fn from(kind: ProxyKind) -> Self {
        kind.as_str().to_string()
    }
}
