//! Outbound request and response values.
//!
//! A `Request` is built fresh by the builder for every `head`/`get`/`post`
//! call and handed to a `Transport` by reference, so one value can be sent
//! several times by the retry loop.

mod body;
mod response;
mod values;

pub use body::{Body, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
pub use response::Response;
pub use values::Values;

use cookie::Cookie;
use std::fmt;
use std::time::Duration;
use url::Url;

/// HTTP methods the builder can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Head,
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Head => "HEAD",
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a request URL was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error(transparent)]
    Parse(#[from] url::ParseError),
    /// Only `http` and `https` are sent; libcurl would otherwise read
    /// `file://` or speak other protocols.
    #[error("unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),
}

/// A fully constructed outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl Request {
    /// Parse `raw_url` (absolute http/https URL) into a request without headers or body.
    pub fn new(method: Method, raw_url: &str) -> Result<Self, UrlError> {
        let url = Url::parse(raw_url.trim())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
            timeout: None,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Query string without the leading `?`; empty when the URL has none.
    pub fn raw_query(&self) -> &str {
        self.url.query().unwrap_or("")
    }

    /// All header lines in insertion order. A name may appear more than once.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value of `name` (case-insensitive), in insertion order.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Adds a header line; existing values for the same name are kept.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Attaches `cookie` to the `Cookie` header. A second cookie is joined to
    /// the existing header with `"; "` rather than adding another header line.
    pub fn add_cookie(&mut self, cookie: &Cookie<'_>) {
        let pair = format!("{}={}", cookie.name(), cookie.value());
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case("cookie"))
        {
            Some((_, existing)) if !existing.is_empty() => {
                existing.push_str("; ");
                existing.push_str(&pair);
            }
            Some((_, existing)) => *existing = pair,
            None => self.headers.push(("Cookie".to_string(), pair)),
        }
    }

    /// Appends already-encoded `params` after any query present in the URL.
    pub(crate) fn append_query(&mut self, params: &str) {
        if params.is_empty() {
            return;
        }
        let merged = match self.url.query() {
            Some(existing) if !existing.is_empty() => format!("{}&{}", existing, params),
            _ => params.to_string(),
        };
        self.url.set_query(Some(&merged));
    }

    pub(crate) fn set_body(&mut self, content_type: &str, body: Vec<u8>) {
        self.add_header("Content-Type", content_type);
        self.body = Some(body);
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }
}
