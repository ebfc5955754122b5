//! libcurl-backed transport: one `Easy` handle per attempt.

use super::parse::parse_header_lines;
use super::{Transport, TransportError};
use crate::proxy::Socks5Dialer;
use crate::request::{Method, Request, Response};
use curl::easy::{Easy, List, ProxyType};
use std::str;
use url::Url;

/// Redirect hops followed before giving up.
const DEFAULT_MAX_REDIRECTIONS: u32 = 10;

/// Where outbound connections go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyRoute {
    /// Forward through an HTTP proxy. The URL may carry `user:password@`.
    Http(Url),
    /// Tunnel through a SOCKS5 proxy with proxy-side name resolution.
    Socks5(Socks5Dialer),
}

/// Blocking transport over libcurl. Holds no connection state, so a single
/// value can be shared across threads.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    proxy: Option<ProxyRoute>,
    max_redirections: u32,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::direct()
    }
}

impl CurlTransport {
    /// Connects straight to the target host.
    pub fn direct() -> Self {
        Self {
            proxy: None,
            max_redirections: DEFAULT_MAX_REDIRECTIONS,
        }
    }

    pub fn with_proxy(route: ProxyRoute) -> Self {
        Self {
            proxy: Some(route),
            ..Self::direct()
        }
    }

    pub fn proxy(&self) -> Option<&ProxyRoute> {
        self.proxy.as_ref()
    }

    pub fn max_redirections(mut self, max: u32) -> Self {
        self.max_redirections = max;
        self
    }

    fn configure(&self, easy: &mut Easy, request: &Request) -> Result<(), curl::Error> {
        easy.url(request.url().as_str())?;
        match request.method() {
            Method::Head => easy.nobody(true)?,
            Method::Get => easy.get(true)?,
            Method::Post => {
                easy.post(true)?;
                easy.post_fields_copy(request.body().unwrap_or_default())?;
            }
        }
        easy.follow_location(self.max_redirections > 0)?;
        easy.max_redirections(self.max_redirections)?;
        if let Some(timeout) = request.timeout() {
            easy.timeout(timeout)?;
        }

        let mut list = List::new();
        for (name, value) in request.headers() {
            list.append(&header_line(name, value))?;
        }
        if request.method() == Method::Post {
            // libcurl otherwise adds a form content type to every POST and
            // `Expect: 100-continue` to large ones.
            if request.header("Content-Type").is_none() {
                list.append("Content-Type:")?;
            }
            list.append("Expect:")?;
        }
        easy.http_headers(list)?;

        match &self.proxy {
            None => {}
            Some(ProxyRoute::Http(url)) => {
                easy.proxy(url.as_str())?;
                easy.proxy_type(ProxyType::Http)?;
            }
            Some(ProxyRoute::Socks5(dialer)) => {
                easy.proxy(&dialer.proxy_url())?;
                easy.proxy_type(ProxyType::Socks5Hostname)?;
                if let Some(auth) = dialer.auth() {
                    easy.proxy_username(&auth.user)?;
                    easy.proxy_password(&auth.password)?;
                }
            }
        }
        Ok(())
    }
}

/// libcurl drops `Name:` with an empty value (and any default it would add
/// under that name); `Name;` sends the header with an empty value instead.
fn header_line(name: &str, value: &str) -> String {
    let (name, value) = (name.trim(), value.trim());
    if value.is_empty() {
        format!("{};", name)
    } else {
        format!("{}: {}", name, value)
    }
}

impl Transport for CurlTransport {
    fn send(&self, request: &Request) -> Result<Response, TransportError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = Easy::new();
        self.configure(&mut easy, request)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::trace!(method = %request.method(), url = %request.url(), status, "transfer complete");

        Ok(Response {
            status,
            headers: parse_header_lines(&header_lines),
            body,
        })
    }
}
