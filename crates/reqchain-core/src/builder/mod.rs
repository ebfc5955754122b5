//! Fluent request builder with sticky construction errors.
//!
//! Every configuration call takes the builder by value and returns it. The
//! first construction failure (bad proxy, bad URL, unencodable body) is kept
//! in `pending_error`; after that every call is a no-op and `send` returns
//! the stored error without touching the network.

mod headers;


use crate::config::ClientConfig;
use crate::error::Error;
use crate::proxy::{self, ProxyConfig};
use crate::request::{Body, Method, Request, Values};
use crate::retry::RetryPolicy;
use crate::transport::{CurlTransport, Transport};
use cookie::Cookie;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Accumulates configuration for one outbound call.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) cookies: Vec<Cookie<'static>>,
    pub(crate) retry: RetryPolicy,
    pub(crate) timeout: Option<Duration>,
    pub(crate) debug: bool,
    pub(crate) request: Option<Request>,
    pub(crate) pending_error: Option<Error>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    /// New builder sending directly (no proxy) through libcurl.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(CurlTransport::direct()))
    }

    /// New builder sending through `transport`, which may be shared with other builders.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            headers: headers::default_headers(),
            cookies: Vec::new(),
            retry: RetryPolicy::default(),
            timeout: None,
            debug: false,
            request: None,
            pending_error: None,
        }
    }

    /// Applies retry, timeout, user agent, extra headers, debug flag and proxy
    /// from a loaded config file.
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut builder = Self::new()
            .headers(config.headers.clone())
            .debug(config.debug)
            .proxy(config.proxy.as_ref());
        if let Some(retry) = &config.retry {
            builder = builder.retry(retry.count).retry_wait(retry.wait());
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ua) = &config.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        builder
    }

    /// Runs `f` unless a construction error is already pending.
    fn configure(mut self, f: impl FnOnce(&mut Self)) -> Self {
        if self.pending_error.is_none() {
            f(&mut self);
        }
        self
    }

    /// Total number of attempts made by `send` (0 = never send).
    pub fn retry(self, count: u32) -> Self {
        self.configure(|b| b.retry.attempts = count)
    }

    /// Pause before each attempt that follows a failure.
    pub fn retry_wait(self, wait: Duration) -> Self {
        self.configure(|b| b.retry.wait = wait)
    }

    /// Per-attempt timeout for the whole transfer.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.configure(|b| b.timeout = Some(timeout))
    }

    /// Log every failed attempt (method, URL, error).
    pub fn debug(self, enabled: bool) -> Self {
        self.configure(|b| b.debug = enabled)
    }

    pub fn has_header(&self, key: &str) -> bool {
        self.headers.contains_key(key)
    }

    pub fn header(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configure(|b| {
            b.headers.insert(key.into(), value.into());
        })
    }

    pub fn headers<K, V, I>(self, headers: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.configure(|b| {
            for (k, v) in headers {
                b.headers.insert(k.into(), v.into());
            }
        })
    }

    pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
        self.header("User-Agent", user_agent)
    }

    /// Replaces the cookie list; cookies are attached in this order at send time.
    pub fn cookies(self, cookies: impl IntoIterator<Item = Cookie<'static>>) -> Self {
        self.configure(|b| b.cookies = cookies.into_iter().collect())
    }

    pub fn transport(self, transport: Arc<dyn Transport>) -> Self {
        self.configure(|b| b.transport = transport)
    }

    /// Routes requests through `config`. `None` leaves the transport untouched;
    /// a config that cannot be turned into a transport becomes the pending error.
    pub fn proxy(self, config: Option<&ProxyConfig>) -> Self {
        let Some(config) = config else {
            return self;
        };
        self.configure(|b| match proxy::build(config) {
            Ok(transport) => b.transport = Arc::new(transport),
            Err(e) => b.pending_error = Some(e),
        })
    }

    pub fn head(self, url: &str) -> Self {
        self.build_request(Method::Head, url, |_| Ok(()))
    }

    /// GET `url`, appending `params` after any query already in the URL.
    pub fn get(self, url: &str, params: &Values) -> Self {
        self.build_request(Method::Get, url, |request| {
            request.append_query(&params.encode());
            Ok(())
        })
    }

    /// POST `url`. Form bodies are sent urlencoded, JSON bodies as JSON;
    /// `None` sends no body and no content type.
    pub fn post(self, url: &str, body: Option<Body>) -> Self {
        self.build_request(Method::Post, url, move |request| {
            if let Some(body) = body {
                let bytes = body.encode().map_err(Error::BodyEncoding)?;
                request.set_body(body.content_type(), bytes);
            }
            Ok(())
        })
    }

    /// POST any `Serialize` value as JSON.
    pub fn post_json<T: Serialize + ?Sized>(self, url: &str, value: &T) -> Self {
        if self.pending_error.is_some() {
            return self;
        }
        match Body::json(value) {
            Ok(body) => self.post(url, Some(body)),
            Err(e) => self.configure(|b| {
                b.request = None;
                b.pending_error = Some(Error::BodyEncoding(e));
            }),
        }
    }

    /// Builds a fresh request, replacing any previous one.
    fn build_request(
        self,
        method: Method,
        url: &str,
        prepare: impl FnOnce(&mut Request) -> Result<(), Error>,
    ) -> Self {
        self.configure(|b| {
            let built = Request::new(method, url)
                .map_err(|source| Error::RequestConstruction {
                    method,
                    url: url.to_string(),
                    source,
                })
                .and_then(|mut request| {
                    prepare(&mut request)?;
                    Ok(request)
                });
            match built {
                Ok(request) => b.request = Some(request),
                Err(e) => {
                    b.request = None;
                    b.pending_error = Some(e);
                }
            }
        })
    }

    /// Request built by the last `head`/`get`/`post`, before headers and cookies are applied.
    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    pub fn pending_error(&self) -> Option<&Error> {
        self.pending_error.as_ref()
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}
