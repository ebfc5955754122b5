//! Default header set and header/cookie application at send time.

use super::RequestBuilder;
use crate::request::Request;
use std::collections::HashMap;

/// Headers every builder starts with.
pub(super) const DEFAULT_HEADERS: [(&str, &str); 5] = [
    ("Accept-Encoding", "gzip, deflate, br, zstd"),
    ("Accept-Language", "en"),
    ("Connection", "keep-alive"),
    ("Pragma", "no-cache"),
    ("Cache-Control", "no-cache"),
];

pub(super) fn default_headers() -> HashMap<String, String> {
    DEFAULT_HEADERS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl RequestBuilder {
    /// Adds every configured header to the request (values already on the
    /// request are kept), then appends cookies in configured order.
    pub(crate) fn write_headers(&self, request: &mut Request) {
        for (name, value) in &self.headers {
            request.add_header(name.clone(), value.clone());
        }
        for cookie in &self.cookies {
            request.add_cookie(cookie);
        }
    }
}
