//! Sending a built request: headers and cookies, retry loop, optional JSON decode.

use crate::builder::RequestBuilder;
use crate::error::{Error, Result};
use crate::request::{Request, Response};
use crate::retry::{classify, run_with_retry};
use crate::transport::TransportError;
use serde::de::DeserializeOwned;

impl RequestBuilder {
    /// Sends the request, retrying every transport failure until the retry
    /// count is spent.
    ///
    /// Returns the pending construction error (if any) without sending.
    /// With a retry count of zero nothing is sent and `Ok(None)` is returned.
    /// HTTP error statuses are responses, not errors.
    pub fn send(mut self) -> Result<Option<Response>> {
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }
        let mut request = self.request.take().ok_or(Error::MissingRequest)?;
        self.write_headers(&mut request);
        request.set_timeout(self.timeout);

        let outcome = run_with_retry(
            &self.retry,
            || self.transport.send(&request),
            |attempt, err| self.log_failed_attempt(&request, attempt, err),
        );

        match outcome {
            Ok(Some(response)) => {
                tracing::debug!(
                    method = %request.method(),
                    url = %request.url(),
                    status = response.status,
                    "request completed"
                );
                Ok(Some(response))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(Error::Transport(e)),
        }
    }

    /// Sends like [`send`](Self::send) and decodes the JSON body into `target`.
    ///
    /// The body is moved out of the response before decoding, so the
    /// returned response always has an empty body. A decode failure returns
    /// `Error::Decode`, which carries the response.
    pub fn send_with_struct<T: DeserializeOwned>(self, target: Option<&mut T>) -> Result<Option<Response>> {
        let Some(mut response) = self.send()? else {
            return Ok(None);
        };
        let Some(target) = target else {
            return Ok(Some(response));
        };

        let body = std::mem::take(&mut response.body);
        match serde_json::from_slice::<T>(&body) {
            Ok(value) => {
                *target = value;
                Ok(Some(response))
            }
            Err(source) => Err(Error::Decode {
                response: Box::new(response),
                source,
            }),
        }
    }

    /// Logs `message` with the current method and URL when debug is on.
    pub fn debug_message(&self, message: &str) {
        if !self.debug {
            return;
        }
        match &self.request {
            Some(request) => log_request_message(request, message),
            None => tracing::info!("{}", message),
        }
    }

    fn log_failed_attempt(&self, request: &Request, attempt: u32, err: &TransportError) {
        if !self.debug {
            return;
        }
        let kind = classify(err);
        let remaining = self.retry.attempts.saturating_sub(attempt);
        log_request_message(
            request,
            &format!(
                "attempt {attempt} failed ({kind:?}, transient={}, {remaining} left): {err}",
                kind.is_transient()
            ),
        );
    }
}

fn log_request_message(request: &Request, message: &str) {
    tracing::info!(method = %request.method(), url = %request.url(), "{}", message);
}
