//! Retry policy and loop.
//!
//! Fixed-count retry with an optional flat wait; no backoff. Errors are
//! classified (end-of-stream, timeout, other) for logging only: every
//! failure is retried until the attempt budget is spent.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_io_error, FailureKind};
pub use policy::RetryPolicy;
pub use run::run_with_retry;
