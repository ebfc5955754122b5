//! Classify transport errors for logging retry decisions.
//!
//! Every kind is retried the same way; the kind only shows up in the debug log.

use crate::transport::TransportError;
use std::io;

/// Coarse failure category of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection closed before a complete response arrived.
    EndOfStream,
    /// Connect or transfer timed out.
    Timeout,
    /// Anything else (refused, DNS, proxy handshake, TLS...).
    Other,
}

impl FailureKind {
    pub fn is_transient(self) -> bool {
        matches!(self, FailureKind::EndOfStream | FailureKind::Timeout)
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_got_nothing() || e.is_recv_error() || e.is_partial_file() {
        return FailureKind::EndOfStream;
    }
    FailureKind::Other
}

/// Classify an I/O error.
pub fn classify_io_error(e: &io::Error) -> FailureKind {
    match e.kind() {
        io::ErrorKind::TimedOut => FailureKind::Timeout,
        io::ErrorKind::UnexpectedEof => FailureKind::EndOfStream,
        _ => FailureKind::Other,
    }
}

pub fn classify(e: &TransportError) -> FailureKind {
    match e {
        TransportError::Curl(ce) => classify_curl_error(ce),
        TransportError::Io(ie) => classify_io_error(ie),
    }
}
