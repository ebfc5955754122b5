//! Network-level failure of a single attempt.

/// Error returned by a `Transport` for one attempt (connection, timeout,
/// truncated response). HTTP error statuses are not transport errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// libcurl reported an error (connect, resolve, timeout, proxy handshake...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// I/O failure from a non-curl transport.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Connection closed before a complete response arrived.
    pub fn is_eof(&self) -> bool {
        crate::retry::classify(self) == crate::retry::FailureKind::EndOfStream
    }

    pub fn is_timeout(&self) -> bool {
        crate::retry::classify(self) == crate::retry::FailureKind::Timeout
    }
}
