//! Public error taxonomy for façade operations.
//!
//! Callers never see a raw transport error: every failure is classified and
//! surfaced as exactly one of these kinds. Transient network faults are
//! retried internally and only become visible wrapped in `RetryExhausted`.

use crate::retry::SessionError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FtpClientError {
    /// Could not establish or re-establish the control connection.
    #[error("connection failed: {0}")]
    Connection(#[source] SessionError),

    /// Server rejected the configured credentials.
    #[error("authentication rejected: {0}")]
    Auth(#[source] SessionError),

    /// Transient failures persisted past the retry budget; wraps the last one.
    #[error("retries exhausted after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        source: SessionError,
    },

    /// Downloaded file digest did not match the expected value. The
    /// transferred bytes are left on disk.
    #[error("checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
    Integrity {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Delegated operation name (or arity) outside the supported set.
    #[error("unsupported operation: {op}")]
    UnsupportedOperation { op: String },

    /// Permanent server rejection (5yz and friends). Never retried.
    #[error("server rejected operation: {code} {message}")]
    Server { code: u32, message: String },

    /// The exchange broke in a way that is neither transient nor a clean
    /// negative reply (malformed response, unclassifiable socket fault).
    #[error("protocol failure: {0}")]
    Protocol(#[source] SessionError),

    /// Local filesystem failure. Never triggers reconnect or retry.
    #[error("local i/o: {0}")]
    Local(#[from] std::io::Error),
}

impl FtpClientError {
    /// Map a fault the policy refused to retry into its taxonomy kind.
    pub(crate) fn from_fatal(e: SessionError) -> Self {
        match e {
            SessionError::Storage(ioe) => FtpClientError::Local(ioe),
            SessionError::Reply { code, message } => FtpClientError::Server { code, message },
            other => FtpClientError::Protocol(other),
        }
    }
}
