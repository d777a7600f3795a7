//! Transport-level error type for retry classification.

use std::fmt;

/// Error returned by a single session operation (socket failure, negative
/// server reply, or local sink failure). Used so we can classify and decide
/// retries before mapping into the public error taxonomy.
#[derive(Debug)]
pub enum SessionError {
    /// Socket-level failure on the control or data connection.
    Io(std::io::Error),
    /// Server answered with a negative completion reply.
    Reply { code: u32, message: String },
    /// Local sink write failed (e.g. disk full, permission denied). Not retried.
    Storage(std::io::Error),
    /// Response could not be parsed or the exchange broke protocol. Not retried.
    Protocol(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "{}", e),
            SessionError::Reply { code, message } => {
                let message = message.trim();
                if message.is_empty() {
                    write!(f, "server reply {}", code)
                } else {
                    write!(f, "server reply {}: {}", code, message)
                }
            }
            SessionError::Storage(e) => write!(f, "storage: {}", e),
            SessionError::Protocol(msg) => write!(f, "protocol: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(e) | SessionError::Storage(e) => Some(e),
            SessionError::Reply { .. } | SessionError::Protocol(_) => None,
        }
    }
}
