//! Classify socket errors and FTP reply codes into retry policy error kinds.

use crate::retry::error::SessionError;
use crate::retry::policy::ErrorKind;
use std::io;

/// Classify a socket-level I/O error for retry decisions.
pub fn classify_io_error(e: &io::Error) -> ErrorKind {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ErrorKind::Timeout,
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::NotConnected
        | io::ErrorKind::UnexpectedEof => ErrorKind::Connection,
        _ => ErrorKind::Other,
    }
}

/// Classify an FTP reply code for retry decisions.
///
/// 421 (service closing) and 425/426 (data connection failures) mean the
/// session is gone; 450/451/452 are transient negative completion replies
/// (file busy, local error, insufficient storage on the server). Everything
/// else, including 530 and the 5yz permanent class, is not retried.
pub fn classify_reply_code(code: u32) -> ErrorKind {
    match code {
        421 | 425 | 426 => ErrorKind::Connection,
        450..=452 => ErrorKind::TransientReply(code),
        _ => ErrorKind::Other,
    }
}

/// Classify a session error (socket, reply, storage, protocol) into an ErrorKind.
pub fn classify(e: &SessionError) -> ErrorKind {
    match e {
        SessionError::Io(ioe) => classify_io_error(ioe),
        SessionError::Reply { code, .. } => classify_reply_code(*code),
        // Local storage and malformed exchanges are never the network's fault.
        SessionError::Storage(_) | SessionError::Protocol(_) => ErrorKind::Other,
    }
}
