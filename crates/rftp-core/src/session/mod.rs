//! Session capability abstraction over the FTP transport.
//!
//! Orchestration code (manager, retry executor, façade) only sees these
//! traits; the production implementation in `stream` rides suppaftp.

mod stream;

pub use stream::FtpConnector;

use crate::retry::SessionError;
use std::io::Write;

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Capability set of an authenticated FTP session.
///
/// One method per supported protocol operation; the façade's generic
/// dispatcher maps operation names onto this bounded set.
pub trait FtpSession: Send {
    /// Authenticate. Called once by the connection manager right after connect.
    fn login(&mut self, user: &str, password: &str) -> SessionResult<()>;
    /// Liveness round trip (NOOP).
    fn noop(&mut self) -> SessionResult<()>;
    /// Stream the remote file into `sink`, returning the byte count.
    fn retrieve_to(&mut self, remote: &str, sink: &mut dyn Write) -> SessionResult<u64>;
    /// Print working directory.
    fn pwd(&mut self) -> SessionResult<String>;
    /// Change working directory.
    fn cwd(&mut self, dir: &str) -> SessionResult<()>;
    /// Directory listing (LIST), optionally of a specific path.
    fn list(&mut self, path: Option<&str>) -> SessionResult<Vec<String>>;
    /// Size of a remote file in bytes.
    fn size(&mut self, path: &str) -> SessionResult<u64>;
    /// Create a remote directory.
    fn mkdir(&mut self, path: &str) -> SessionResult<()>;
    /// Delete a remote file.
    fn delete(&mut self, path: &str) -> SessionResult<()>;
    /// Rename a remote file.
    fn rename(&mut self, from: &str, to: &str) -> SessionResult<()>;
    /// Graceful logout. The session is unusable afterwards.
    fn quit(&mut self) -> SessionResult<()>;
}

/// Opens fresh sessions. The manager holds one of these and calls it on
/// first use and on every reconnect.
pub trait Connector: Send {
    fn connect(&self, host: &str, port: u16) -> SessionResult<Box<dyn FtpSession>>;
}
