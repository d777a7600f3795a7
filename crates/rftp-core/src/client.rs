//! User-facing façade: typed download plus generic delegated operations,
//! all routed through the retry executor.

use crate::checksum;
use crate::config::FtpConfig;
use crate::error::FtpClientError;
use crate::manager::ConnectionManager;
use crate::retry::{run_with_retry, RetryPolicy, SessionError};
use crate::session::{Connector, FtpConnector, FtpSession};
use std::fs::File;
use std::path::Path;

/// Operation names `call` accepts; anything else is rejected before the
/// transport is touched.
pub const SUPPORTED_OPS: &[&str] = &[
    "noop", "pwd", "cwd", "list", "size", "mkdir", "delete", "rename",
];

/// Result of a delegated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Single-line textual result (e.g. working directory).
    Text(String),
    /// Directory listing lines.
    Listing(Vec<String>),
    /// File size in bytes.
    Size(u64),
    /// Operation completed with no payload.
    Done,
}

/// Resilient FTP client. One instance per thread; operations block.
pub struct FtpClient {
    manager: ConnectionManager,
    policy: RetryPolicy,
}

impl FtpClient {
    /// Client backed by the real FTP transport.
    pub fn new(config: FtpConfig) -> Self {
        let connector = Box::new(FtpConnector::new(config.read_timeout()));
        Self::with_connector(config, connector)
    }

    /// Client with an injected connector (tests, alternative transports).
    pub fn with_connector(config: FtpConfig, connector: Box<dyn Connector>) -> Self {
        let policy = config.retry_policy();
        Self {
            manager: ConnectionManager::new(config, connector),
            policy,
        }
    }

    /// Connect eagerly. Optional; every operation connects on demand.
    pub fn open(&mut self) -> Result<(), FtpClientError> {
        self.manager.open()
    }

    /// Graceful teardown; idempotent. Also runs on drop.
    pub fn close(&mut self) {
        self.manager.close();
    }

    /// Open on entry, run `f`, close on every exit path.
    pub fn run_scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, FtpClientError>,
    ) -> Result<T, FtpClientError> {
        self.manager.open()?;
        let result = f(self);
        self.manager.close();
        result
    }

    /// Download `remote` into `local`, returning the byte count.
    ///
    /// Every attempt re-creates the local file, so bytes from a failed
    /// attempt are never concatenated onto by a retry. When
    /// `expected_sha256` is given, the finished file's digest must match it
    /// (hex, case-insensitive) or the call fails with `Integrity`; the
    /// transferred bytes are left on disk for inspection. An integrity
    /// failure is final, never retried.
    pub fn download_file(
        &mut self,
        remote: &str,
        local: &Path,
        expected_sha256: Option<&str>,
    ) -> Result<u64, FtpClientError> {
        let bytes = run_with_retry(&self.policy, &mut self.manager, |session| {
            let mut file = File::create(local).map_err(SessionError::Storage)?;
            session.retrieve_to(remote, &mut file)
        })?;
        tracing::info!(
            "downloaded {} ({} bytes) to {}",
            remote,
            bytes,
            local.display()
        );

        if let Some(expected) = expected_sha256 {
            let actual = checksum::sha256_path(local)?;
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(FtpClientError::Integrity {
                    path: local.to_path_buf(),
                    expected: expected.to_ascii_lowercase(),
                    actual,
                });
            }
            tracing::debug!("checksum verified for {}", local.display());
        }
        Ok(bytes)
    }

    /// Delegate a named operation to the session through the retry envelope.
    ///
    /// Name and arity are validated against `SUPPORTED_OPS` first; unknown
    /// combinations fail with `UnsupportedOperation` without any network
    /// traffic.
    pub fn call(&mut self, op: &str, args: &[&str]) -> Result<CommandOutput, FtpClientError> {
        match (op, args) {
            ("noop", []) => self.exec(|s| s.noop().map(|_| CommandOutput::Done)),
            ("pwd", []) => self.exec(|s| s.pwd().map(CommandOutput::Text)),
            ("cwd", [dir]) => self.exec(|s| s.cwd(dir).map(|_| CommandOutput::Done)),
            ("list", []) => self.exec(|s| s.list(None).map(CommandOutput::Listing)),
            ("list", [path]) => self.exec(|s| s.list(Some(path)).map(CommandOutput::Listing)),
            ("size", [path]) => self.exec(|s| s.size(path).map(CommandOutput::Size)),
            ("mkdir", [path]) => self.exec(|s| s.mkdir(path).map(|_| CommandOutput::Done)),
            ("delete", [path]) => self.exec(|s| s.delete(path).map(|_| CommandOutput::Done)),
            ("rename", [from, to]) => self.exec(|s| s.rename(from, to).map(|_| CommandOutput::Done)),
            _ => Err(FtpClientError::UnsupportedOperation { op: op.to_string() }),
        }
    }

    fn exec<T>(
        &mut self,
        op: impl FnMut(&mut dyn FtpSession) -> Result<T, SessionError>,
    ) -> Result<T, FtpClientError> {
        run_with_retry(&self.policy, &mut self.manager, op)
    }
}
