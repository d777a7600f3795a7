//! Connection ownership: open, lazy reconnect, graceful teardown.

use crate::config::FtpConfig;
use crate::error::FtpClientError;
use crate::probe;
use crate::retry::SessionError;
use crate::session::{Connector, FtpSession};

/// Owns the single live session and the means to replace it.
///
/// At most one live session exists per manager. Staleness is detected
/// lazily in `ensure_live`; there is no background polling. Not safe for
/// concurrent use from multiple threads — one manager per worker.
pub struct ConnectionManager {
    config: FtpConfig,
    connector: Box<dyn Connector>,
    session: Option<Box<dyn FtpSession>>,
}

impl ConnectionManager {
    pub fn new(config: FtpConfig, connector: Box<dyn Connector>) -> Self {
        Self {
            config,
            connector,
            session: None,
        }
    }

    /// True when a session handle is currently held (liveness not implied).
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Connect and authenticate if no session is held yet.
    ///
    /// An unreachable host surfaces as `Connection`, credential rejection
    /// as `Auth`. Neither is retried here; retrying `open` is the retry
    /// executor's business.
    pub fn open(&mut self) -> Result<(), FtpClientError> {
        if self.session.is_some() {
            return Ok(());
        }
        let mut session = self
            .connector
            .connect(&self.config.host, self.config.port)
            .map_err(FtpClientError::Connection)?;
        let (user, password) = self.config.credentials();
        session.login(user, password).map_err(|e| match e {
            SessionError::Reply { .. } => FtpClientError::Auth(e),
            other => FtpClientError::Connection(other),
        })?;
        tracing::debug!(
            "connected to {}:{} as {}",
            self.config.host,
            self.config.port,
            user
        );
        self.session = Some(session);
        Ok(())
    }

    /// Return a live session, reconnecting if the current one fails its probe.
    ///
    /// A session that was just established is not probed again.
    pub fn ensure_live(&mut self) -> Result<&mut dyn FtpSession, FtpClientError> {
        let stale = match self.session.as_mut() {
            Some(session) => !probe::is_alive(session.as_mut()),
            None => true,
        };
        if stale {
            if self.session.is_some() {
                tracing::info!("session to {} is stale, reconnecting", self.config.host);
            }
            self.close();
            self.open()?;
        }
        match self.session.as_mut() {
            Some(session) => Ok(session.as_mut()),
            // open() cannot succeed without storing a session.
            None => Err(FtpClientError::Connection(SessionError::Protocol(
                "no session after reconnect".into(),
            ))),
        }
    }

    /// Graceful teardown. Swallows errors from an already-dead peer and is
    /// a no-op when nothing is open.
    pub fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.quit() {
                tracing::debug!("quit during close failed: {}", e);
            }
        }
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.close();
    }
}
