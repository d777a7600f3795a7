//! Scripted transport for integration tests: a connector whose sessions
//! follow a fixed plan of probe health and transfer outcomes.

use rftp_core::retry::SessionError;
use rftp_core::session::{Connector, FtpSession, SessionResult};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Observable side effects of a scripted run.
#[derive(Debug, Default)]
pub struct Trace {
    pub connects: u32,
    pub quits: u32,
    pub retrieves: u32,
}

pub type SharedTrace = Arc<Mutex<Trace>>;

/// Health of each successive session handed out by the connector; the last
/// entry repeats.
pub struct ScriptedConnector {
    trace: SharedTrace,
    health: Vec<bool>,
    transfers: Arc<Mutex<VecDeque<Transfer>>>,
}

/// One planned `retrieve_to` outcome.
pub enum Transfer {
    Full(Vec<u8>),
    /// Deliver a prefix, then reset the data channel.
    DieAfter(Vec<u8>),
}

impl ScriptedConnector {
    pub fn new(health: Vec<bool>, transfers: Vec<Transfer>) -> (Self, SharedTrace) {
        let trace: SharedTrace = Arc::default();
        (
            Self {
                trace: Arc::clone(&trace),
                health,
                transfers: Arc::new(Mutex::new(transfers.into_iter().collect())),
            },
            trace,
        )
    }
}

impl Connector for ScriptedConnector {
    fn connect(&self, _host: &str, _port: u16) -> SessionResult<Box<dyn FtpSession>> {
        let mut trace = self.trace.lock().unwrap();
        trace.connects += 1;
        let index = (trace.connects as usize - 1).min(self.health.len().saturating_sub(1));
        let healthy = self.health.get(index).copied().unwrap_or(true);
        Ok(Box::new(ScriptedSession {
            healthy,
            trace: Arc::clone(&self.trace),
            transfers: Arc::clone(&self.transfers),
        }))
    }
}

struct ScriptedSession {
    healthy: bool,
    trace: SharedTrace,
    transfers: Arc<Mutex<VecDeque<Transfer>>>,
}

impl FtpSession for ScriptedSession {
    fn login(&mut self, _user: &str, _password: &str) -> SessionResult<()> {
        Ok(())
    }

    fn noop(&mut self) -> SessionResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(SessionError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "control channel gone",
            )))
        }
    }

    fn retrieve_to(&mut self, _remote: &str, sink: &mut dyn Write) -> SessionResult<u64> {
        self.trace.lock().unwrap().retrieves += 1;
        let step = self
            .transfers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Transfer::Full(Vec::new()));
        match step {
            Transfer::Full(bytes) => {
                sink.write_all(&bytes).map_err(SessionError::Storage)?;
                Ok(bytes.len() as u64)
            }
            Transfer::DieAfter(prefix) => {
                sink.write_all(&prefix).map_err(SessionError::Storage)?;
                // A reset data channel takes the control channel with it:
                // every later probe of this session fails.
                self.healthy = false;
                Err(SessionError::Io(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "data channel reset mid-stream",
                )))
            }
        }
    }

    fn pwd(&mut self) -> SessionResult<String> {
        Ok("/".into())
    }

    fn cwd(&mut self, _dir: &str) -> SessionResult<()> {
        Ok(())
    }

    fn list(&mut self, _path: Option<&str>) -> SessionResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn size(&mut self, _path: &str) -> SessionResult<u64> {
        Ok(0)
    }

    fn mkdir(&mut self, _path: &str) -> SessionResult<()> {
        Ok(())
    }

    fn delete(&mut self, _path: &str) -> SessionResult<()> {
        Ok(())
    }

    fn rename(&mut self, _from: &str, _to: &str) -> SessionResult<()> {
        Ok(())
    }

    fn quit(&mut self) -> SessionResult<()> {
        self.trace.lock().unwrap().quits += 1;
        Ok(())
    }
}
