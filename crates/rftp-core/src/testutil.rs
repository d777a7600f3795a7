//! Scripted session and connector doubles shared by the unit tests.

use crate::config::{FtpConfig, RetryConfig};
use crate::retry::SessionError;
use crate::session::{Connector, FtpSession, SessionResult};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Counters and traces the tests assert on.
#[derive(Debug, Default)]
pub struct MockState {
    pub connects: u32,
    pub session_ids: Vec<u32>,
    pub logins: Vec<(String, String)>,
    pub noops: u32,
    pub quits: u32,
    pub retrieves: u32,
    pub commands: Vec<String>,
}

pub type SharedState = Arc<Mutex<MockState>>;

/// Planned outcome for one `connect` call. When the plan runs out, further
/// connects produce healthy sessions.
#[derive(Debug, Clone, Copy)]
pub enum Connect {
    /// Produce a session; `healthy` controls the NOOP probe.
    Session { healthy: bool },
    /// Refuse at the socket level.
    Refused,
    /// Produce a session that rejects LOGIN with 530.
    RejectLogin,
}

/// Planned outcome for one `retrieve_to` call. When the script runs out,
/// further retrieves succeed with an empty body.
#[derive(Debug, Clone)]
pub enum Retrieve {
    /// Write all bytes and succeed.
    Ok(Vec<u8>),
    /// Write a partial prefix, then die with a connection reset.
    Abort(Vec<u8>),
}

pub struct MockConnector {
    state: SharedState,
    plan: Mutex<VecDeque<Connect>>,
    retrieve_script: Arc<Mutex<VecDeque<Retrieve>>>,
}

impl MockConnector {
    pub fn new(plan: Vec<Connect>) -> (Self, SharedState) {
        Self::with_retrieves(plan, Vec::new())
    }

    pub fn with_retrieves(plan: Vec<Connect>, retrieves: Vec<Retrieve>) -> (Self, SharedState) {
        let state: SharedState = Arc::default();
        (
            Self {
                state: Arc::clone(&state),
                plan: Mutex::new(plan.into_iter().collect()),
                retrieve_script: Arc::new(Mutex::new(retrieves.into_iter().collect())),
            },
            state,
        )
    }
}

impl Connector for MockConnector {
    fn connect(&self, _host: &str, _port: u16) -> SessionResult<Box<dyn FtpSession>> {
        let step = self
            .plan
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Connect::Session { healthy: true });
        let mut state = self.state.lock().unwrap();
        state.connects += 1;
        if let Connect::Refused = step {
            return Err(SessionError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        let connects = state.connects;
        state.session_ids.push(connects);
        Ok(Box::new(MockSession {
            healthy: matches!(step, Connect::Session { healthy: true }),
            reject_login: matches!(step, Connect::RejectLogin),
            state: Arc::clone(&self.state),
            retrieve_script: Arc::clone(&self.retrieve_script),
        }))
    }
}

pub struct MockSession {
    healthy: bool,
    reject_login: bool,
    state: SharedState,
    retrieve_script: Arc<Mutex<VecDeque<Retrieve>>>,
}

impl MockSession {
    fn record(&self, command: String) {
        self.state.lock().unwrap().commands.push(command);
    }
}

impl FtpSession for MockSession {
    fn login(&mut self, user: &str, password: &str) -> SessionResult<()> {
        self.state
            .lock()
            .unwrap()
            .logins
            .push((user.into(), password.into()));
        if self.reject_login {
            return Err(SessionError::Reply {
                code: 530,
                message: "Login incorrect.".into(),
            });
        }
        Ok(())
    }

    fn noop(&mut self) -> SessionResult<()> {
        self.state.lock().unwrap().noops += 1;
        if self.healthy {
            Ok(())
        } else {
            Err(SessionError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "stale control channel",
            )))
        }
    }

    fn retrieve_to(&mut self, _remote: &str, sink: &mut dyn Write) -> SessionResult<u64> {
        self.state.lock().unwrap().retrieves += 1;
        let step = self
            .retrieve_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Retrieve::Ok(Vec::new()));
        match step {
            Retrieve::Ok(bytes) => {
                sink.write_all(&bytes).map_err(SessionError::Storage)?;
                Ok(bytes.len() as u64)
            }
            Retrieve::Abort(prefix) => {
                sink.write_all(&prefix).map_err(SessionError::Storage)?;
                Err(SessionError::Io(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "data channel reset",
                )))
            }
        }
    }

    fn pwd(&mut self) -> SessionResult<String> {
        self.record("pwd".into());
        Ok("/pub".into())
    }

    fn cwd(&mut self, dir: &str) -> SessionResult<()> {
        self.record(format!("cwd {}", dir));
        Ok(())
    }

    fn list(&mut self, path: Option<&str>) -> SessionResult<Vec<String>> {
        self.record(format!("list {}", path.unwrap_or(".")));
        Ok(vec!["-rw-r--r-- 1 ftp ftp 6 greeting.txt".into()])
    }

    fn size(&mut self, path: &str) -> SessionResult<u64> {
        self.record(format!("size {}", path));
        Ok(6)
    }

    fn mkdir(&mut self, path: &str) -> SessionResult<()> {
        self.record(format!("mkdir {}", path));
        Ok(())
    }

    fn delete(&mut self, path: &str) -> SessionResult<()> {
        self.record(format!("delete {}", path));
        Ok(())
    }

    fn rename(&mut self, from: &str, to: &str) -> SessionResult<()> {
        self.record(format!("rename {} {}", from, to));
        Ok(())
    }

    fn quit(&mut self) -> SessionResult<()> {
        self.state.lock().unwrap().quits += 1;
        Ok(())
    }
}

/// Config pointing at a fake host, three attempts, zero backoff so tests
/// never sleep for real.
pub fn test_config() -> FtpConfig {
    FtpConfig {
        host: "ftp.test.invalid".into(),
        port: 21,
        user: Some("tester".into()),
        password: Some("hunter2".into()),
        timeout_secs: None,
        retry: Some(RetryConfig {
            max_attempts: 3,
            base_delay_secs: 0.0,
            max_delay_secs: 0,
        }),
    }
}
