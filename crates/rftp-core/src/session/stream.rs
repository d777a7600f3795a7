//! suppaftp-backed session implementation.

use super::{Connector, FtpSession, SessionResult};
use crate::retry::SessionError;
use std::io::{Read, Write};
use std::time::Duration;
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};

const COPY_BUF: usize = 64 * 1024;

/// Connector producing suppaftp-backed sessions.
pub struct FtpConnector {
    read_timeout: Option<Duration>,
}

impl FtpConnector {
    pub fn new(read_timeout: Option<Duration>) -> Self {
        Self { read_timeout }
    }
}

impl Connector for FtpConnector {
    fn connect(&self, host: &str, port: u16) -> SessionResult<Box<dyn FtpSession>> {
        let stream = FtpStream::connect((host, port)).map_err(map_ftp_error)?;
        if let Some(timeout) = self.read_timeout {
            stream
                .get_ref()
                .set_read_timeout(Some(timeout))
                .map_err(SessionError::Io)?;
        }
        Ok(Box::new(StreamSession { stream }))
    }
}

/// Live control connection over suppaftp's sync stream.
struct StreamSession {
    stream: FtpStream,
}

impl FtpSession for StreamSession {
    fn login(&mut self, user: &str, password: &str) -> SessionResult<()> {
        self.stream.login(user, password).map_err(map_ftp_error)
    }

    fn noop(&mut self) -> SessionResult<()> {
        self.stream.noop().map_err(map_ftp_error)
    }

    fn retrieve_to(&mut self, remote: &str, sink: &mut dyn Write) -> SessionResult<u64> {
        self.stream
            .transfer_type(FileType::Binary)
            .map_err(map_ftp_error)?;
        let mut data = self.stream.retr_as_stream(remote).map_err(map_ftp_error)?;
        let written = copy_data(&mut data, sink)?;
        self.stream
            .finalize_retr_stream(data)
            .map_err(map_ftp_error)?;
        Ok(written)
    }

    fn pwd(&mut self) -> SessionResult<String> {
        self.stream.pwd().map_err(map_ftp_error)
    }

    fn cwd(&mut self, dir: &str) -> SessionResult<()> {
        self.stream.cwd(dir).map_err(map_ftp_error)
    }

    fn list(&mut self, path: Option<&str>) -> SessionResult<Vec<String>> {
        self.stream.list(path).map_err(map_ftp_error)
    }

    fn size(&mut self, path: &str) -> SessionResult<u64> {
        self.stream
            .size(path)
            .map(|n| n as u64)
            .map_err(map_ftp_error)
    }

    fn mkdir(&mut self, path: &str) -> SessionResult<()> {
        self.stream.mkdir(path).map_err(map_ftp_error)
    }

    fn delete(&mut self, path: &str) -> SessionResult<()> {
        self.stream.rm(path).map_err(map_ftp_error)
    }

    fn rename(&mut self, from: &str, to: &str) -> SessionResult<()> {
        self.stream.rename(from, to).map_err(map_ftp_error)
    }

    fn quit(&mut self) -> SessionResult<()> {
        self.stream.quit().map_err(map_ftp_error)
    }
}

/// Copy the data channel into the local sink, telling socket read failures
/// (classifiable, retryable) apart from sink write failures (fatal storage).
fn copy_data(data: &mut impl Read, sink: &mut dyn Write) -> SessionResult<u64> {
    let mut buf = [0u8; COPY_BUF];
    let mut written = 0u64;
    loop {
        let n = data.read(&mut buf).map_err(SessionError::Io)?;
        if n == 0 {
            break;
        }
        sink.write_all(&buf[..n]).map_err(SessionError::Storage)?;
        written += n as u64;
    }
    sink.flush().map_err(SessionError::Storage)?;
    Ok(written)
}

fn map_ftp_error(e: FtpError) -> SessionError {
    match e {
        FtpError::ConnectionError(ioe) => SessionError::Io(ioe),
        FtpError::UnexpectedResponse(resp) => SessionError::Reply {
            code: resp.status.code(),
            message: String::from_utf8_lossy(&resp.body).trim().to_string(),
        },
        FtpError::BadResponse => SessionError::Protocol("malformed server response".into()),
        other => SessionError::Protocol(other.to_string()),
    }
}
