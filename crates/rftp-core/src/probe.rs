//! Session liveness probe.

use crate::session::FtpSession;

/// One NOOP round trip against the session; any failure means "not alive".
/// Never propagates: probe failures are converted into `false` and logged.
pub fn is_alive(session: &mut dyn FtpSession) -> bool {
    match session.noop() {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("liveness probe failed: {}", e);
            false
        }
    }
}
