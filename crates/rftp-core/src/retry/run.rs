//! Retry loop: the single envelope every façade operation runs through.

use crate::error::FtpClientError;
use crate::manager::ConnectionManager;
use crate::retry::classify::classify;
use crate::retry::error::SessionError;
use crate::retry::policy::{ErrorKind, RetryDecision, RetryPolicy};
use crate::session::FtpSession;
use std::time::Duration;

/// Runs `op` against a live session until it succeeds, a fatal fault
/// occurs, or the retry budget is spent.
///
/// Each attempt obtains its session through the manager (probing, and
/// reconnecting when stale). Transient faults back off per the policy and
/// loop; fatal faults propagate immediately in taxonomy form with no sleep
/// and no reconnect. A spent budget surfaces as `RetryExhausted` wrapping
/// the last transient fault.
pub fn run_with_retry<T, F>(
    policy: &RetryPolicy,
    manager: &mut ConnectionManager,
    op: F,
) -> Result<T, FtpClientError>
where
    F: FnMut(&mut dyn FtpSession) -> Result<T, SessionError>,
{
    run_with_retry_using(policy, manager, op, std::thread::sleep)
}

/// Same loop with an injectable sleep, so tests can observe backoff without
/// waiting it out.
pub(crate) fn run_with_retry_using<T, F, S>(
    policy: &RetryPolicy,
    manager: &mut ConnectionManager,
    mut op: F,
    mut sleep: S,
) -> Result<T, FtpClientError>
where
    F: FnMut(&mut dyn FtpSession) -> Result<T, SessionError>,
    S: FnMut(Duration),
{
    let mut attempt = 1u32;
    loop {
        let session = manager.ensure_live()?;
        match op(session) {
            Ok(value) => {
                if attempt > 1 {
                    tracing::debug!("operation succeeded on attempt {}", attempt);
                }
                return Ok(value);
            }
            Err(e) => {
                let kind = classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry if kind == ErrorKind::Other => {
                        return Err(FtpClientError::from_fatal(e));
                    }
                    RetryDecision::NoRetry => {
                        tracing::warn!("giving up after {} attempts: {}", attempt, e);
                        return Err(FtpClientError::RetryExhausted {
                            attempts: attempt,
                            source: e,
                        });
                    }
                    RetryDecision::RetryAfter(delay) => {
                        tracing::debug!(
                            "attempt {} failed ({}), retrying in {:?}",
                            attempt,
                            e,
                            delay
                        );
                        sleep(delay);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
