//! Probe command: connect and report liveness.

use anyhow::Result;
use rftp_core::client::FtpClient;
use rftp_core::config::FtpConfig;

/// Connect, log in and run one liveness round trip.
pub fn run_probe(cfg: FtpConfig) -> Result<()> {
    let target = format!("{}:{}", cfg.host, cfg.port);
    let mut client = FtpClient::new(cfg);
    client.run_scoped(|c| c.call("noop", &[]))?;
    println!("{}: alive", target);
    Ok(())
}
