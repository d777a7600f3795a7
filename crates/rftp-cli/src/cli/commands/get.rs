//! Get command: download a file through the retry envelope.

use anyhow::Result;
use rftp_core::client::FtpClient;
use rftp_core::config::FtpConfig;
use std::path::PathBuf;

/// Download `remote` into `local` (remote file name when absent), verifying
/// an expected SHA-256 when given.
pub fn run_get(
    cfg: FtpConfig,
    remote: &str,
    local: Option<PathBuf>,
    sha256: Option<&str>,
) -> Result<()> {
    let local = local.unwrap_or_else(|| default_local_path(remote));
    let mut client = FtpClient::new(cfg);
    let bytes = client.run_scoped(|c| c.download_file(remote, &local, sha256))?;
    println!("{}  {} bytes", local.display(), bytes);
    Ok(())
}

/// Last path segment of the remote path, or a fixed fallback name.
fn default_local_path(remote: &str) -> PathBuf {
    let name = remote
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("download.bin");
    PathBuf::from(name)
}
