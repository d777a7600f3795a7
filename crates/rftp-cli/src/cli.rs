//! CLI for the rftp resilient FTP client.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rftp_core::config::{self, FtpConfig};
use std::path::PathBuf;

use commands::{run_checksum, run_cmd, run_get, run_probe};

/// Top-level CLI for the rftp client.
#[derive(Debug, Parser)]
#[command(name = "rftp")]
#[command(about = "rftp: resilient FTP client with reconnect and bounded retry", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub conn: ConnArgs,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Connection overrides. Anything not given falls back to
/// `~/.config/rftp/config.toml`; `--host` alone skips the config file.
#[derive(Debug, Args)]
pub struct ConnArgs {
    /// Server hostname (overrides config.toml).
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Control port.
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Login user (anonymous when absent).
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Login password.
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Maximum attempts per operation (overrides the [retry] section).
    #[arg(long, global = true, value_name = "N")]
    pub retries: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a remote file, with optional integrity verification.
    Get {
        /// Remote path on the server.
        remote: String,

        /// Local destination (defaults to the remote file name).
        local: Option<PathBuf>,

        /// Expected SHA-256 of the downloaded file (hex).
        #[arg(long)]
        sha256: Option<String>,
    },

    /// Run a named server operation: noop, pwd, cwd, list, size, mkdir, delete, rename.
    Cmd {
        /// Operation name.
        name: String,

        /// Operation arguments.
        args: Vec<String>,
    },

    /// Connect, log in and run one liveness round trip.
    Probe,

    /// Compute SHA-256 of a local file (e.g. after download).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        CliCommand::Get {
            remote,
            local,
            sha256,
        } => run_get(resolve_config(&cli.conn)?, &remote, local, sha256.as_deref()),
        CliCommand::Cmd { name, args } => run_cmd(resolve_config(&cli.conn)?, &name, &args),
        CliCommand::Probe => run_probe(resolve_config(&cli.conn)?),
        CliCommand::Checksum { path } => run_checksum(&path),
    }
}

/// Config file first, CLI flags on top.
fn resolve_config(conn: &ConnArgs) -> Result<FtpConfig> {
    let mut cfg = if conn.host.is_some() {
        FtpConfig::default()
    } else {
        config::load_or_init()?
    };
    if let Some(host) = &conn.host {
        cfg.host = host.clone();
    }
    if let Some(port) = conn.port {
        cfg.port = port;
    }
    if let Some(user) = &conn.user {
        cfg.user = Some(user.clone());
    }
    if let Some(password) = &conn.password {
        cfg.password = Some(password.clone());
    }
    if let Some(retries) = conn.retries {
        let mut retry = cfg.retry.clone().unwrap_or_default();
        retry.max_attempts = retries;
        cfg.retry = Some(retry);
    }
    tracing::debug!("resolved target {}:{}", cfg.host, cfg.port);
    Ok(cfg)
}
