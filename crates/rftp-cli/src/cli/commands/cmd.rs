//! Cmd command: delegate a named operation to the server.

use anyhow::Result;
use rftp_core::client::{CommandOutput, FtpClient};
use rftp_core::config::FtpConfig;

/// Run one delegated operation and print its result.
pub fn run_cmd(cfg: FtpConfig, name: &str, args: &[String]) -> Result<()> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let mut client = FtpClient::new(cfg);
    let output = client.run_scoped(|c| c.call(name, &args))?;
    match output {
        CommandOutput::Text(line) => println!("{}", line),
        CommandOutput::Listing(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        CommandOutput::Size(n) => println!("{}", n),
        CommandOutput::Done => {}
    }
    Ok(())
}
