//! CLI command handlers. One file per command.

mod checksum;
mod cmd;
mod get;
mod probe;

pub use checksum::run_checksum;
pub use cmd::run_cmd;
pub use get::run_get;
pub use probe::run_probe;
