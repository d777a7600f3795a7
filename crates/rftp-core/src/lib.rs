pub mod config;
pub mod logging;

// Orchestration layers, leaf-first: policy/classifier, probe, manager,
// executor, façade.
pub mod checksum;
pub mod client;
pub mod error;
pub mod manager;
pub mod probe;
pub mod retry;
pub mod session;

#[cfg(test)]
pub(crate) mod testutil;
