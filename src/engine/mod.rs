//! The two execution engines behind the same compute contract.

use clap::ValueEnum;
use serde::Deserialize;

pub mod cluster;
pub mod threads;

/// Which execution model carries a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Shared-memory thread pool with dynamic work claims
    Threads,
    /// Separate worker processes wired with collectives over loopback TCP
    Cluster,
}

impl Engine {
    /// Marker written into the output header.
    pub fn tag(&self) -> &'static str {
        match self {
            Engine::Threads => "threads",
            Engine::Cluster => "cluster",
        }
    }
}
