//! # primeherd - parallel primality evaluation over integer lists
//!
//! Reads a `list_len=<N>` header plus one value per line, decides primality
//! for every element with plain trial division, and writes the retained
//! primes back out in input order together with a total count. The same
//! computation runs under either of two engines:
//!
//! - **threads**: a shared-memory pool whose workers claim elements
//!   dynamically over a bounded channel
//! - **cluster**: separate worker processes wired together with
//!   broadcast/scatter/reduce/gather/barrier collectives over loopback TCP
//!
//! ## Quick Start
//!
//! ```bash
//! # Generate a 10k element input
//! primeherd generate 10000
//!
//! # Check it on the thread pool
//! primeherd list.txt
//!
//! # Same run across 4 processes
//! primeherd list.txt --engine cluster --workers 4
//! ```

pub mod cli;
pub mod compute;
pub mod config;
pub mod engine;
pub mod error;
pub mod list;

pub use cli::{Cli, Output};
pub use config::Settings;
pub use error::PipelineError;

/// Result type alias for primeherd operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
