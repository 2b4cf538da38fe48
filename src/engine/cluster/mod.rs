//! Distributed-memory engine: separate worker processes and collectives.
//!
//! The root spawns `workers - 1` copies of its own executable (the hidden
//! `worker` subcommand), each rank dials back over loopback TCP, and the run
//! proceeds through the fixed collective sequence: broadcast the list
//! length, scatter the partitions, compute in isolation, reduce the counts,
//! gather the patched chunks, barrier, exit. Every collective is synchronous
//! and has no timeout; a stuck rank stalls the run, a dead one fails it.

pub mod group;
pub mod protocol;
pub mod root;
pub mod worker;

pub use root::run;
