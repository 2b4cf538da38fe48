//! Core partition/compute/aggregate engine shared by both execution models.
//!
//! The pipeline is the same under either engine: split the list into
//! contiguous partitions (or claim indices dynamically), run trial division
//! over every element, and merge the per-worker results back into one count
//! plus the retained primes in input order.

pub mod aggregate;
pub mod partition;
pub mod primality;
pub mod types;
