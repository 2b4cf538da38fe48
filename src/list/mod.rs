//! Line-oriented list file formats.
//!
//! Input: `list_len=<N>` followed by N decimal values, one per line.
//! Output: `primes_found=<count>(<engine-tag>)` followed by the retained
//! primes, one per line, in input order.

pub mod loader;
pub mod writer;

pub use loader::IntegerList;
