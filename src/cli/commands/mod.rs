//! Command implementations for the primeherd CLI
//!
//! Each command lives in its own module: the argument struct plus an
//! `execute` function.

pub mod generate;
pub mod run;
pub mod worker;
