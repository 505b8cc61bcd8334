//! # tangle (app library)
//!
//! Library surface of the Tangle binary, exposed so integration tests can
//! exercise the CLI command implementations directly.

pub mod cli;
pub mod config;
