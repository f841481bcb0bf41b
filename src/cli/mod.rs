//! CLI module for onomo - command-line interface.
//!
//! One flag per configurable option plus `--configfile`, `--show-config`,
//! `--verbose` and `--version`.

pub mod commands;

pub use commands::Cli;
