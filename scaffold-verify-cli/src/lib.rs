//! scaffold-verify command-line interface.
//!
//! The binary in `main.rs` is a thin wrapper; argument parsing, command
//! handlers and output rendering live here so they can be tested.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
