//! Command-line front end.
//!
//! ```ignore
//! use glitch::cli::{parse_args, run_command};
//!
//! let command = parse_args(std::env::args());
//! run_command(&app, command).await?;
//! ```

pub mod args;
pub mod commands;
pub mod output;

pub use args::{parse_args, CliCommand, USAGE};
pub use commands::run_command;

/// Version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
