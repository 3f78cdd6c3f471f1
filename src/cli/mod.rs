//! CLI module
//!
//! Command-line interface acting as the presentation layer for a feed.
//!
//! # Commands
//!
//! - `scroll` - Page through a feed the way a scrolling list would
//! - `validate` - Check a feed definition

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{Runner, ScrollOptions, ScrollSummary};

#[cfg(test)]
mod tests;
