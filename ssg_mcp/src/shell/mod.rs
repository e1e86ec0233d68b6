//! # Shell Module
//!
//! Entry point and CLI logic for the `ssg_mcp` binary: argument parsing, configuration
//! loading and the run modes (stdio server, single CLI dispatch, tool listing, status).

pub mod cli;
pub mod modes;

pub use cli::{Cli, OutputFormat, run};
