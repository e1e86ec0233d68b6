//! # Run Modes Module
//!
//! Contains the different operational modes of the ssg_mcp binary.

pub mod cli;
pub mod list_tools;
pub mod server;
pub mod status;

pub use cli::run_cli_mode;
pub use list_tools::run_list_tools_mode;
pub use server::run_server_mode;
pub use status::run_status_mode;
