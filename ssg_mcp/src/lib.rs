//! # ssg_mcp
//!
//! A uniform adapter layer over static-site-generator command-line tools, served as an
//! MCP server.
//!
//! Each supported generator is an *adapter*: a binary, an ordered list of liveness
//! probes and a set of *tools*. A tool declares a JSON input schema and turns validated
//! input into exactly one subprocess invocation. The [`AdapterRegistry`] owns the
//! adapters and their connection state; the [`Dispatcher`] validates a call, connects
//! the adapter on demand, runs the tool and returns a [`DispatchResponse`].
//!
//! ## Modules
//!
//! - **`process`**: the [`ProcessRunner`] seam and the tokio-backed
//!   [`SystemProcessRunner`].
//! - **`schema_validation`**: tool input schemas and exhaustive validation.
//! - **`tool`**: tool descriptors, validated input and argument planning.
//! - **`adapter`**: adapter descriptors, probes and the connection state machine.
//! - **`registry`**: the adapter registry and its serializable catalog.
//! - **`dispatcher`**: the single entry point for running a tool.
//! - **`catalog`**: the built-in adapters.
//! - **`config`**: the optional JSON configuration file.
//! - **`mcp_service`**: the `rmcp` server handler.
//! - **`shell`**: the `ssg_mcp` binary's CLI and run modes.

pub mod adapter;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod error;
pub mod mcp_service;
pub mod process;
pub mod registry;
pub mod schema_validation;
pub mod shell;
pub mod test_utils;
pub mod tool;
pub mod utils;

pub use adapter::{AdapterDescriptor, AdapterSpec, ConnectReport, ConnectionState, Probe};
pub use config::SsgConfig;
pub use dispatcher::{DispatchRequest, DispatchResponse, Dispatcher};
pub use error::{DispatchError, ErrorInfo, ErrorKind, RegistryError};
pub use mcp_service::SsgMcpService;
pub use process::{Invocation, ProcessResult, ProcessRunner, SystemProcessRunner};
pub use registry::AdapterRegistry;
pub use schema_validation::{InputSchema, PropertyType, Violation};
pub use tool::{Tool, ToolInput};
