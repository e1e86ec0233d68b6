//! # ssg_mcp CLI
//!
//! Command-line interface definition and main entry point.

use super::modes;

use crate::{
    config::{config_schema, load_config, resolve_config_path},
    dispatcher::Dispatcher,
    process::SystemProcessRunner,
    registry::AdapterRegistry,
    utils::logging::init_logging,
};
use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::{io::IsTerminal, path::PathBuf, sync::Arc};

/// Output format for the listing, status and CLI modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// ssg_mcp: static-site-generator command-line tools behind one MCP interface.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about,
    long_about = "ssg_mcp runs in four modes:

1. STDIO Mode (default): MCP server over stdio.
   Example: ssg_mcp

2. CLI Mode: run one tool and print its output.
   Example: ssg_mcp zola.zola_build --working-directory site -- drafts=true
   Example: ssg_mcp cobalt.cobalt_new --input '{\"title\": \"Hello\"}'

3. List Tools Mode: print every adapter and tool schema without running anything.
   Example: ssg_mcp --list-tools --format json

4. Status Mode: probe every adapter and print install guidance for missing tools.
   Example: ssg_mcp --status"
)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the JSON schema of the configuration file and exit
    #[arg(long)]
    pub print_config_schema: bool,

    /// List all adapters and tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Probe every adapter, report availability and exit
    #[arg(long)]
    pub status: bool,

    /// Output format for --list-tools, --status and CLI mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Working directory for tool invocations (defaults to the current directory)
    #[arg(long)]
    pub working_directory: Option<PathBuf>,

    /// Timeout in seconds for a CLI-mode dispatch; the tool's process is killed on expiry
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Tool input as a JSON object (for CLI mode)
    #[arg(long)]
    pub input: Option<String>,

    /// Do not probe adapters in the background when the server starts
    #[arg(long)]
    pub skip_startup_probe: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Log to stderr instead of file
    #[arg(long)]
    pub log_to_stderr: bool,

    /// Qualified tool name `<adapter>.<tool>` (for CLI mode)
    #[arg(value_name = "TOOL")]
    pub tool_name: Option<String>,

    /// Tool arguments as `key=value` pairs (for CLI mode, after --)
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    pub tool_args: Vec<String>,
}

/// Parse arguments, load configuration and run the selected mode.
///
/// Returns the process exit code.
pub async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    init_logging(log_level, !cli.log_to_stderr)?;

    if cli.print_config_schema {
        println!("{}", serde_json::to_string_pretty(&config_schema())?);
        return Ok(0);
    }

    if let Some(explicit) = &cli.config
        && !tokio::fs::try_exists(explicit).await.unwrap_or(false)
    {
        bail!("Configuration file {} does not exist", explicit.display());
    }
    let config = match resolve_config_path(cli.config.as_deref()) {
        Some(path) => load_config(&path).await?,
        None => Default::default(),
    };

    let registry = AdapterRegistry::with_builtin_adapters(
        &config,
        Arc::new(SystemProcessRunner::new()),
    )
    .context("Failed to register built-in adapters")?;
    let registry = Arc::new(registry);

    let working_dir = match &cli.working_directory {
        Some(dir) => {
            let dir = std::path::absolute(dir)
                .with_context(|| format!("Invalid working directory {}", dir.display()))?;
            if !dir.is_dir() {
                bail!("Working directory {} is not a directory", dir.display());
            }
            Some(dir)
        }
        None => None,
    };

    if cli.list_tools {
        tracing::info!("Running in list-tools mode");
        return modes::run_list_tools_mode(&registry, cli.format);
    }

    if cli.status {
        tracing::info!("Running in status mode");
        return modes::run_status_mode(&registry, cli.format).await;
    }

    let dispatcher = Dispatcher::new(registry);
    if cli.tool_name.is_some() {
        tracing::info!("Running in CLI mode");
        return modes::run_cli_mode(&cli, &dispatcher, working_dir.as_deref()).await;
    }

    if std::io::stdin().is_terminal() {
        eprintln!("ssg_mcp is an MCP server and expects a client on stdin/stdout.\n");
        eprintln!("  Run a single tool instead:");
        eprintln!("     ssg_mcp zola.zola_version\n");
        eprintln!("  List the available tools:");
        eprintln!("     ssg_mcp --list-tools\n");
        return Ok(1);
    }

    tracing::info!("Running in STDIO server mode");
    modes::run_server_mode(&cli, dispatcher, working_dir).await
}
