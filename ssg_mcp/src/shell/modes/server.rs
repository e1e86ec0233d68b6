//! # Server Mode
//!
//! Runs ssg_mcp as an MCP server over stdio, the default mode for MCP integration.

use crate::shell::cli::Cli;
use crate::{
    dispatcher::Dispatcher, mcp_service::SsgMcpService, registry::format_install_guidance,
};
use anyhow::Result;
use rmcp::ServiceExt;
use std::{path::PathBuf, sync::Arc};
use tokio::signal;
use tracing::info;

/// Run in server mode (stdio MCP server).
///
/// Returns when the client closes the session or on SIGINT/SIGTERM. Dropping the
/// service cancels in-flight calls, which kills their child processes.
///
/// # Errors
/// Returns an error if the MCP handshake fails or the session ends abnormally.
pub async fn run_server_mode(
    cli: &Cli,
    dispatcher: Dispatcher,
    working_dir: Option<PathBuf>,
) -> Result<i32> {
    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    let registry = Arc::clone(dispatcher.registry());
    let names: Vec<&str> = registry.adapters().map(|adapter| adapter.name()).collect();
    info!("Registered {} adapters: {}", names.len(), names.join(", "));
    if let Some(dir) = &working_dir {
        info!("Working directory: {}", dir.display());
    }

    if !cli.skip_startup_probe {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let reports = registry.connect_all_with_report().await;
            if reports.iter().any(|report| !report.connected) {
                tracing::warn!(
                    "Startup adapter guidance (share with users who need to install prerequisites):\n{}",
                    format_install_guidance(&reports)
                );
            }
        });
    }

    let service = SsgMcpService::new(dispatcher, working_dir)
        .serve(rmcp::transport::stdio())
        .await?;

    let outcome = tokio::select! {
        result = service.waiting() => Some(result),
        reason = shutdown_signal() => {
            info!("Received {}, shutting down", reason);
            None
        }
    };

    registry.disconnect_all();
    match outcome {
        Some(result) => {
            let quit_reason = result?;
            info!("MCP session ended: {:?}", quit_reason);
        }
        None => info!("MCP session cancelled"),
    }
    Ok(0)
}

async fn shutdown_signal() -> &'static str {
    let terminate = async {
        #[cfg(unix)]
        {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut term_signal) => {
                    term_signal.recv().await;
                }
                Err(e) => {
                    tracing::warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        }
        #[cfg(not(unix))]
        {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = signal::ctrl_c() => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
