//! # Status Mode
//!
//! Probes every adapter and prints which command-line tools are available, with
//! install guidance for the rest.

use crate::adapter::ConnectReport;
use crate::registry::{AdapterRegistry, format_install_guidance};
use crate::shell::cli::OutputFormat;
use anyhow::Result;
use std::fmt::Write;

/// Run in status mode. Exits with 0 when every adapter connected, 1 otherwise.
///
/// # Errors
/// Returns an error if the reports cannot be serialized.
pub async fn run_status_mode(registry: &AdapterRegistry, format: OutputFormat) -> Result<i32> {
    let reports = registry.connect_all_with_report().await;
    match format {
        OutputFormat::Text => println!("{}", render_text(&reports)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }
    let all_connected = reports.iter().all(|report| report.connected);
    Ok(if all_connected { 0 } else { 1 })
}

pub fn render_text(reports: &[ConnectReport]) -> String {
    let width = reports
        .iter()
        .map(|report| report.adapter.len())
        .max()
        .unwrap_or(0);
    let mut output = String::new();
    for report in reports {
        let state = if report.connected { "available" } else { "unavailable" };
        let _ = writeln!(output, "{:width$}  {}", report.adapter, state, width = width);
    }
    output.push('\n');
    output.push_str(&format_install_guidance(reports));
    output
}
