//! # List Tools Mode
//!
//! Prints every registered adapter with its tools and their input parameters. Nothing
//! is probed or spawned.

use crate::registry::{AdapterInfo, AdapterRegistry};
use crate::shell::cli::OutputFormat;
use anyhow::Result;
use serde_json::Value;
use std::fmt::Write;

/// Run in list-tools mode.
///
/// # Errors
/// Returns an error if the catalog cannot be serialized.
pub fn run_list_tools_mode(registry: &AdapterRegistry, format: OutputFormat) -> Result<i32> {
    let adapters = registry.describe();
    match format {
        OutputFormat::Text => print!("{}", render_text(&adapters)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&adapters)?),
    }
    Ok(0)
}

/// Human-readable listing of adapters, tools and parameters.
pub fn render_text(adapters: &[AdapterInfo]) -> String {
    let mut output = String::new();
    for adapter in adapters {
        let _ = writeln!(
            output,
            "{} ({}, {}) via `{}`",
            adapter.display_name, adapter.name, adapter.target_language, adapter.binary
        );
        let _ = writeln!(output, "  {}", adapter.description);
        for tool in &adapter.tools {
            let _ = writeln!(output, "  - {}: {}", tool.qualified_name, tool.description);
            for line in parameter_lines(&tool.input_schema) {
                let _ = writeln!(output, "      {}", line);
            }
        }
        output.push('\n');
    }
    output
}

fn parameter_lines(schema: &serde_json::Map<String, Value>) -> Vec<String> {
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(name, property)| {
            let kind = property.get("type").and_then(Value::as_str).unwrap_or("any");
            let description = property
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let marker = if required.contains(&name.as_str()) {
                ", required"
            } else {
                ""
            };
            format!("{} ({}{}): {}", name, kind, marker, description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SsgConfig;
    use crate::test_utils::RecordingRunner;
    use std::sync::Arc;

    #[test]
    fn text_listing_shows_qualified_names_and_required_markers() {
        let runner = RecordingRunner::new();
        let registry =
            AdapterRegistry::with_builtin_adapters(&SsgConfig::default(), Arc::new(runner.clone()))
                .unwrap();
        let text = render_text(&registry.describe());

        assert!(text.contains("Zola (zola, Rust) via `zola`"));
        assert!(text.contains("- cobalt.cobalt_new:"));
        assert!(text.contains("title (string, required): "));
        assert!(runner.invocations().is_empty());
    }
}
