//! # CLI Mode
//!
//! Runs a single tool and prints its result. Standard output and standard error of the
//! tool are forwarded unchanged and the process exits with the tool's exit code.

use crate::constants::{DISPATCH_ERROR_EXIT_CODE, SPAWN_FAILURE_EXIT_CODE, TIMEOUT_EXIT_CODE};
use crate::dispatcher::{DispatchResponse, Dispatcher};
use crate::shell::cli::{Cli, OutputFormat};
use crate::tool::parse_qualified_tool_name;
use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Value};
use std::{path::Path, time::Duration};

/// Run in CLI mode (execute a single tool and print the result).
///
/// # Errors
/// Returns an error for a malformed tool name or malformed input; dispatch errors are
/// printed and reported through the exit code instead.
pub async fn run_cli_mode(
    cli: &Cli,
    dispatcher: &Dispatcher,
    working_dir: Option<&Path>,
) -> Result<i32> {
    let name = cli
        .tool_name
        .as_deref()
        .context("CLI mode requires a tool name")?;
    let (adapter, tool) = parse_qualified_tool_name(name)
        .ok_or_else(|| anyhow!("Tool name '{}' is not of the form '<adapter>.<tool>'", name))?;
    let input = build_input(cli.input.as_deref(), &cli.tool_args)?;
    tracing::debug!("CLI dispatch {} with input {}", name, input);

    let dispatch = dispatcher.invoke(adapter, tool, &input, working_dir);
    let response = match cli.timeout {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), dispatch).await {
            Ok(response) => response,
            Err(_) => {
                tracing::warn!("{} timed out after {}s", name, secs);
                eprintln!("{} timed out after {}s", name, secs);
                return Ok(TIMEOUT_EXIT_CODE);
            }
        },
        None => dispatch.await,
    };

    print_response(&response, cli.format)?;
    Ok(exit_code(&response))
}

/// Merge `--input` JSON and trailing `key=value` pairs into one input object.
///
/// Values that parse as JSON keep their JSON type (`port=8080` is a number,
/// `drafts=true` a boolean); anything else is taken as a string. Pairs override keys
/// from `--input`.
pub fn build_input(input_json: Option<&str>, pairs: &[String]) -> Result<Value> {
    let mut input = match input_json {
        Some(raw) => match serde_json::from_str::<Value>(raw).context("--input is not valid JSON")? {
            Value::Object(map) => map,
            other => bail!("--input must be a JSON object, got {}", other),
        },
        None => Map::new(),
    };

    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("Tool argument '{}' is not of the form key=value", pair);
        };
        if key.is_empty() {
            bail!("Tool argument '{}' has an empty key", pair);
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        input.insert(key.to_string(), value);
    }
    Ok(Value::Object(input))
}

fn print_response(response: &DispatchResponse, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    if let Some(result) = &response.result {
        print!("{}", result.stdout);
        eprint!("{}", result.stderr);
    }
    if let Some(error) = &response.error {
        eprintln!("error: {}", error.message);
        for violation in &error.violations {
            eprintln!("  - {}", violation);
        }
        if let Some(hint) = &error.install_hint {
            eprintln!("install: {}", hint);
        }
    }
    Ok(())
}

fn exit_code(response: &DispatchResponse) -> i32 {
    match &response.result {
        Some(result) => result.exit_code.unwrap_or(SPAWN_FAILURE_EXIT_CODE),
        None => DISPATCH_ERROR_EXIT_CODE,
    }
}
