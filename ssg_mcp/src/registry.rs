//! # Adapter Registry
//!
//! The [`AdapterRegistry`] owns every [`AdapterDescriptor`] for the life of the process,
//! in registration order, together with the [`ProcessRunner`] used for probes and tool
//! execution. It answers lookups, aggregates connect/disconnect across adapters and
//! produces the serializable catalog consumed by hosts.

use futures::{FutureExt, future::join_all};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fmt::Write,
    panic::AssertUnwindSafe,
    sync::{Arc, LazyLock},
};

use crate::adapter::{AdapterDescriptor, AdapterSpec, ConnectReport, ConnectionState};
use crate::catalog;
use crate::config::SsgConfig;
use crate::error::RegistryError;
use crate::process::ProcessRunner;
use crate::tool::{Tool, qualified_tool_name};

static NAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").ok());

/// Adapter and tool names: lowercase identifier, no qualified-name separator.
pub fn validate_name(what: &'static str, name: &str) -> Result<(), RegistryError> {
    let valid = NAME_PATTERN
        .as_ref()
        .map(|pattern| pattern.is_match(name))
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidName {
            what,
            name: name.to_string(),
            reason: "must start with a lowercase letter and contain only [a-z0-9_-]".to_string(),
        })
    }
}

/// Serializable view of a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub qualified_name: String,
    pub description: String,
    pub input_schema: Map<String, Value>,
}

/// Serializable view of an adapter.
#[derive(Debug, Clone, Serialize)]
pub struct AdapterInfo {
    pub name: String,
    pub display_name: String,
    pub target_language: String,
    pub description: String,
    pub binary: String,
    pub state: ConnectionState,
    pub tools: Vec<ToolInfo>,
}

#[derive(Debug)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<AdapterDescriptor>>,
    index: HashMap<String, usize>,
    runner: Arc<dyn ProcessRunner>,
}

impl AdapterRegistry {
    /// An empty registry.
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            adapters: Vec::new(),
            index: HashMap::new(),
            runner,
        }
    }

    /// A registry holding the built-in adapters, filtered and customized by `config`.
    pub fn with_builtin_adapters(
        config: &SsgConfig,
        runner: Arc<dyn ProcessRunner>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new(runner);
        for spec in catalog::configured_specs(config) {
            registry.register_spec(spec)?;
        }
        tracing::info!("Registered {} adapters", registry.len());
        Ok(registry)
    }

    pub fn runner(&self) -> &Arc<dyn ProcessRunner> {
        &self.runner
    }

    pub fn register_spec(&mut self, spec: AdapterSpec) -> Result<Arc<AdapterDescriptor>, RegistryError> {
        self.register(AdapterDescriptor::new(spec)?)
    }

    pub fn register(
        &mut self,
        descriptor: AdapterDescriptor,
    ) -> Result<Arc<AdapterDescriptor>, RegistryError> {
        validate_name("adapter", descriptor.name())?;
        for tool in descriptor.tools() {
            validate_name("tool", tool.name())?;
        }
        if self.index.contains_key(descriptor.name()) {
            return Err(RegistryError::DuplicateAdapter(descriptor.name().to_string()));
        }

        tracing::debug!(
            "Registering adapter '{}' ({} tools, binary '{}')",
            descriptor.name(),
            descriptor.tools().len(),
            descriptor.binary()
        );
        let descriptor = Arc::new(descriptor);
        self.index
            .insert(descriptor.name().to_string(), self.adapters.len());
        self.adapters.push(Arc::clone(&descriptor));
        Ok(descriptor)
    }

    pub fn get(&self, name: &str) -> Result<&Arc<AdapterDescriptor>, RegistryError> {
        self.index
            .get(name)
            .map(|&position| &self.adapters[position])
            .ok_or_else(|| RegistryError::UnknownAdapter(name.to_string()))
    }

    /// Adapters in registration order. Each call starts a fresh iteration.
    pub fn adapters(&self) -> impl Iterator<Item = &Arc<AdapterDescriptor>> + '_ {
        self.adapters.iter()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn find_tool(&self, adapter: &str, tool: &str) -> Result<(&Arc<AdapterDescriptor>, &Tool), RegistryError> {
        let descriptor = self.get(adapter)?;
        let tool = descriptor.tool(tool)?;
        Ok((descriptor, tool))
    }

    /// Connect every adapter independently; the map holds each adapter's outcome.
    pub async fn connect_all(&self) -> HashMap<String, bool> {
        self.connect_all_with_report()
            .await
            .into_iter()
            .map(|report| (report.adapter, report.connected))
            .collect()
    }

    /// Connect every adapter concurrently, in registration order of the returned reports.
    pub async fn connect_all_with_report(&self) -> Vec<ConnectReport> {
        let runner = self.runner.as_ref();
        let attempts = self.adapters.iter().map(|adapter| {
            let adapter = Arc::clone(adapter);
            async move {
                match AssertUnwindSafe(adapter.connect_with_report(runner))
                    .catch_unwind()
                    .await
                {
                    Ok(report) => report,
                    Err(_) => {
                        tracing::warn!("Connecting adapter '{}' panicked", adapter.name());
                        adapter.disconnect();
                        ConnectReport {
                            adapter: adapter.name().to_string(),
                            connected: false,
                            failures: Vec::new(),
                            install_hint: adapter.install_hint().map(str::to_string),
                        }
                    }
                }
            }
        });
        let reports = join_all(attempts).await;
        let connected = reports.iter().filter(|report| report.connected).count();
        tracing::info!("{}/{} adapters connected", connected, reports.len());
        reports
    }

    pub fn disconnect_all(&self) {
        for adapter in &self.adapters {
            adapter.disconnect();
        }
    }

    /// Serializable catalog of adapters and their tools. Runs nothing.
    pub fn describe(&self) -> Vec<AdapterInfo> {
        self.adapters
            .iter()
            .map(|adapter| AdapterInfo {
                name: adapter.name().to_string(),
                display_name: adapter.display_name().to_string(),
                target_language: adapter.target_language().to_string(),
                description: adapter.description().to_string(),
                binary: adapter.binary().to_string(),
                state: adapter.state(),
                tools: adapter
                    .tools()
                    .iter()
                    .map(|tool| ToolInfo {
                        name: tool.name().to_string(),
                        qualified_name: qualified_tool_name(adapter.name(), tool.name()),
                        description: tool.description().to_string(),
                        input_schema: tool.schema().to_json(),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Human-friendly summary of connect reports, listing install hints for failures.
pub fn format_install_guidance(reports: &[ConnectReport]) -> String {
    let failed: Vec<&ConnectReport> = reports.iter().filter(|report| !report.connected).collect();
    if failed.is_empty() {
        return "All registered adapters are available.".to_string();
    }

    let mut output = String::from("Unavailable adapters:\n");
    for report in failed {
        let _ = writeln!(output, "- {}: {}", report.adapter, report.reason());
        if let Some(hint) = report
            .install_hint
            .as_deref()
            .map(str::trim)
            .filter(|hint| !hint.is_empty())
        {
            let _ = writeln!(output, "  install: {}", hint);
        }
    }
    output.trim_end().to_string()
}
