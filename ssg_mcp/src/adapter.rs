//! # Adapter Descriptors
//!
//! An [`AdapterDescriptor`] binds one external static-site-generator family to the
//! registry: identity (name, language, description), the executable it drives, an ordered
//! list of availability [`Probe`]s and its [`Tool`]s.
//!
//! ## Connection lifecycle
//!
//! A descriptor starts `Disconnected`. [`AdapterDescriptor::connect`] runs the probes in
//! declaration order and becomes `Connected` on the first success; when every probe fails
//! it stays (or becomes) `Disconnected`. [`AdapterDescriptor::disconnect`] is synchronous,
//! unconditional and idempotent. [`AdapterDescriptor::is_connected`] is a plain read.
//!
//! Probing is serialized per adapter by an async mutex, so concurrent callers of
//! [`AdapterDescriptor::ensure_connected`] share one probe run instead of spawning one each.
//! The state itself lives in a single atomic word holding a connected bit and a
//! disconnect epoch. `disconnect` never waits for the mutex: it bumps the epoch, and a
//! probe that finishes under an older epoch does not resurrect the connection.

use serde::Serialize;
use std::{
    collections::HashSet,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::sync::Mutex;

use crate::error::RegistryError;
use crate::process::{Invocation, ProcessRunner};
use crate::tool::{Program, Tool};

const CONNECTED_BIT: u64 = 1;

/// One availability probe: a cheap command whose success means the tool is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub program: Program,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl Probe {
    /// Probe the adapter's own binary.
    pub fn adapter<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: Program::Adapter,
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
        }
    }

    /// Probe a fixed fallback program, e.g. the language toolchain.
    pub fn named<I, S>(program: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: Program::Named(program),
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
        }
    }

    /// Feed `script` on standard input, for interpreters without a version flag.
    pub fn with_stdin(mut self, script: impl Into<String>) -> Self {
        self.stdin = Some(script.into());
        self
    }

    pub fn invocation(&self, adapter_binary: &str) -> Invocation {
        Invocation {
            stdin: self.stdin.clone(),
            ..Invocation::new(self.program.resolve(adapter_binary)).args(self.args.iter().cloned())
        }
    }
}

/// Plain description of an adapter, before it is validated into a descriptor.
#[derive(Debug, Clone)]
pub struct AdapterSpec {
    /// Registry key; lowercase identifier.
    pub name: String,
    pub display_name: String,
    pub target_language: String,
    pub description: String,
    /// Executable the adapter drives, overridable from configuration.
    pub binary: String,
    pub install_hint: Option<String>,
    pub probes: Vec<Probe>,
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => f.write_str("disconnected"),
            ConnectionState::Connected => f.write_str("connected"),
        }
    }
}

/// A probe that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeFailure {
    pub command: String,
    pub exit_code: Option<i32>,
    pub diagnostic: String,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "`{}` exited with {}", self.command, code)?,
            None => write!(f, "`{}` could not be started", self.command)?,
        }
        if !self.diagnostic.is_empty() {
            write!(f, ": {}", self.diagnostic)?;
        }
        Ok(())
    }
}

/// Outcome of one connect attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectReport {
    pub adapter: String,
    pub connected: bool,
    /// Probes that failed before the first success (all of them when not connected).
    pub failures: Vec<ProbeFailure>,
    pub install_hint: Option<String>,
}

impl ConnectReport {
    /// One-line reason for a failed connect.
    pub fn reason(&self) -> String {
        if self.connected {
            return "connected".to_string();
        }
        if self.failures.is_empty() {
            return "disconnected while probing".to_string();
        }
        let failures: Vec<String> = self.failures.iter().map(ToString::to_string).collect();
        format!("no availability probe succeeded ({})", failures.join("; "))
    }
}

/// Registry-owned record of one adapter.
pub struct AdapterDescriptor {
    name: String,
    display_name: String,
    target_language: String,
    description: String,
    binary: String,
    install_hint: Option<String>,
    probes: Vec<Probe>,
    tools: Vec<Tool>,
    /// Bit 0: connected. Remaining bits: disconnect epoch.
    state: AtomicU64,
    probe_lock: Mutex<()>,
}

impl AdapterDescriptor {
    pub fn new(spec: AdapterSpec) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for tool in &spec.tools {
            if !seen.insert(tool.name()) {
                return Err(RegistryError::DuplicateTool {
                    adapter: spec.name.clone(),
                    tool: tool.name().to_string(),
                });
            }
        }

        let probes = if spec.probes.is_empty() {
            vec![Probe::adapter(["--version"])]
        } else {
            spec.probes
        };

        Ok(Self {
            name: spec.name,
            display_name: spec.display_name,
            target_language: spec.target_language,
            description: spec.description,
            binary: spec.binary,
            install_hint: spec.install_hint,
            probes,
            tools: spec.tools,
            state: AtomicU64::new(0),
            probe_lock: Mutex::new(()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn install_hint(&self) -> Option<&str> {
        self.install_hint.as_deref()
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// Tools in declaration order.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn tool(&self, name: &str) -> Result<&Tool, RegistryError> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| RegistryError::UnknownTool {
                adapter: self.name.clone(),
                tool: name.to_string(),
            })
    }

    pub fn is_connected(&self) -> bool {
        self.state.load(Ordering::Acquire) & CONNECTED_BIT != 0
    }

    pub fn state(&self) -> ConnectionState {
        if self.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Mark the adapter disconnected. Never blocks and never fails.
    pub fn disconnect(&self) {
        let _ = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                let epoch = current >> 1;
                Some(epoch.wrapping_add(1) << 1)
            });
        tracing::debug!("Adapter '{}' disconnected", self.name);
    }

    /// Run the probes and return whether the adapter ended up connected.
    pub async fn connect(&self, runner: &dyn ProcessRunner) -> bool {
        self.connect_with_report(runner).await.connected
    }

    /// Like [`connect`](Self::connect), with a report of every failed probe.
    pub async fn connect_with_report(&self, runner: &dyn ProcessRunner) -> ConnectReport {
        let _guard = self.probe_lock.lock().await;
        self.probe_locked(runner).await
    }

    /// Connect only if not connected yet. Concurrent callers wait for one shared probe run.
    pub async fn ensure_connected(&self, runner: &dyn ProcessRunner) -> Result<(), ConnectReport> {
        if self.is_connected() {
            return Ok(());
        }
        let _guard = self.probe_lock.lock().await;
        if self.is_connected() {
            return Ok(());
        }
        let report = self.probe_locked(runner).await;
        if report.connected { Ok(()) } else { Err(report) }
    }

    async fn probe_locked(&self, runner: &dyn ProcessRunner) -> ConnectReport {
        let epoch = self.state.load(Ordering::Acquire) >> 1;
        let mut failures = Vec::new();
        let mut probe_succeeded = false;

        for probe in &self.probes {
            let invocation = probe.invocation(&self.binary);
            let result = runner.run(&invocation).await;
            if result.success {
                tracing::debug!("Adapter '{}' probe `{}` succeeded", self.name, invocation);
                probe_succeeded = true;
                break;
            }
            let diagnostic = if result.stderr.trim().is_empty() {
                result.stdout.trim().to_string()
            } else {
                result.stderr.trim().to_string()
            };
            tracing::warn!(
                "Adapter '{}' probe `{}` failed: {}",
                self.name,
                invocation,
                diagnostic
            );
            failures.push(ProbeFailure {
                command: invocation.to_string(),
                exit_code: result.exit_code,
                diagnostic,
            });
        }

        // Only apply the outcome if no disconnect happened while probing.
        let _ = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                if current >> 1 != epoch {
                    return None;
                }
                Some(if probe_succeeded {
                    current | CONNECTED_BIT
                } else {
                    current & !CONNECTED_BIT
                })
            });

        let connected = self.is_connected();
        if connected {
            tracing::info!("Adapter '{}' connected", self.name);
        }
        ConnectReport {
            adapter: self.name.clone(),
            connected,
            failures,
            install_hint: self.install_hint.clone(),
        }
    }
}

impl fmt::Debug for AdapterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterDescriptor")
            .field("name", &self.name)
            .field("binary", &self.binary)
            .field("state", &self.state())
            .field("tools", &self.tools.len())
            .finish()
    }
}
