//! Test helpers shared by unit and integration tests.

use async_trait::async_trait;
use serde_json::Value;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::process::{Invocation, ProcessResult, ProcessRunner};
use crate::tool::ToolInput;

#[derive(Debug, Clone)]
struct Response {
    program: String,
    args_prefix: Vec<String>,
    result: ProcessResult,
}

impl Response {
    fn matches(&self, invocation: &Invocation) -> bool {
        self.program == invocation.program && invocation.args.starts_with(&self.args_prefix)
    }
}

/// Scripted [`ProcessRunner`] that records every invocation instead of spawning.
///
/// Programs without a scripted response behave like a missing binary: the result is a
/// spawn failure with `exit_code == None`.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    responses: Arc<Mutex<Vec<Response>>>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
    delay: Option<Duration>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every run of `program` with `result`.
    pub fn respond(self, program: &str, result: ProcessResult) -> Self {
        self.respond_when(program, &[], result)
    }

    /// Answer runs of `program` whose arguments start with `args_prefix`.
    ///
    /// The longest matching prefix wins; among equal prefixes the latest rule wins.
    pub fn respond_when(self, program: &str, args_prefix: &[&str], result: ProcessResult) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push(Response {
                program: program.to_string(),
                args_prefix: args_prefix.iter().map(|arg| arg.to_string()).collect(),
                result,
            });
        }
        self
    }

    /// Answer every run of `program` with a successful, empty result.
    pub fn succeed(self, program: &str) -> Self {
        self.respond(program, ProcessResult::exited(0, "", ""))
    }

    /// Drop every scripted response for `program`, as if its binary was uninstalled.
    pub fn forget(&self, program: &str) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.retain(|response| response.program != program);
        }
    }

    /// Sleep before answering, to widen race windows in concurrency tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|invocations| invocations.clone())
            .unwrap_or_default()
    }

    pub fn programs(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .map(|invocation| invocation.program)
            .collect()
    }

    /// The most recent invocation, if any.
    pub fn last(&self) -> Option<Invocation> {
        self.invocations().pop()
    }

    pub fn clear(&self) {
        if let Ok(mut invocations) = self.invocations.lock() {
            invocations.clear();
        }
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> ProcessResult {
        if let Ok(mut invocations) = self.invocations.lock() {
            invocations.push(invocation.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .ok()
            .and_then(|responses| {
                responses
                    .iter()
                    .filter(|response| response.matches(invocation))
                    .max_by_key(|response| response.args_prefix.len())
                    .map(|response| response.result.clone())
            })
            .unwrap_or_else(|| {
                ProcessResult::spawn_failure(format!(
                    "failed to spawn '{}': executable not found",
                    invocation.program
                ))
            })
    }
}

/// Build a [`ToolInput`] from a JSON object literal.
///
/// # Panics
/// When `value` is not an object.
pub fn tool_input(value: Value) -> ToolInput {
    match value {
        Value::Object(map) => ToolInput::from(map),
        other => panic!("tool input must be a JSON object, got {}", other),
    }
}
