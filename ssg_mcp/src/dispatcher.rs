//! # Dispatcher
//!
//! [`Dispatcher::invoke`] is the single entry point for running a tool:
//!
//! 1. resolve the adapter, then the tool;
//! 2. validate the input against the tool's schema, reporting every violation;
//! 3. connect the adapter on demand, refusing to run the tool if no probe succeeds
//!    (a panicking probe counts as a failed one);
//! 4. execute the tool, containing executor errors and panics;
//! 5. wrap the outcome in a [`DispatchResponse`].
//!
//! A tool that ran is always `ok`, whatever its exit code: the subprocess outcome is in
//! `result.success`. Nothing escapes as an error or a panic.

use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use std::{
    panic::AssertUnwindSafe,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::error::{DispatchError, ErrorInfo};
use crate::process::ProcessResult;
use crate::registry::AdapterRegistry;
use crate::schema_validation::validate_input;
use crate::tool::ExecutionContext;

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    pub adapter: String,
    pub tool: String,
    pub input: Value,
    pub working_dir: Option<PathBuf>,
}

/// Uniform outcome of a dispatch: exactly one of `result` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResponse {
    pub ok: bool,
    pub result: Option<ProcessResult>,
    pub error: Option<ErrorInfo>,
}

impl DispatchResponse {
    pub fn completed(result: ProcessResult) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(error: impl Into<ErrorInfo>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

impl From<Result<ProcessResult, DispatchError>> for DispatchResponse {
    fn from(outcome: Result<ProcessResult, DispatchError>) -> Self {
        match outcome {
            Ok(result) => Self::completed(result),
            Err(error) => Self::failed(error),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<AdapterRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<AdapterRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<AdapterRegistry> {
        &self.registry
    }

    pub async fn dispatch(&self, request: &DispatchRequest) -> DispatchResponse {
        self.invoke(
            &request.adapter,
            &request.tool,
            &request.input,
            request.working_dir.as_deref(),
        )
        .await
    }

    pub async fn invoke(
        &self,
        adapter: &str,
        tool: &str,
        input: &Value,
        working_dir: Option<&Path>,
    ) -> DispatchResponse {
        self.try_invoke(adapter, tool, input, working_dir).await.into()
    }

    /// Same steps as [`invoke`](Self::invoke), with the error kept typed.
    pub async fn try_invoke(
        &self,
        adapter_name: &str,
        tool_name: &str,
        input: &Value,
        working_dir: Option<&Path>,
    ) -> Result<ProcessResult, DispatchError> {
        let outcome = self
            .run_steps(adapter_name, tool_name, input, working_dir)
            .await;
        if let Err(error) = &outcome {
            tracing::warn!("Dispatch of {}.{} failed: {}", adapter_name, tool_name, error);
        }
        outcome
    }

    async fn run_steps(
        &self,
        adapter_name: &str,
        tool_name: &str,
        input: &Value,
        working_dir: Option<&Path>,
    ) -> Result<ProcessResult, DispatchError> {
        let (adapter, tool) = self.registry.find_tool(adapter_name, tool_name)?;

        let input = validate_input(tool.schema(), input).map_err(|violations| {
            DispatchError::InvalidInput {
                tool: tool_name.to_string(),
                violations,
            }
        })?;

        // Connecting comes before execution, so a binary that is missing on first use is
        // reported as AdapterUnavailable. The spawn-failure result (`exit_code: None`) is
        // only seen when the binary disappears after the adapter connected.
        let runner = self.registry.runner().as_ref();
        let connected = AssertUnwindSafe(adapter.ensure_connected(runner))
            .catch_unwind()
            .await;
        match connected {
            Ok(Ok(())) => {}
            Ok(Err(report)) => {
                return Err(DispatchError::AdapterUnavailable {
                    adapter: adapter_name.to_string(),
                    reason: report.reason(),
                    install_hint: report.install_hint,
                });
            }
            Err(panic) => {
                adapter.disconnect();
                return Err(DispatchError::AdapterUnavailable {
                    adapter: adapter_name.to_string(),
                    reason: format!("probe panicked: {}", panic_message(panic.as_ref())),
                    install_hint: adapter.install_hint().map(str::to_string),
                });
            }
        }

        tracing::debug!("Executing {}.{}", adapter_name, tool_name);
        let ctx = ExecutionContext {
            binary: adapter.binary(),
            working_dir,
            runner,
        };
        match AssertUnwindSafe(tool.execute(&input, ctx)).catch_unwind().await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(error)) => Err(DispatchError::Execution {
                tool: tool_name.to_string(),
                message: format!("{:#}", error),
            }),
            Err(panic) => Err(DispatchError::Execution {
                tool: tool_name.to_string(),
                message: format!("executor panicked: {}", panic_message(panic.as_ref())),
            }),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn response_carries_exactly_one_side() {
        let ok = DispatchResponse::completed(ProcessResult::exited(1, "", "boom"));
        assert!(ok.ok);
        assert!(ok.error.is_none());

        let failed = DispatchResponse::failed(DispatchError::UnknownAdapter("ghost".into()));
        assert!(!failed.ok);
        assert!(failed.result.is_none());
        assert_eq!(failed.error.map(|e| e.kind), Some(ErrorKind::UnknownAdapter));
    }

    #[test]
    fn panic_messages_are_extracted() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
