//! # MCP Service
//!
//! [`SsgMcpService`] implements `rmcp::ServerHandler` on top of a [`Dispatcher`].
//!
//! - **`list_tools`**: every tool of every registered adapter, named
//!   `"{adapter}.{tool}"`, with its input schema. Listing never probes or spawns.
//! - **`call_tool`**: splits the qualified name and dispatches. A tool that ran is a
//!   successful MCP call even when the subprocess failed; in that case the result is
//!   flagged `is_error` and still carries the captured output.
//!
//! Dispatch errors become MCP errors with the serialized error info attached as data:
//! `invalid_params` for unknown adapters or tools and invalid input, `internal_error`
//! for unavailable adapters and executor faults.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
        Tool as McpTool, ToolsCapability,
    },
    service::{RequestContext, RoleServer},
};
use serde_json::{Map, Value};
use std::{path::PathBuf, sync::Arc};

use crate::dispatcher::Dispatcher;
use crate::error::{DispatchError, ErrorInfo, ErrorKind};
use crate::process::ProcessResult;
use crate::tool::{parse_qualified_tool_name, qualified_tool_name};

const INSTRUCTIONS: &str = "Tools are named '<adapter>.<tool>', e.g. 'zola.zola_build'. \
Each call runs the adapter's command-line tool once and returns its stdout, stderr and exit code. \
Adapters connect on first use; an adapter whose tool is not installed reports install guidance.";

#[derive(Debug, Clone)]
pub struct SsgMcpService {
    dispatcher: Dispatcher,
    /// Base directory for relative `path` inputs and for tools run without one.
    working_dir: Option<PathBuf>,
}

impl SsgMcpService {
    pub fn new(dispatcher: Dispatcher, working_dir: Option<PathBuf>) -> Self {
        Self {
            dispatcher,
            working_dir,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// MCP tool definitions for every registered tool, in registration order.
    pub fn tool_definitions(&self) -> Vec<McpTool> {
        let registry = self.dispatcher.registry();
        let mut tools = Vec::new();
        for adapter in registry.adapters() {
            for tool in adapter.tools() {
                let name = qualified_tool_name(adapter.name(), tool.name());
                tools.push(McpTool {
                    name: name.clone().into(),
                    title: Some(format!("{}: {}", adapter.display_name(), tool.name())),
                    icons: None,
                    description: Some(
                        format!("{} ({})", tool.description(), adapter.display_name()).into(),
                    ),
                    input_schema: Arc::new(tool.schema().to_json()),
                    output_schema: None,
                    annotations: None,
                    meta: None,
                });
            }
        }
        tools
    }

    /// Dispatch a call by qualified tool name.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, McpError> {
        let Some((adapter, tool)) = parse_qualified_tool_name(name) else {
            return Err(McpError::invalid_params(
                format!("Tool name '{}' is not of the form '<adapter>.<tool>'", name),
                None,
            ));
        };

        let input = arguments.map(Value::Object).unwrap_or(Value::Null);
        let outcome = self
            .dispatcher
            .try_invoke(adapter, tool, &input, self.working_dir.as_deref())
            .await;
        match outcome {
            Ok(result) => Ok(process_result_to_mcp(&result)),
            Err(error) => Err(dispatch_error_to_mcp(&error)),
        }
    }
}

fn process_result_to_mcp(result: &ProcessResult) -> CallToolResult {
    let content = vec![Content::text(result.render())];
    if result.success {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    }
}

fn dispatch_error_to_mcp(error: &DispatchError) -> McpError {
    let info = ErrorInfo::from(error);
    let message = info.message.clone();
    let data = serde_json::to_value(&info).ok();
    match info.kind {
        ErrorKind::UnknownAdapter | ErrorKind::UnknownTool | ErrorKind::InvalidInput => {
            McpError::invalid_params(message, data)
        }
        ErrorKind::AdapterUnavailable | ErrorKind::Execution => {
            McpError::internal_error(message, data)
        }
    }
}

impl ServerHandler for SsgMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                title: Some("Static site generator adapters".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move {
            Ok(ListToolsResult {
                meta: None,
                tools: self.tool_definitions(),
                next_cursor: None,
            })
        }
    }

    fn call_tool(
        &self,
        params: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            tracing::info!("call_tool {}", params.name);
            self.call(params.name.as_ref(), params.arguments).await
        }
    }
}
