use serde::{Deserialize, Serialize};

use crate::schema_validation::Violation;

/// Errors raised while building or querying the adapter registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Adapter '{0}' is already registered")]
    DuplicateAdapter(String),

    #[error("Unknown adapter '{0}'")]
    UnknownAdapter(String),

    #[error("Adapter '{adapter}' has no tool named '{tool}'")]
    UnknownTool { adapter: String, tool: String },

    #[error("Adapter '{adapter}' declares tool '{tool}' more than once")]
    DuplicateTool { adapter: String, tool: String },

    #[error("Invalid {what} name '{name}': {reason}")]
    InvalidName {
        what: &'static str,
        name: String,
        reason: String,
    },
}

/// Errors a dispatch can end in. All of them are surfaced as data, never raised
/// past the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown adapter '{0}'")]
    UnknownAdapter(String),

    #[error("Adapter '{adapter}' has no tool named '{tool}'")]
    UnknownTool { adapter: String, tool: String },

    #[error("Invalid input for '{tool}': {}", format_violations(.violations))]
    InvalidInput {
        tool: String,
        violations: Vec<Violation>,
    },

    #[error("Adapter '{adapter}' is unavailable: {reason}")]
    AdapterUnavailable {
        adapter: String,
        reason: String,
        install_hint: Option<String>,
    },

    #[error("Tool '{tool}' failed to execute: {message}")]
    Execution { tool: String, message: String },
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::UnknownAdapter(_) => ErrorKind::UnknownAdapter,
            DispatchError::UnknownTool { .. } => ErrorKind::UnknownTool,
            DispatchError::InvalidInput { .. } => ErrorKind::InvalidInput,
            DispatchError::AdapterUnavailable { .. } => ErrorKind::AdapterUnavailable,
            DispatchError::Execution { .. } => ErrorKind::Execution,
        }
    }
}

impl From<RegistryError> for DispatchError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::UnknownAdapter(name) => DispatchError::UnknownAdapter(name),
            RegistryError::UnknownTool { adapter, tool } => {
                DispatchError::UnknownTool { adapter, tool }
            }
            // Registration errors cannot occur during lookup; report them verbatim.
            other => DispatchError::Execution {
                tool: String::new(),
                message: other.to_string(),
            },
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownAdapter,
    UnknownTool,
    InvalidInput,
    AdapterUnavailable,
    Execution,
}

/// Serializable form of a [`DispatchError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_hint: Option<String>,
}

impl From<&DispatchError> for ErrorInfo {
    fn from(error: &DispatchError) -> Self {
        let violations = match error {
            DispatchError::InvalidInput { violations, .. } => violations.clone(),
            _ => Vec::new(),
        };
        let install_hint = match error {
            DispatchError::AdapterUnavailable { install_hint, .. } => install_hint.clone(),
            _ => None,
        };
        Self {
            kind: error.kind(),
            message: error.to_string(),
            violations,
            install_hint,
        }
    }
}

impl From<DispatchError> for ErrorInfo {
    fn from(error: DispatchError) -> Self {
        Self::from(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalid_input_lists_every_violation() {
        let error = DispatchError::InvalidInput {
            tool: "cobalt_new".into(),
            violations: vec![
                Violation::MissingRequired {
                    property: "title".into(),
                },
                Violation::TypeMismatch {
                    property: "path".into(),
                    expected: crate::schema_validation::PropertyType::String,
                    actual: "number".into(),
                },
            ],
        };
        let message = error.to_string();
        assert!(message.contains("'title'"));
        assert!(message.contains("'path'"));
    }

    #[test]
    fn error_info_serializes_kind_as_snake_case() {
        let info = ErrorInfo::from(DispatchError::AdapterUnavailable {
            adapter: "zola".into(),
            reason: "probe failed".into(),
            install_hint: Some("cargo install zola".into()),
        });
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["kind"], json!("adapter_unavailable"));
        assert_eq!(value["install_hint"], json!("cargo install zola"));
        assert!(value.get("violations").is_none());
    }

    #[test]
    fn registry_lookup_errors_map_to_dispatch_errors() {
        let error: DispatchError = RegistryError::UnknownAdapter("ghost".into()).into();
        assert_eq!(error.kind(), ErrorKind::UnknownAdapter);
        let error: DispatchError = RegistryError::UnknownTool {
            adapter: "zola".into(),
            tool: "nope".into(),
        }
        .into();
        assert_eq!(error.kind(), ErrorKind::UnknownTool);
    }
}
