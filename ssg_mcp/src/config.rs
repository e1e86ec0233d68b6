//! # Configuration
//!
//! An optional JSON file customizes the built-in adapters:
//!
//! ```json
//! {
//!   "adapters": {
//!     "zola": { "binary": "/opt/zola/bin/zola" },
//!     "fornax": { "enabled": false },
//!     "documenter": { "install_instructions": "juliaup add release" }
//!   }
//! }
//! ```
//!
//! The file is located by [`resolve_config_path`]: an explicit path, then the
//! `SSG_MCP_CONFIG` environment variable, then `./.ssg_mcp.json`, then `ssg_mcp.json` in
//! the per-user config directory. No file at all means the default configuration.

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::constants::{
    CONFIG_ENV_VAR, LOCAL_CONFIG_FILE, PROJECT_APPLICATION, PROJECT_ORGANIZATION,
    PROJECT_QUALIFIER, USER_CONFIG_FILE,
};

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SsgConfig {
    /// Per-adapter settings keyed by adapter name (e.g. `zola`).
    #[serde(default)]
    pub adapters: BTreeMap<String, AdapterSettings>,
}

/// Settings for one adapter. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AdapterSettings {
    /// Executable to run instead of the conventional command name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
    /// Disabled adapters are not registered at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Replaces the built-in install hint shown for an unavailable adapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_instructions: Option<String>,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            binary: None,
            enabled: true,
            install_instructions: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

impl SsgConfig {
    pub fn settings(&self, adapter: &str) -> Option<&AdapterSettings> {
        self.adapters.get(adapter)
    }

    pub fn is_enabled(&self, adapter: &str) -> bool {
        self.settings(adapter).is_none_or(|settings| settings.enabled)
    }

    /// Configured adapter names that are not in `known`, in sorted order.
    pub fn unknown_adapters<'a>(&'a self, known: &[&str]) -> Vec<&'a str> {
        self.adapters
            .keys()
            .map(String::as_str)
            .filter(|name| !known.contains(name))
            .collect()
    }
}

/// Load a configuration file. A missing file yields the default configuration.
pub async fn load_config(path: &Path) -> anyhow::Result<SsgConfig> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::debug!("No configuration at {}, using defaults", path.display());
        return Ok(SsgConfig::default());
    }

    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read configuration {}", path.display()))?;
    let config: SsgConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid configuration {}", path.display()))?;
    tracing::info!(
        "Loaded configuration from {} ({} adapter entries)",
        path.display(),
        config.adapters.len()
    );
    Ok(config)
}

/// Locate the configuration file using the process environment.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let user_dir = directories::ProjectDirs::from(
        PROJECT_QUALIFIER,
        PROJECT_ORGANIZATION,
        PROJECT_APPLICATION,
    )
    .map(|dirs| dirs.config_dir().to_path_buf());
    resolve_config_path_from(
        explicit,
        std::env::var_os(CONFIG_ENV_VAR),
        &cwd,
        user_dir.as_deref(),
    )
}

/// [`resolve_config_path`] with its inputs made explicit.
///
/// An explicit path or environment value is returned whether or not it exists; the
/// implicit locations are only returned when a file is there.
pub fn resolve_config_path_from(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    cwd: &Path,
    user_config_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(value));
    }
    let local = cwd.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    user_config_dir
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.is_file())
}

/// JSON schema of the configuration file.
pub fn config_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(SsgConfig)).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_to_enabled() {
        let config: SsgConfig =
            serde_json::from_str(r#"{ "adapters": { "zola": { "binary": "/opt/zola" } } }"#).unwrap();
        let zola = config.settings("zola").unwrap();
        assert!(zola.enabled);
        assert_eq!(zola.binary.as_deref(), Some("/opt/zola"));
        assert!(config.is_enabled("mdbook"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = serde_json::from_str::<SsgConfig>(r#"{ "adapters": { "zola": { "path": "x" } } }"#)
            .unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }

    #[test]
    fn unknown_adapters_are_listed() {
        let config: SsgConfig =
            serde_json::from_str(r#"{ "adapters": { "zola": {}, "jekyll": {} } }"#).unwrap();
        assert_eq!(config.unknown_adapters(&["zola", "mdbook"]), vec!["jekyll"]);
    }

    #[test]
    fn schema_describes_adapters() {
        let schema = config_schema();
        let text = schema.to_string();
        assert!(text.contains("adapters"));
        assert!(text.contains("install_instructions"));
    }
}
