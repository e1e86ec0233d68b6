//! Names and defaults shared across the crate.

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "SSG_MCP_CONFIG";

/// Configuration file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".ssg_mcp.json";

/// Configuration file looked up in the per-user config directory.
pub const USER_CONFIG_FILE: &str = "ssg_mcp.json";

/// Separator between adapter and tool in exposed tool names (`zola.zola_build`).
pub const QUALIFIED_NAME_SEPARATOR: char = '.';

/// `directories::ProjectDirs` coordinates for config and log locations.
pub const PROJECT_QUALIFIER: &str = "com";
pub const PROJECT_ORGANIZATION: &str = "ssg_mcp";
pub const PROJECT_APPLICATION: &str = "ssg_mcp";

/// Process exit code for a CLI dispatch that never produced a process result.
pub const DISPATCH_ERROR_EXIT_CODE: i32 = 2;

/// Process exit code for a CLI dispatch whose tool could not be spawned.
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 127;

/// Process exit code for a CLI dispatch cut off by `--timeout`.
pub const TIMEOUT_EXIT_CODE: i32 = 124;
