//! # Logging Initialization
//!
//! [`init_logging`] installs the process-wide `tracing` subscriber. It is guarded by a
//! `std::sync::Once`, so calling it more than once is harmless.
//!
//! - **Filter**: `RUST_LOG` wins when set; otherwise `"{level},ssg_mcp=debug"`.
//! - **File (default for the server)**: a daily rolling `ssg_mcp.log` in the per-user
//!   cache directory from `directories::ProjectDirs`, written through a non-blocking
//!   appender with ANSI colors off.
//! - **Stderr**: used when file logging is not requested, or when the cache directory
//!   cannot be determined or written. ANSI colors on.
//!
//! Stdout is never used: it carries the MCP stdio transport and CLI-mode output.

use anyhow::Result;
use directories::ProjectDirs;
use std::{
    io::stderr,
    path::{Path, PathBuf},
    sync::Once,
};
use tracing_subscriber::{EnvFilter, fmt::layer, prelude::*};

use crate::constants::{PROJECT_APPLICATION, PROJECT_ORGANIZATION, PROJECT_QUALIFIER};

static INIT: Once = Once::new();

const LOG_FILE_PREFIX: &str = "ssg_mcp.log";

/// Verbose stderr logging for tests.
pub fn init_test_logging() {
    let _ = init_logging("trace", false);
}

/// Directory the rolling log file is written to, if the platform has a cache dir.
pub fn log_directory() -> Option<PathBuf> {
    ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Install the global subscriber.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for fallible sinks.
pub fn init_logging(log_level: &str, log_to_file: bool) -> Result<()> {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},ssg_mcp=debug")));

        if log_to_file
            && let Some(log_dir) = log_directory()
            && test_write_permission(&log_dir)
        {
            // tracing_appender panics on some permission errors despite the check above.
            let appender = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX)
            }));
            if let Ok(appender) = appender {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let installed = tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer().with_writer(non_blocking).with_ansi(false))
                    .try_init()
                    .is_ok();
                if installed {
                    // Flushes on drop; keep it for the life of the process.
                    Box::leak(Box::new(guard));
                }
                return;
            }
        }

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(layer().with_writer(stderr).with_ansi(true))
            .try_init();
    });

    Ok(())
}

/// Create `dir` if needed and check that a file can be written into it.
fn test_write_permission(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let probe = dir.join(".ssg_mcp_log_test");
    match std::fs::write(&probe, "test") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_permission_creates_missing_directories() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        assert!(test_write_permission(&nested));
        assert!(nested.is_dir());
        assert!(!nested.join(".ssg_mcp_log_test").exists());
    }

    #[test]
    fn repeated_initialization_is_harmless() {
        init_test_logging();
        init_test_logging();
        assert!(init_logging("info", true).is_ok());
    }
}
