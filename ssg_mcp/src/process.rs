//! # Process Runner
//!
//! Every external command in this crate goes through a [`ProcessRunner`]. The runner
//! receives a fully resolved [`Invocation`] (program, arguments, working directory and
//! optional standard input), spawns exactly one child process, captures both output
//! streams and reports the outcome as a [`ProcessResult`].
//!
//! ## Failure normalization
//!
//! The runner never returns an error. A child that could not be started at all (missing
//! binary, permission denied, missing working directory) is reported as a
//! `ProcessResult` with `success == false`, an empty stdout, a diagnostic on stderr and
//! `exit_code == None`. A child that started and exited carries its literal exit code.
//!
//! ## Cancellation
//!
//! Children are spawned with `kill_on_drop(true)`. A caller that wraps [`ProcessRunner::run`]
//! in `tokio::time::timeout` (or drops the future for any other reason) terminates the
//! child instead of leaking it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    io::ErrorKind,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Outcome of a single external process run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Mirrors the child's own zero/non-zero exit convention.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    /// `None` only when the process could not be spawned.
    pub exit_code: Option<i32>,
}

impl ProcessResult {
    /// Result for a child that could not be started.
    pub fn spawn_failure(diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: diagnostic.into(),
            exit_code: None,
        }
    }

    /// Result for a child that ran to completion with the given exit code.
    pub fn exited(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            success: exit_code == 0,
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: Some(exit_code),
        }
    }

    /// True when the child was never started.
    pub fn is_spawn_failure(&self) -> bool {
        self.exit_code.is_none()
    }

    /// Human-readable rendering used by the MCP and CLI surfaces.
    pub fn render(&self) -> String {
        let mut output = String::new();
        if !self.stdout.is_empty() {
            output.push_str(self.stdout.trim_end());
        }
        if !self.stderr.is_empty() {
            if !output.is_empty() {
                output.push_str("\n\n");
            }
            output.push_str("stderr:\n");
            output.push_str(self.stderr.trim_end());
        }
        if !output.is_empty() {
            output.push_str("\n\n");
        }
        match self.exit_code {
            Some(code) => output.push_str(&format!("exit code: {}", code)),
            None => output.push_str("process was not started"),
        }
        output
    }
}

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// `None` means the current process working directory.
    pub working_dir: Option<PathBuf>,
    /// Written to the child's stdin; `None` gives the child a null stdin.
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Executes external processes.
///
/// Implementations must be infallible from the caller's point of view: every failure mode
/// is folded into the returned [`ProcessResult`].
#[async_trait]
pub trait ProcessRunner: Send + Sync + fmt::Debug {
    async fn run(&self, invocation: &Invocation) -> ProcessResult;
}

/// [`ProcessRunner`] backed by `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for SystemProcessRunner {
    async fn run(&self, invocation: &Invocation) -> ProcessResult {
        tracing::debug!(
            "Spawning '{}' in {}",
            invocation,
            invocation
                .working_dir
                .as_deref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "<current directory>".to_string())
        );

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true);
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(error) => {
                let diagnostic = spawn_diagnostic(invocation, &error);
                tracing::debug!("{}", diagnostic);
                return ProcessResult::spawn_failure(diagnostic);
            }
        };

        // Feed stdin from a separate task so a chatty child cannot deadlock on a full
        // stdout pipe while we are still writing.
        let stdin_task = match (invocation.stdin.clone(), child.stdin.take()) {
            (Some(input), Some(mut pipe)) => Some(tokio::spawn(async move {
                if let Err(error) = pipe.write_all(input.as_bytes()).await {
                    tracing::debug!("Child closed stdin early: {}", error);
                }
            })),
            _ => None,
        };

        let output = child.wait_with_output().await;
        if let Some(task) = stdin_task {
            let _ = task.await;
        }

        match output {
            Ok(output) => {
                let result = ProcessResult {
                    success: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    exit_code: Some(exit_code_of(output.status)),
                };
                tracing::debug!(
                    "'{}' exited with {:?} ({} bytes stdout, {} bytes stderr)",
                    invocation.program,
                    result.exit_code,
                    result.stdout.len(),
                    result.stderr.len()
                );
                result
            }
            Err(error) => ProcessResult::spawn_failure(format!(
                "failed to collect output of '{}': {}",
                invocation.program, error
            )),
        }
    }
}

/// Literal exit code, or the shell convention `128 + signal` for a signalled child.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}

fn spawn_diagnostic(invocation: &Invocation, error: &std::io::Error) -> String {
    if let Some(dir) = invocation.working_dir.as_deref()
        && !dir.is_dir()
    {
        return format!(
            "failed to spawn '{}': working directory '{}' does not exist",
            invocation.program,
            dir.display()
        );
    }

    match error.kind() {
        ErrorKind::NotFound => format!(
            "failed to spawn '{}': executable not found ({}). Is it installed and on PATH?",
            invocation.program, error
        ),
        ErrorKind::PermissionDenied => format!(
            "failed to spawn '{}': permission denied ({})",
            invocation.program, error
        ),
        _ => format!("failed to spawn '{}': {}", invocation.program, error),
    }
}

/// Resolve a tool-provided directory against the dispatch working directory.
///
/// Absolute paths are used verbatim; relative paths are joined onto `base` when one is
/// given and otherwise left relative to the current process directory.
pub fn resolve_working_dir(requested: Option<&Path>, base: Option<&Path>) -> Option<PathBuf> {
    match (requested, base) {
        (Some(dir), Some(base)) if dir.is_relative() => Some(base.join(dir)),
        (Some(dir), _) => Some(dir.to_path_buf()),
        (None, base) => base.map(Path::to_path_buf),
    }
}
