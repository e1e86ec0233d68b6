//! # Tools
//!
//! A [`Tool`] is one callable operation of an adapter: a name, a description, an
//! [`InputSchema`] and a [`ToolExecutor`]. Built-in tools are almost always
//! [`Tool::command`] tools whose executor is a pure planning function
//! (`fn(&ToolInput) -> Result<CommandPlan>`): the plan names the program and argument
//! list, the shared executor resolves it against the adapter's binary and the dispatch
//! working directory and hands it to the [`ProcessRunner`].
//!
//! Planning helpers on [`CommandPlan`] encode the argument rules once:
//! absent optional fields add nothing, booleans add their flag only when `true`, and
//! numbers are rendered in plain decimal form.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::{fmt, path::Path, sync::Arc};

use crate::constants::QUALIFIED_NAME_SEPARATOR;
use crate::process::{Invocation, ProcessResult, ProcessRunner, resolve_working_dir};
use crate::schema_validation::InputSchema;

/// Validated tool input. `null` values have already been removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolInput(Map<String, Value>);

impl From<Map<String, Value>> for ToolInput {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl ToolInput {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// String value of `key`, if present and a string.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Boolean value of `key`. `Some(false)` is an explicit `false`, `None` is absent.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Decimal rendering of a numeric `key`, suitable as a CLI argument.
    pub fn number(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Number(number) => Some(format_number(number)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Render a JSON number the way a user would type it: `8080`, not `8080.0`.
pub fn format_number(number: &serde_json::Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float.abs() < 9.0e15 => {
            format!("{}", float as i64)
        }
        Some(float) => float.to_string(),
        None => number.to_string(),
    }
}

/// Quote `value` as a double-quoted Common Lisp string literal. Backslashes and quotes
/// are escaped.
pub fn quoted(value: &str) -> String {
    escape_into_literal(value, &['"', '\\'])
}

/// Quote `value` as a double-quoted Julia string literal.
///
/// Julia interpolates `$name` and `$(expr)` inside double quotes, so `$` is escaped along
/// with backslashes and quotes.
pub fn julia_quoted(value: &str) -> String {
    escape_into_literal(value, &['"', '\\', '$'])
}

/// Quote `value` as a double-quoted Tcl word. Command and variable substitution are
/// escaped along with backslashes and quotes.
pub fn tcl_quoted(value: &str) -> String {
    escape_into_literal(value, &['"', '\\', '$', '[', ']'])
}

fn escape_into_literal(value: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if special.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Which program a plan runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Program {
    /// The adapter's configured binary.
    Adapter,
    /// A fixed secondary program, e.g. `swift` for Publish package builds.
    Named(&'static str),
}

impl Program {
    pub fn resolve(&self, adapter_binary: &str) -> String {
        match self {
            Program::Adapter => adapter_binary.to_string(),
            Program::Named(name) => (*name).to_string(),
        }
    }
}

/// Program and arguments derived from a tool input, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub program: Program,
    pub args: Vec<String>,
    /// Directory requested by the input (typically its `path` property).
    pub working_dir: Option<String>,
    /// Script fed to the program on standard input.
    pub stdin: Option<String>,
}

impl CommandPlan {
    /// Plan running the adapter binary with `args`.
    pub fn adapter<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: Program::Adapter,
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
            stdin: None,
        }
    }

    /// Plan running a fixed secondary program with `args`.
    pub fn named<I, S>(program: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: Program::Named(program),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
            stdin: None,
        }
    }

    pub fn extend_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a positional argument when present.
    pub fn opt_arg(mut self, arg: Option<&str>) -> Self {
        if let Some(arg) = arg {
            self.args.push(arg.to_string());
        }
        self
    }

    /// Append `flag value` when the value is present.
    pub fn opt_value<S: Into<String>>(mut self, flag: &str, value: Option<S>) -> Self {
        if let Some(value) = value {
            self.args.push(flag.to_string());
            self.args.push(value.into());
        }
        self
    }

    /// Append `flag` only for an explicit `true`.
    pub fn flag_if(mut self, flag: &str, value: Option<bool>) -> Self {
        if value == Some(true) {
            self.args.push(flag.to_string());
        }
        self
    }

    /// Run in the given directory when present.
    pub fn in_dir(mut self, dir: Option<&str>) -> Self {
        self.working_dir = dir.map(str::to_string);
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Resolve against the adapter binary and the dispatch working directory.
    pub fn into_invocation(self, adapter_binary: &str, base_dir: Option<&Path>) -> Invocation {
        Invocation {
            program: self.program.resolve(adapter_binary),
            args: self.args,
            working_dir: resolve_working_dir(self.working_dir.as_deref().map(Path::new), base_dir),
            stdin: self.stdin,
        }
    }
}

/// Everything an executor may use besides its input.
#[derive(Clone, Copy)]
pub struct ExecutionContext<'a> {
    /// The owning adapter's resolved binary.
    pub binary: &'a str,
    /// Working directory of the dispatch, if the caller supplied one.
    pub working_dir: Option<&'a Path>,
    pub runner: &'a dyn ProcessRunner,
}

impl fmt::Debug for ExecutionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("binary", &self.binary)
            .field("working_dir", &self.working_dir)
            .finish_non_exhaustive()
    }
}

/// Executes a validated tool input.
///
/// An `Err` means the executor itself failed before producing a result; a subprocess
/// that ran and failed is an `Ok` with `success == false`.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, input: &ToolInput, ctx: ExecutionContext<'_>) -> Result<ProcessResult>;
}

/// Pure mapping from input to command plan.
pub type PlanFn = fn(&ToolInput) -> Result<CommandPlan>;

/// Executor that plans one command and runs it.
#[derive(Debug, Clone, Copy)]
pub struct PlannedCommand(pub PlanFn);

#[async_trait]
impl ToolExecutor for PlannedCommand {
    async fn execute(&self, input: &ToolInput, ctx: ExecutionContext<'_>) -> Result<ProcessResult> {
        let invocation = (self.0)(input)?.into_invocation(ctx.binary, ctx.working_dir);
        Ok(ctx.runner.run(&invocation).await)
    }
}

/// One callable operation of an adapter.
#[derive(Clone)]
pub struct Tool {
    name: String,
    description: String,
    schema: InputSchema,
    executor: Arc<dyn ToolExecutor>,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: InputSchema,
        executor: impl ToolExecutor + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            executor: Arc::new(executor),
        }
    }

    /// A tool that runs the command produced by `plan`.
    pub fn command(name: &str, description: &str, schema: InputSchema, plan: PlanFn) -> Self {
        Self::new(name, description, schema, PlannedCommand(plan))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &InputSchema {
        &self.schema
    }

    /// Run the executor. Callers are expected to have validated `input` already.
    pub async fn execute(&self, input: &ToolInput, ctx: ExecutionContext<'_>) -> Result<ProcessResult> {
        self.executor.execute(input, ctx).await
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// `"{adapter}.{tool}"`, the name a tool is exposed under to MCP clients.
pub fn qualified_tool_name(adapter: &str, tool: &str) -> String {
    format!("{}{}{}", adapter, QUALIFIED_NAME_SEPARATOR, tool)
}

/// Split a qualified name at the first separator. Both halves must be non-empty.
pub fn parse_qualified_tool_name(name: &str) -> Option<(&str, &str)> {
    let (adapter, tool) = name.split_once(QUALIFIED_NAME_SEPARATOR)?;
    if adapter.is_empty() || tool.is_empty() {
        return None;
    }
    Some((adapter, tool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> ToolInput {
        match value {
            Value::Object(map) => ToolInput::from(map),
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn numbers_render_without_fraction() {
        let input = input(json!({ "port": 8080, "ratio": 1.5, "float_port": 3000.0 }));
        assert_eq!(input.number("port").as_deref(), Some("8080"));
        assert_eq!(input.number("ratio").as_deref(), Some("1.5"));
        assert_eq!(input.number("float_port").as_deref(), Some("3000"));
        assert_eq!(input.number("missing"), None);
    }

    #[test]
    fn plan_helpers_omit_absent_values() {
        let input = input(json!({ "drafts": false, "port": 1111 }));
        let plan = CommandPlan::adapter(["serve"])
            .opt_value("--port", input.number("port"))
            .opt_value("--interface", input.text("interface"))
            .flag_if("--drafts", input.flag("drafts"))
            .flag_if("--open", input.flag("openBrowser"));
        assert_eq!(plan.args, vec!["serve", "--port", "1111"]);
    }

    #[test]
    fn into_invocation_resolves_program_and_directory() {
        let plan = CommandPlan::named("swift", ["build"]).in_dir(Some("site"));
        let invocation = plan.into_invocation("publish", Some(Path::new("/work")));
        assert_eq!(invocation.program, "swift");
        assert_eq!(invocation.working_dir.as_deref(), Some(Path::new("/work/site")));

        let invocation = CommandPlan::adapter(["--version"]).into_invocation("/opt/zola", None);
        assert_eq!(invocation.program, "/opt/zola");
        assert_eq!(invocation.working_dir, None);
    }

    #[test]
    fn quoted_escapes_quotes_and_backslashes() {
        assert_eq!(quoted("plain"), "\"plain\"");
        assert_eq!(quoted(r#"say "hi"\now"#), r#""say \"hi\"\\now""#);
        assert_eq!(quoted("$5"), "\"$5\"");
    }

    #[test]
    fn julia_quoted_escapes_interpolation() {
        assert_eq!(julia_quoted("$(run(`id`))"), r#""\$(run(`id`))""#);
        assert_eq!(julia_quoted("costs $x"), r#""costs \$x""#);
        assert_eq!(julia_quoted(r#"a "b" \c"#), r#""a \"b\" \\c""#);
    }

    #[test]
    fn tcl_quoted_escapes_substitution() {
        assert_eq!(tcl_quoted("public"), "\"public\"");
        assert_eq!(tcl_quoted("[exec rm x] $env"), r#""\[exec rm x\] \$env""#);
    }

    #[test]
    fn stdin_reaches_the_invocation() {
        let invocation = CommandPlan::adapter(Vec::<String>::new())
            .stdin("puts hi\n")
            .into_invocation("tclsh", None);
        assert_eq!(invocation.stdin.as_deref(), Some("puts hi\n"));
        assert!(invocation.args.is_empty());
    }

    #[test]
    fn qualified_names_round_trip() {
        let name = qualified_tool_name("zola", "zola_build");
        assert_eq!(name, "zola.zola_build");
        assert_eq!(parse_qualified_tool_name(&name), Some(("zola", "zola_build")));
        assert_eq!(parse_qualified_tool_name("zola_build"), None);
        assert_eq!(parse_qualified_tool_name(".zola_build"), None);
    }
}
