use anyhow::{Result, bail};
use regex::Regex;
use std::sync::LazyLock;

use super::{adapter_version, julia_eval};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool, ToolInput, julia_quoted};

const PATH_TO_PROJECT_ROOT: &str = "Path to project root";
const DEFAULT_SERVE_PORT: &str = "8000";

// Julia module path: dotted identifiers, `!` allowed after the first character.
static MODULE_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_!]*(\.[A-Za-z_][A-Za-z0-9_!]*)*$").ok()
});

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "documenter".into(),
        display_name: "Documenter.jl".into(),
        target_language: "Julia".into(),
        description: "Documentation generator for Julia packages".into(),
        binary: "julia".into(),
        install_hint: Some("Install Julia, then run: julia -e 'using Pkg; Pkg.add(\"Documenter\")'".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "documenter_makedocs",
                "Build documentation",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("sitename", PropertyType::String, "Site name"),
                |input| Ok(documenter_call("makedocs", "sitename", input)),
            ),
            Tool::command(
                "documenter_deploydocs",
                "Deploy documentation",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("repo", PropertyType::String, "Repository URL"),
                |input| Ok(documenter_call("deploydocs", "repo", input)),
            ),
            Tool::command(
                "documenter_doctest",
                "Run doctests",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .required("module", PropertyType::String, "Module name"),
                doctest,
            ),
            Tool::command(
                "documenter_serve",
                "Serve documentation locally with LiveServer",
                InputSchema::empty()
                    .optional("path", PropertyType::String, "Path to project root containing docs/build")
                    .optional("port", PropertyType::Number, "Port number (default: 8000)"),
                serve,
            ),
            adapter_version("documenter_version", "Get Julia/Documenter version"),
        ],
    }
}

/// `using Documenter; <function>(<keyword>="<value>")`, the keyword only when given.
fn documenter_call(function: &str, keyword: &str, input: &ToolInput) -> CommandPlan {
    let argument = input
        .text(keyword)
        .map(|value| format!("{}={}", keyword, julia_quoted(value)))
        .unwrap_or_default();
    julia_eval(format!("using Documenter; {}({})", function, argument)).in_dir(input.text("path"))
}

/// The module name is spliced into code unquoted, so anything but an identifier is refused.
fn doctest(input: &ToolInput) -> Result<CommandPlan> {
    let module = input.text("module").unwrap_or_default();
    let valid = MODULE_NAME
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(module));
    if !valid {
        bail!("'{}' is not a valid Julia module name", module);
    }
    Ok(julia_eval(format!(
        "using Documenter, {module}; doctest({module})"
    ))
    .in_dir(input.text("path")))
}

fn serve(input: &ToolInput) -> Result<CommandPlan> {
    let port = input
        .number("port")
        .unwrap_or_else(|| DEFAULT_SERVE_PORT.to_string());
    Ok(julia_eval(format!(
        "using LiveServer; serve(dir=\"docs/build\", port={})",
        port
    ))
    .in_dir(input.text("path")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tool_input;
    use serde_json::json;

    #[test]
    fn doctest_accepts_dotted_module_paths() {
        let plan = doctest(&tool_input(json!({ "module": "MyPkg.Sub" }))).unwrap();
        assert_eq!(plan.args[1], "using Documenter, MyPkg.Sub; doctest(MyPkg.Sub)");
    }

    #[test]
    fn doctest_refuses_code_injection() {
        let error = doctest(&tool_input(json!({ "module": "Base; run(`rm -rf /`)" }))).unwrap_err();
        assert!(error.to_string().contains("not a valid Julia module name"));
    }

    #[test]
    fn serve_defaults_the_port() {
        let plan = serve(&tool_input(json!({}))).unwrap();
        assert_eq!(plan.args[1], "using LiveServer; serve(dir=\"docs/build\", port=8000)");
    }

    #[test]
    fn makedocs_omits_absent_sitename() {
        let plan = documenter_call("makedocs", "sitename", &tool_input(json!({})));
        assert_eq!(plan.args[1], "using Documenter; makedocs()");
        let plan = documenter_call("makedocs", "sitename", &tool_input(json!({ "sitename": "Docs" })));
        assert_eq!(plan.args[1], "using Documenter; makedocs(sitename=\"Docs\")");
    }

    #[test]
    fn string_keywords_cannot_interpolate_code() {
        let plan = documenter_call(
            "makedocs",
            "sitename",
            &tool_input(json!({ "sitename": "$(run(`touch /tmp/x`))" })),
        );
        assert_eq!(
            plan.args[1],
            r#"using Documenter; makedocs(sitename="\$(run(`touch /tmp/x`))")"#
        );

        let plan = documenter_call("deploydocs", "repo", &tool_input(json!({ "repo": "a$b" })));
        assert_eq!(plan.args[1], r#"using Documenter; deploydocs(repo="a\$b")"#);
    }
}
