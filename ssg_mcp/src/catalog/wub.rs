//! Wub runs inside `tclsh`. Inline scripts go to the interpreter on stdin, since
//! `tclsh` has neither an eval flag nor a version flag.

use anyhow::Result;

use super::PATH_TO_SITE_ROOT;
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool, ToolInput, tcl_quoted};

const PATH_TO_WUB_ROOT: &str = "Path to Wub root";

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "wub".into(),
        display_name: "Wub".into(),
        target_language: "Tcl".into(),
        description: "Web framework in Tcl with static site generation capabilities".into(),
        binary: "tclsh".into(),
        install_hint: Some("Install Tcl 8.6+ (tclsh) and the Wub package".into()),
        probes: vec![Probe::adapter(Vec::<String>::new()).with_stdin("puts [info patchlevel]\n")],
        tools: vec![
            Tool::command(
                "wub_start",
                "Start Wub server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_WUB_ROOT)
                    .optional("config", PropertyType::String, "Config file (default: wub.tcl)"),
                |input| {
                    Ok(CommandPlan::adapter([input.text("config").unwrap_or("wub.tcl")])
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "wub_generate",
                "Generate static files",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_WUB_ROOT)
                    .optional("output", PropertyType::String, "Output directory (default: public)"),
                generate,
            ),
            Tool::command(
                "wub_run",
                "Run a Tcl script",
                InputSchema::empty()
                    .optional("path", PropertyType::String, "Working directory")
                    .required("script", PropertyType::String, "Script file to run"),
                |input| Ok(CommandPlan::adapter(input.text("script")).in_dir(input.text("path"))),
            ),
            Tool::command("wub_version", "Get Tcl version", InputSchema::empty(), |_| {
                Ok(CommandPlan::adapter(Vec::<String>::new()).stdin("puts \"Tcl [info patchlevel]\"\n"))
            }),
        ],
    }
}

fn generate(input: &ToolInput) -> Result<CommandPlan> {
    let output = tcl_quoted(input.text("output").unwrap_or("public"));
    let script = format!("source wub.tcl\npackage require Wub\nWub generate {}\n", output);
    Ok(CommandPlan::adapter(Vec::<String>::new())
        .stdin(script)
        .in_dir(input.text("path")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tool_input;
    use serde_json::json;

    #[test]
    fn generate_feeds_script_on_stdin() {
        let plan = generate(&tool_input(json!({ "path": "site" }))).unwrap();
        assert!(plan.args.is_empty());
        assert_eq!(plan.working_dir.as_deref(), Some("site"));
        assert_eq!(
            plan.stdin.as_deref(),
            Some("source wub.tcl\npackage require Wub\nWub generate \"public\"\n")
        );
    }

    #[test]
    fn generate_output_cannot_run_commands() {
        let plan = generate(&tool_input(json!({ "output": "out [exec id] $env(HOME)" }))).unwrap();
        assert_eq!(
            plan.stdin.as_deref(),
            Some("source wub.tcl\npackage require Wub\nWub generate \"out \\[exec id\\] \\$env(HOME)\"\n")
        );
    }

    #[test]
    fn generate_output_newline_stays_inside_the_word() {
        let plan = generate(&tool_input(json!({ "output": "a\"\nexec rm" }))).unwrap();
        let script = plan.stdin.unwrap();
        assert!(script.ends_with("Wub generate \"a\\\"\nexec rm\"\n"));
    }
}
