use anyhow::Result;

use super::{PATH_TO_SITE_ROOT, adapter_version, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool, ToolInput};

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "cobalt".into(),
        display_name: "Cobalt".into(),
        target_language: "Rust".into(),
        description: "Straightforward static site generator written in Rust".into(),
        binary: "cobalt".into(),
        install_hint: Some("cargo install cobalt-bin".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "cobalt_init",
                "Initialize a new Cobalt site",
                InputSchema::empty().optional("path", PropertyType::String, "Path for the new site"),
                |input| Ok(CommandPlan::adapter(["init"]).opt_arg(input.text("path"))),
            ),
            Tool::command(
                "cobalt_build",
                "Build the Cobalt site",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("destination", PropertyType::String, "Output directory")
                    .optional("drafts", PropertyType::Boolean, "Include drafts"),
                build,
            ),
            Tool::command(
                "cobalt_serve",
                "Start Cobalt development server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number")
                    .optional("host", PropertyType::String, "Host to bind to")
                    .optional("drafts", PropertyType::Boolean, "Include drafts"),
                serve,
            ),
            in_site_root("cobalt_watch", "Watch for changes and rebuild", Program::Adapter, &["watch"]),
            in_site_root("cobalt_clean", "Clean the build directory", Program::Adapter, &["clean"]),
            Tool::command(
                "cobalt_new",
                "Create a new post",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .required("title", PropertyType::String, "Post title"),
                new_post,
            ),
            adapter_version("cobalt_version", "Get Cobalt version"),
        ],
    }
}

fn build(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["build"])
        .opt_value("--destination", input.text("destination"))
        .flag_if("--drafts", input.flag("drafts"))
        .in_dir(input.text("path")))
}

fn serve(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["serve"])
        .opt_value("--port", input.number("port"))
        .opt_value("--host", input.text("host"))
        .flag_if("--drafts", input.flag("drafts"))
        .in_dir(input.text("path")))
}

fn new_post(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["new"])
        .opt_arg(input.text("title"))
        .in_dir(input.text("path")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::tool_input;
    use serde_json::json;

    #[test]
    fn new_post_runs_in_site_root() {
        let plan = new_post(&tool_input(json!({ "title": "Hello", "path": "/tmp/site" }))).unwrap();
        assert_eq!(plan.args, vec!["new", "Hello"]);
        assert_eq!(plan.working_dir.as_deref(), Some("/tmp/site"));
    }
}
