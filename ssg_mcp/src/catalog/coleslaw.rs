use anyhow::Result;

use super::{PATH_TO_SITE_ROOT, adapter_version};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool, ToolInput, quoted};

const DEFAULT_PREVIEW_PORT: &str = "8080";

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "coleslaw".into(),
        display_name: "Coleslaw".into(),
        target_language: "Common Lisp".into(),
        description: "Flexible static blog/site generator written in Common Lisp".into(),
        binary: "sbcl".into(),
        install_hint: Some(
            "Install SBCL and Quicklisp, then run (ql:quickload :coleslaw) once".into(),
        ),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "coleslaw_init",
                "Initialize a new Coleslaw blog",
                InputSchema::empty().optional("path", PropertyType::String, "Path for the new blog"),
                |input| {
                    let path = quoted(input.text("path").unwrap_or("."));
                    Ok(coleslaw(format!("(coleslaw:setup {})", path)))
                },
            ),
            Tool::command(
                "coleslaw_build",
                "Build the Coleslaw site",
                InputSchema::empty().optional("path", PropertyType::String, PATH_TO_SITE_ROOT),
                |input| {
                    let path = quoted(input.text("path").unwrap_or("."));
                    Ok(coleslaw(format!("(coleslaw:main {})", path)))
                },
            ),
            Tool::command(
                "coleslaw_preview",
                "Preview the site locally",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number (default: 8080)"),
                preview,
            ),
            Tool::command(
                "coleslaw_new_post",
                "Create a new post",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .required("title", PropertyType::String, "Post title"),
                new_post,
            ),
            adapter_version("coleslaw_version", "Get SBCL version"),
        ],
    }
}

/// Load Coleslaw through Quicklisp, evaluate `expression`, exit.
fn coleslaw(expression: String) -> CommandPlan {
    CommandPlan::adapter(["--eval", "(ql:quickload :coleslaw)", "--eval"])
        .arg(expression)
        .arg("--quit")
}

fn preview(input: &ToolInput) -> Result<CommandPlan> {
    let port = input
        .number("port")
        .unwrap_or_else(|| DEFAULT_PREVIEW_PORT.to_string());
    Ok(coleslaw(format!("(coleslaw:preview :port {})", port)).in_dir(input.text("path")))
}

fn new_post(input: &ToolInput) -> Result<CommandPlan> {
    let title = quoted(input.text("title").unwrap_or_default());
    Ok(coleslaw(format!("(coleslaw:new-post {})", title)).in_dir(input.text("path")))
}
