use super::fixed;
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool, ToolInput};

const PATH_TO_PROJECT_ROOT: &str = "Path to project root";

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "pollen".into(),
        display_name: "Pollen".into(),
        target_language: "Racket".into(),
        description: "Publishing system for books and long-form content in Racket".into(),
        binary: "raco".into(),
        install_hint: Some("Install Racket, then run: raco pkg install pollen".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "pollen_start",
                "Start Pollen project server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("port", PropertyType::Number, "Port number"),
                |input| {
                    let port = input.number("port");
                    Ok(pollen(input, "start").opt_arg(port.as_deref()))
                },
            ),
            Tool::command(
                "pollen_render",
                "Render Pollen source files",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("file", PropertyType::String, "Specific file to render"),
                |input| Ok(pollen(input, "render").opt_arg(input.text("file"))),
            ),
            Tool::command(
                "pollen_publish",
                "Publish the project",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("dest", PropertyType::String, "Destination directory"),
                |input| Ok(pollen(input, "publish").opt_arg(input.text("dest"))),
            ),
            Tool::command(
                "pollen_reset",
                "Reset Pollen cache",
                project_root(),
                |input| Ok(pollen(input, "reset")),
            ),
            Tool::command(
                "pollen_setup",
                "Run setup for Pollen sources",
                project_root(),
                |input| Ok(pollen(input, "setup")),
            ),
            fixed("pollen_version", "Get Pollen/Racket version", Program::Adapter, &["pollen", "version"]),
        ],
    }
}

fn project_root() -> InputSchema {
    InputSchema::empty().optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
}

/// `raco pollen <command>` inside the project root.
fn pollen(input: &ToolInput, command: &str) -> CommandPlan {
    CommandPlan::adapter(["pollen", command]).in_dir(input.text("path"))
}
