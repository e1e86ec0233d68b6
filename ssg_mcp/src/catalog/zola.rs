use anyhow::Result;

use super::{PATH_TO_SITE_ROOT, adapter_version};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool, ToolInput};

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "zola".into(),
        display_name: "Zola".into(),
        target_language: "Rust".into(),
        description: "Fast static site generator written in Rust with built-in Sass compilation and syntax highlighting".into(),
        binary: "zola".into(),
        install_hint: Some("See https://www.getzola.org/documentation/getting-started/installation/".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "zola_init",
                "Initialize a new Zola site",
                InputSchema::empty()
                    .required("path", PropertyType::String, "Path for the new site")
                    .optional("force", PropertyType::Boolean, "Overwrite existing directory"),
                init,
            ),
            Tool::command(
                "zola_build",
                "Build the Zola site",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("baseUrl", PropertyType::String, "Base URL for the site")
                    .optional("outputDir", PropertyType::String, "Output directory")
                    .optional("drafts", PropertyType::Boolean, "Include drafts"),
                build,
            ),
            Tool::command(
                "zola_serve",
                "Start Zola development server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number (default: 1111)")
                    .optional("interface", PropertyType::String, "Interface to bind to")
                    .optional("drafts", PropertyType::Boolean, "Include drafts")
                    .optional("openBrowser", PropertyType::Boolean, "Open browser automatically"),
                serve,
            ),
            Tool::command(
                "zola_check",
                "Check the site for errors",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("drafts", PropertyType::Boolean, "Include drafts"),
                check,
            ),
            adapter_version("zola_version", "Get Zola version"),
        ],
    }
}

fn init(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["init"])
        .opt_arg(input.text("path"))
        .flag_if("--force", input.flag("force")))
}

fn build(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["build"])
        .opt_value("--base-url", input.text("baseUrl"))
        .opt_value("--output-dir", input.text("outputDir"))
        .flag_if("--drafts", input.flag("drafts"))
        .in_dir(input.text("path")))
}

fn serve(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["serve"])
        .opt_value("--port", input.number("port"))
        .opt_value("--interface", input.text("interface"))
        .flag_if("--drafts", input.flag("drafts"))
        .flag_if("--open", input.flag("openBrowser"))
        .in_dir(input.text("path")))
}

fn check(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["check"])
        .flag_if("--drafts", input.flag("drafts"))
        .in_dir(input.text("path")))
}
