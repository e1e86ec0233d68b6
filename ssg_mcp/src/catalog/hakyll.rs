use anyhow::Result;

use super::{PATH_TO_SITE_ROOT, adapter_version, site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool, ToolInput};

// Hakyll sites are compiled Haskell programs, run through `stack exec site -- ...`.
const SITE: [&str; 3] = ["exec", "site", "--"];

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "hakyll".into(),
        display_name: "Hakyll".into(),
        target_language: "Haskell".into(),
        description: "Haskell library for generating static sites with Pandoc support".into(),
        binary: "stack".into(),
        install_hint: Some("Install Stack from https://docs.haskellstack.org/".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "hakyll_init",
                "Initialize a new Hakyll site (using stack template)",
                InputSchema::empty()
                    .required("name", PropertyType::String, "Project name")
                    .optional("path", PropertyType::String, "Path for the project"),
                init,
            ),
            Tool::command(
                "hakyll_build",
                "Build the Hakyll site",
                site_root(PATH_TO_SITE_ROOT),
                |input| Ok(site_command(input, &["build"])),
            ),
            Tool::command(
                "hakyll_watch",
                "Start Hakyll watch server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number")
                    .optional("host", PropertyType::String, "Host to bind to"),
                watch,
            ),
            Tool::command(
                "hakyll_clean",
                "Clean the build cache",
                site_root(PATH_TO_SITE_ROOT),
                |input| Ok(site_command(input, &["clean"])),
            ),
            Tool::command(
                "hakyll_rebuild",
                "Clean and rebuild the site",
                site_root(PATH_TO_SITE_ROOT),
                |input| Ok(site_command(input, &["rebuild"])),
            ),
            Tool::command(
                "hakyll_check",
                "Check for broken links",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("internal", PropertyType::Boolean, "Check internal links only"),
                |input| {
                    Ok(site_command(input, &["check"])
                        .flag_if("--internal-links", input.flag("internal")))
                },
            ),
            Tool::command(
                "hakyll_deploy",
                "Deploy the site",
                site_root(PATH_TO_SITE_ROOT),
                |input| Ok(site_command(input, &["deploy"])),
            ),
            adapter_version("hakyll_version", "Get Stack/Hakyll version"),
        ],
    }
}

fn site_command(input: &ToolInput, args: &[&str]) -> CommandPlan {
    CommandPlan::adapter(SITE)
        .in_dir(input.text("path"))
        .extend_args(args.iter().copied())
}

fn init(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["new"])
        .opt_arg(input.text("name"))
        .arg("hakyll-template")
        .in_dir(input.text("path")))
}

fn watch(input: &ToolInput) -> Result<CommandPlan> {
    Ok(site_command(input, &["watch"])
        .opt_value("--port", input.number("port"))
        .opt_value("--host", input.text("host")))
}
