use super::{adapter_version, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

const PATH_TO_PROJECT_ROOT: &str = "Path to project root";
const DEFAULT_PACKAGE: &str = "nimib";

/// Site generation with the nimib ecosystem: `nimble` manages packages, `nim` runs scripts.
pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "nimrod".into(),
        display_name: "Nimrod".into(),
        target_language: "Nim".into(),
        description: "Static site generation using Nim (nimib, nimibook ecosystem)".into(),
        binary: "nimble".into(),
        install_hint: Some("Install Nim (which ships nimble) from https://nim-lang.org/install.html".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "nimrod_init",
                "Initialize a new Nim project with nimib",
                InputSchema::empty()
                    .optional("path", PropertyType::String, "Path for the new project")
                    .required("name", PropertyType::String, "Project name"),
                |input| {
                    Ok(CommandPlan::adapter(["init"])
                        .opt_arg(input.text("name"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "nimrod_build",
                "Build Nim project",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("release", PropertyType::Boolean, "Build in release mode"),
                |input| {
                    Ok(CommandPlan::adapter(["build"])
                        .flag_if("--release", input.flag("release"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "nimrod_run",
                "Run site generator script",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("script", PropertyType::String, "Script to run"),
                |input| {
                    Ok(CommandPlan::named("nim", ["c", "-r"])
                        .opt_arg(input.text("script"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "nimrod_install",
                "Install nimib/nimibook packages",
                InputSchema::empty().optional(
                    "package",
                    PropertyType::String,
                    "Package name (nimib, nimibook, etc.)",
                ),
                |input| {
                    Ok(CommandPlan::adapter(["install"])
                        .arg(input.text("package").unwrap_or(DEFAULT_PACKAGE)))
                },
            ),
            in_site_root("nimrod_deps", "Install project dependencies", Program::Adapter, &["install", "-d"]),
            Tool::command(
                "nimrod_docs",
                "Generate documentation",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("file", PropertyType::String, "Source file"),
                |input| {
                    Ok(CommandPlan::named("nim", ["doc"])
                        .opt_arg(input.text("file"))
                        .in_dir(input.text("path")))
                },
            ),
            adapter_version("nimrod_version", "Get Nim/Nimble version"),
        ],
    }
}
