use super::adapter_version;
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool, ToolInput};

const PATH_TO_PROJECT_ROOT: &str = "Path to project root";
const DEFAULT_MODULE: &str = "docs";

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "scalatex".into(),
        display_name: "ScalaTex".into(),
        target_language: "Scala".into(),
        description: "Programmable, typesafe document generation in Scala".into(),
        binary: "mill".into(),
        install_hint: Some("Install Mill from https://mill-build.org/ (or sbt from https://www.scala-sbt.org/)".into()),
        probes: vec![
            Probe::adapter(["--version"]),
            Probe::named("sbt", ["--version"]),
        ],
        tools: vec![
            Tool::command(
                "scalatex_compile",
                "Compile ScalaTex documents",
                module_schema("Module to compile"),
                |input| Ok(mill(input, &[], "compile")),
            ),
            Tool::command(
                "scalatex_run",
                "Run ScalaTex generation",
                module_schema("Module to run"),
                |input| Ok(mill(input, &[], "run")),
            ),
            Tool::command(
                "scalatex_watch",
                "Watch and rebuild on changes",
                module_schema("Module to watch"),
                |input| Ok(mill(input, &["--watch"], "compile")),
            ),
            Tool::command(
                "scalatex_clean",
                "Clean build output",
                InputSchema::empty().optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT),
                |input| Ok(CommandPlan::adapter(["clean"]).in_dir(input.text("path"))),
            ),
            adapter_version("scalatex_version", "Get Mill version"),
        ],
    }
}

fn module_schema(module_description: &str) -> InputSchema {
    InputSchema::empty()
        .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
        .optional("module", PropertyType::String, module_description)
}

/// `mill [flags] <module>.<target>`, the module defaulting to `docs`.
fn mill(input: &ToolInput, flags: &[&str], target: &str) -> CommandPlan {
    let module = input.text("module").unwrap_or(DEFAULT_MODULE);
    CommandPlan::adapter(flags.iter().copied())
        .arg(format!("{}.{}", module, target))
        .in_dir(input.text("path"))
}
