use super::adapter_version;
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool};

const PATH_TO_PROJECT_ROOT: &str = "Path to project root";

/// `reggae` generates build files for a backend; building and cleaning then go through `make`.
pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "reggae".into(),
        display_name: "Reggae".into(),
        target_language: "D".into(),
        description: "Build system and static site generator in D".into(),
        binary: "reggae".into(),
        install_hint: Some("Install a D toolchain, then run: dub fetch reggae && dub run reggae".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "reggae_init",
                "Initialize Reggae build",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("backend", PropertyType::String, "Build backend (make, ninja, etc.)"),
                |input| {
                    let backend = input.text("backend").map(|backend| format!("--backend={}", backend));
                    Ok(CommandPlan::adapter(Vec::<String>::new())
                        .opt_arg(backend.as_deref())
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "reggae_build",
                "Build the project",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("target", PropertyType::String, "Build target"),
                |input| {
                    Ok(CommandPlan::named("make", Vec::<String>::new())
                        .opt_arg(input.text("target"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "reggae_clean",
                "Clean build artifacts",
                InputSchema::empty().optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT),
                |input| Ok(CommandPlan::named("make", ["clean"]).in_dir(input.text("path"))),
            ),
            adapter_version("reggae_version", "Get Reggae version"),
        ],
    }
}
