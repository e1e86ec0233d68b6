use super::{PATH_TO_SITE_ROOT, adapter_version, in_site_root, site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "marmot".into(),
        display_name: "Marmot".into(),
        target_language: "Crystal".into(),
        description: "Static site generator written in Crystal".into(),
        binary: "marmot".into(),
        install_hint: Some(
            "Install Crystal from https://crystal-lang.org/install/, then build https://github.com/erdnaxeli/marmot"
                .into(),
        ),
        // A Crystal toolchain can build marmot from a project's shard.yml.
        probes: vec![
            Probe::adapter(["--version"]),
            Probe::named("crystal", ["--version"]),
        ],
        tools: vec![
            Tool::command(
                "marmot_init",
                "Initialize a new Marmot site",
                site_root("Path for the new site"),
                |input| Ok(CommandPlan::adapter(["init"]).in_dir(input.text("path"))),
            ),
            Tool::command(
                "marmot_build",
                "Build the Marmot site",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("output", PropertyType::String, "Output directory"),
                |input| {
                    Ok(CommandPlan::adapter(["build"])
                        .opt_value("--output", input.text("output"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "marmot_serve",
                "Start development server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number"),
                |input| {
                    Ok(CommandPlan::adapter(["serve"])
                        .opt_value("--port", input.number("port"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("marmot_watch", "Watch and rebuild on changes", Program::Adapter, &["watch"]),
            in_site_root("marmot_clean", "Clean build output", Program::Adapter, &["clean"]),
            in_site_root(
                "marmot_deps",
                "Install Crystal dependencies",
                Program::Named("shards"),
                &["install"],
            ),
            adapter_version("marmot_version", "Get Marmot version"),
        ],
    }
}
