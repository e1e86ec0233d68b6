use super::{PATH_TO_SITE_ROOT, adapter_version, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

const DEFAULT_TASK: &str = "build";

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "perun".into(),
        display_name: "Perun".into(),
        target_language: "Clojure".into(),
        description: "Composable static site generator using Boot build tool".into(),
        binary: "boot".into(),
        install_hint: Some("Install Boot from https://github.com/boot-clj/boot#install".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "perun_build",
                "Build the Perun site",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("task", PropertyType::String, "Boot task to run (default: build)"),
                |input| {
                    Ok(CommandPlan::adapter([input.text("task").unwrap_or(DEFAULT_TASK)])
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("perun_dev", "Start development server with watch", Program::Adapter, &["dev"]),
            in_site_root(
                "perun_watch",
                "Watch and rebuild on changes",
                Program::Adapter,
                &["watch", "build"],
            ),
            Tool::command(
                "perun_serve",
                "Serve the built site",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number"),
                |input| {
                    Ok(CommandPlan::adapter(["serve"])
                        .opt_value("-p", input.number("port"))
                        .in_dir(input.text("path")))
                },
            ),
            adapter_version("perun_version", "Get Boot version"),
        ],
    }
}
