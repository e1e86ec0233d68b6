use super::{fixed, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

/// Cryogen projects are Leiningen projects; every tool is a `lein` subcommand.
pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "cryogen".into(),
        display_name: "Cryogen".into(),
        target_language: "Clojure".into(),
        description: "Simple static site generator written in Clojure".into(),
        binary: "lein".into(),
        install_hint: Some("Install Leiningen from https://leiningen.org/".into()),
        probes: vec![Probe::adapter(["version"])],
        tools: vec![
            Tool::command(
                "cryogen_new",
                "Create a new Cryogen site",
                InputSchema::empty()
                    .required("name", PropertyType::String, "Project name")
                    .optional("path", PropertyType::String, "Path for the project"),
                |input| {
                    Ok(CommandPlan::adapter(["new", "cryogen"])
                        .opt_arg(input.text("name"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("cryogen_build", "Build the Cryogen site", Program::Adapter, &["run"]),
            in_site_root(
                "cryogen_serve",
                "Start Cryogen server with live reload",
                Program::Adapter,
                &["ring", "server"],
            ),
            in_site_root("cryogen_clean", "Clean build artifacts", Program::Adapter, &["clean"]),
            in_site_root("cryogen_deps", "Fetch dependencies", Program::Adapter, &["deps"]),
            fixed("cryogen_version", "Get Leiningen version", Program::Adapter, &["version"]),
        ],
    }
}
