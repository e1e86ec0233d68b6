use super::{adapter_version, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

/// NimblePublisher lives inside a Phoenix application, so tools are `mix` tasks.
pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "nimble-publisher".into(),
        display_name: "NimblePublisher".into(),
        target_language: "Elixir".into(),
        description: "Markdown-based publishing engine for Phoenix/Elixir applications".into(),
        binary: "mix".into(),
        install_hint: Some(
            "Install Elixir from https://elixir-lang.org/install.html, then run: mix archive.install hex phx_new"
                .into(),
        ),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "nimble_publisher_new",
                "Create a new Phoenix project with NimblePublisher",
                InputSchema::empty()
                    .required("name", PropertyType::String, "Project name")
                    .optional("path", PropertyType::String, "Path for the project"),
                |input| {
                    Ok(CommandPlan::adapter(["phx.new"])
                        .opt_arg(input.text("name"))
                        .arg("--no-ecto")
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root(
                "nimble_publisher_deps",
                "Fetch and compile dependencies",
                Program::Adapter,
                &["deps.get"],
            ),
            in_site_root("nimble_publisher_compile", "Compile the project", Program::Adapter, &["compile"]),
            in_site_root("nimble_publisher_server", "Start Phoenix server", Program::Adapter, &["phx.server"]),
            in_site_root("nimble_publisher_build", "Build release", Program::Adapter, &["release"]),
            adapter_version("nimble_publisher_version", "Get Mix/Elixir version"),
        ],
    }
}
