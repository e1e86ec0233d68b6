use super::{adapter_version, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

const PATH_TO_PROJECT_ROOT: &str = "Path to project root";

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "tableau".into(),
        display_name: "Tableau".into(),
        target_language: "Elixir".into(),
        description: "Modern static site generator for Elixir with LiveView support".into(),
        binary: "mix".into(),
        install_hint: Some("Install Elixir, then run: mix archive.install hex tableau_new".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "tableau_new",
                "Create a new Tableau project",
                InputSchema::empty()
                    .required("name", PropertyType::String, "Project name")
                    .optional("path", PropertyType::String, "Path for the project"),
                |input| {
                    Ok(CommandPlan::adapter(["tableau.new"])
                        .opt_arg(input.text("name"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("tableau_build", "Build the Tableau site", Program::Adapter, &["tableau.build"]),
            Tool::command(
                "tableau_server",
                "Start Tableau development server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("port", PropertyType::Number, "Port number"),
                |input| {
                    Ok(CommandPlan::adapter(["tableau.server"])
                        .opt_value("--port", input.number("port"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("tableau_deps", "Fetch dependencies", Program::Adapter, &["deps.get"]),
            Tool::command(
                "tableau_gen_post",
                "Generate a new post",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .required("title", PropertyType::String, "Post title"),
                |input| {
                    Ok(CommandPlan::adapter(["tableau.gen.post"])
                        .opt_arg(input.text("title"))
                        .in_dir(input.text("path")))
                },
            ),
            adapter_version("tableau_version", "Get Tableau/Mix version"),
        ],
    }
}
