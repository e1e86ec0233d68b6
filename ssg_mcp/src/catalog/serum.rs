use super::{PATH_TO_SITE_ROOT, fixed};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

/// Serum ships as mix tasks, so availability means `mix` knows the `serum` task.
pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "serum".into(),
        display_name: "Serum".into(),
        target_language: "Elixir".into(),
        description: "Simple static website generator written in Elixir".into(),
        binary: "mix".into(),
        install_hint: Some("Install Elixir, then run: mix archive.install hex serum_new".into()),
        probes: vec![Probe::adapter(["help", "serum"])],
        tools: vec![
            Tool::command(
                "serum_init",
                "Initialize a new Serum project",
                InputSchema::empty().required("path", PropertyType::String, "Path for the new site"),
                // serum.new creates the directory, so it runs from the dispatch directory.
                |input| Ok(CommandPlan::adapter(["serum.new"]).opt_arg(input.text("path"))),
            ),
            Tool::command(
                "serum_build",
                "Build the Serum site",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("output", PropertyType::String, "Output directory"),
                |input| {
                    Ok(CommandPlan::adapter(["serum.build"])
                        .opt_value("--output", input.text("output"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "serum_server",
                "Start Serum development server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number (default: 8080)"),
                |input| {
                    Ok(CommandPlan::adapter(["serum.server"])
                        .opt_value("--port", input.number("port"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "serum_gen_page",
                "Generate a new page",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .required("title", PropertyType::String, "Page title")
                    .optional("name", PropertyType::String, "Page filename"),
                |input| {
                    Ok(CommandPlan::adapter(["serum.gen.page"])
                        .opt_arg(input.text("title"))
                        .opt_value("--name", input.text("name"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "serum_gen_post",
                "Generate a new blog post",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .required("title", PropertyType::String, "Post title")
                    .optional("tag", PropertyType::String, "Tags (comma-separated)"),
                |input| {
                    Ok(CommandPlan::adapter(["serum.gen.post"])
                        .opt_arg(input.text("title"))
                        .opt_value("--tag", input.text("tag"))
                        .in_dir(input.text("path")))
                },
            ),
            fixed("serum_version", "Get Serum version", Program::Adapter, &["serum", "--version"]),
        ],
    }
}
