use super::{PATH_TO_SITE_ROOT, fixed, in_site_root, site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

/// Frog is a `raco` subcommand, so every invocation starts with `frog`.
pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "frog".into(),
        display_name: "Frog".into(),
        target_language: "Racket".into(),
        description: "Static blog generator written in Racket".into(),
        binary: "raco".into(),
        install_hint: Some("Install Racket, then run: raco pkg install frog".into()),
        probes: vec![Probe::adapter(["frog", "--help"])],
        tools: vec![
            Tool::command(
                "frog_init",
                "Initialize a new Frog project",
                site_root("Path for the new blog"),
                |input| Ok(CommandPlan::adapter(["frog", "--init"]).in_dir(input.text("path"))),
            ),
            in_site_root("frog_build", "Build the Frog blog", Program::Adapter, &["frog", "--build"]),
            Tool::command(
                "frog_preview",
                "Build and preview the blog",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number"),
                |input| {
                    Ok(CommandPlan::adapter(["frog", "--preview"])
                        .opt_value("--port", input.number("port"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "frog_new_post",
                "Create a new blog post",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .required("title", PropertyType::String, "Post title"),
                |input| {
                    Ok(CommandPlan::adapter(["frog", "--new"])
                        .opt_arg(input.text("title"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("frog_clean", "Clean generated files", Program::Adapter, &["frog", "--clean"]),
            in_site_root(
                "frog_watch",
                "Watch for changes and rebuild",
                Program::Adapter,
                &["frog", "--watch"],
            ),
            fixed("frog_version", "Get Frog version", Program::Adapter, &["frog", "--version"]),
        ],
    }
}
