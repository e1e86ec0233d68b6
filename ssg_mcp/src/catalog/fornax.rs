use super::{PATH_TO_SITE_ROOT, fixed, in_site_root, site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "fornax".into(),
        display_name: "Fornax".into(),
        target_language: "F#".into(),
        description: "Scriptable static site generator using F# and type providers".into(),
        binary: "fornax".into(),
        install_hint: Some("dotnet tool install -g fornax".into()),
        // A local dotnet tool manifest exposes fornax only through `dotnet`.
        probes: vec![
            Probe::adapter(["version"]),
            Probe::named("dotnet", ["fornax", "version"]),
        ],
        tools: vec![
            Tool::command(
                "fornax_new",
                "Create a new Fornax site",
                site_root("Path for the new site"),
                |input| Ok(CommandPlan::adapter(["new"]).in_dir(input.text("path"))),
            ),
            in_site_root("fornax_build", "Build the Fornax site", Program::Adapter, &["build"]),
            Tool::command(
                "fornax_watch",
                "Start Fornax watch server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number"),
                |input| {
                    Ok(CommandPlan::adapter(["watch"])
                        .opt_value("--port", input.number("port"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("fornax_clean", "Clean build output", Program::Adapter, &["clean"]),
            fixed("fornax_version", "Get Fornax version", Program::Adapter, &["version"]),
        ],
    }
}
