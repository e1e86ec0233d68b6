use super::{adapter_version, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

const PATH_TO_PROJECT_ROOT: &str = "Path to project root";

/// Laika runs as an sbt plugin; tools are sbt tasks.
pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "laika".into(),
        display_name: "Laika".into(),
        target_language: "Scala".into(),
        description: "Customizable site and e-book generator in Scala".into(),
        binary: "sbt".into(),
        install_hint: Some(
            "Install sbt from https://www.scala-sbt.org/ and add the Laika sbt plugin to project/plugins.sbt"
                .into(),
        ),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            in_site_root("laika_site", "Generate HTML site", Program::Adapter, &["laikaSite"]),
            in_site_root("laika_pdf", "Generate PDF document", Program::Adapter, &["laikaPDF"]),
            in_site_root("laika_epub", "Generate EPUB e-book", Program::Adapter, &["laikaEPUB"]),
            Tool::command(
                "laika_preview",
                "Start preview server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_PROJECT_ROOT)
                    .optional("port", PropertyType::Number, "Port number (configured in build.sbt; not passed to sbt)"),
                // The preview port is a build setting, not a task argument.
                |input| Ok(CommandPlan::adapter(["laikaPreview"]).in_dir(input.text("path"))),
            ),
            in_site_root("laika_clean", "Clean generated output", Program::Adapter, &["clean"]),
            adapter_version("laika_version", "Get sbt version"),
        ],
    }
}
