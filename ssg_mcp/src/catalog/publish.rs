use super::{PATH_TO_SITE_ROOT, fixed, in_site_root, site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

const SWIFT: Program = Program::Named("swift");

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "publish".into(),
        display_name: "Publish".into(),
        target_language: "Swift".into(),
        description: "Static site generator built for Swift developers by John Sundell".into(),
        binary: "publish".into(),
        install_hint: Some(
            "git clone https://github.com/JohnSundell/Publish && cd Publish && make".into(),
        ),
        // The publish CLI has no version flag; a Swift toolchain is enough to build sites.
        probes: vec![
            Probe::adapter(["--help"]),
            Probe::named("swift", ["--version"]),
        ],
        tools: vec![
            Tool::command(
                "publish_new",
                "Create a new Publish website",
                site_root("Path for the new site"),
                |input| Ok(CommandPlan::adapter(["new"]).in_dir(input.text("path"))),
            ),
            in_site_root("publish_generate", "Generate the website", Program::Adapter, &["generate"]),
            Tool::command(
                "publish_run",
                "Start local development server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number"),
                |input| {
                    Ok(CommandPlan::adapter(["run"])
                        .opt_value("--port", input.number("port"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("publish_deploy", "Deploy the website", Program::Adapter, &["deploy"]),
            in_site_root("publish_build", "Build the Swift package", SWIFT, &["build"]),
            fixed("publish_version", "Get Swift version", SWIFT, &["--version"]),
        ],
    }
}
