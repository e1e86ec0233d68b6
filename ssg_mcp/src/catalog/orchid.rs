use super::{PATH_TO_SITE_ROOT, fixed, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

const JAVA: Program = Program::Named("java");

/// Orchid is driven through the project's Gradle wrapper, resolved inside the site root.
pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "orchid".into(),
        display_name: "Orchid".into(),
        target_language: "Kotlin".into(),
        description: "Powerful documentation and static site generator for Kotlin/Java".into(),
        binary: "./gradlew".into(),
        install_hint: Some(
            "Install a JDK, then apply the Orchid Gradle plugin (https://orchid.run/) in a project with a Gradle wrapper"
                .into(),
        ),
        // The wrapper only exists inside a project; a JDK is what must be installed.
        probes: vec![Probe::named("java", ["-version"])],
        tools: vec![
            Tool::command(
                "orchid_init",
                "Initialize a new Orchid project",
                InputSchema::empty()
                    .optional("path", PropertyType::String, "Path for the new site")
                    .optional("type", PropertyType::String, "Project type (docs, blog, wiki)"),
                |input| {
                    Ok(CommandPlan::adapter(["init"])
                        .opt_value("--type", input.text("type"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("orchid_build", "Build the Orchid site", Program::Adapter, &["orchidBuild"]),
            Tool::command(
                "orchid_serve",
                "Start Orchid development server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number"),
                |input| {
                    let port = input.number("port").map(|port| format!("-PorchidPort={}", port));
                    Ok(CommandPlan::adapter(["orchidServe"])
                        .opt_arg(port.as_deref())
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("orchid_deploy", "Deploy the Orchid site", Program::Adapter, &["orchidDeploy"]),
            in_site_root("orchid_run", "Run Orchid (build + serve)", Program::Adapter, &["orchidRun"]),
            fixed("orchid_version", "Get Java version", JAVA, &["-version"]),
        ],
    }
}
