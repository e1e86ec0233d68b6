use super::{PATH_TO_SITE_ROOT, adapter_version, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "yocaml".into(),
        display_name: "YOCaml".into(),
        target_language: "OCaml".into(),
        description: "Composable static site generator written in OCaml".into(),
        binary: "dune".into(),
        install_hint: Some("Install OCaml and opam, then run: opam install dune yocaml".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "yocaml_init",
                "Initialize a new YOCaml project",
                InputSchema::empty()
                    .optional("path", PropertyType::String, "Path for the new site")
                    .required("name", PropertyType::String, "Project name"),
                |input| {
                    Ok(CommandPlan::adapter(["init", "project"])
                        .opt_arg(input.text("name"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("yocaml_build", "Build the YOCaml site", Program::Adapter, &["build"]),
            Tool::command(
                "yocaml_exec",
                "Execute the site generator",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("target", PropertyType::String, "Build target (default: ./bin/main.exe)"),
                |input| {
                    Ok(CommandPlan::adapter(["exec"])
                        .arg(input.text("target").unwrap_or("./bin/main.exe"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("yocaml_clean", "Clean build artifacts", Program::Adapter, &["clean"]),
            in_site_root(
                "yocaml_deps",
                "Install dependencies via opam",
                Program::Named("opam"),
                &["install", ".", "--deps-only"],
            ),
            adapter_version("yocaml_version", "Get Dune version"),
        ],
    }
}
