use anyhow::Result;

use super::{PATH_TO_SITE_ROOT, adapter_version, julia_eval, site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool, ToolInput, julia_quoted};

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "staticwebpages".into(),
        display_name: "StaticWebPages.jl".into(),
        target_language: "Julia".into(),
        description: "Academic and personal website generator in Julia".into(),
        binary: "julia".into(),
        install_hint: Some(
            "Install Julia, then run: julia -e 'using Pkg; Pkg.add(\"StaticWebPages\")'".into(),
        ),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "staticwebpages_init",
                "Initialize a new StaticWebPages site",
                site_root("Path for the new site"),
                init,
            ),
            Tool::command(
                "staticwebpages_build",
                "Build the site",
                site_root(PATH_TO_SITE_ROOT),
                |input| Ok(julia_eval("using StaticWebPages; build()").in_dir(input.text("path"))),
            ),
            Tool::command(
                "staticwebpages_serve",
                "Serve the site locally",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number (default: 8000)"),
                serve,
            ),
            adapter_version("staticwebpages_version", "Get Julia version"),
        ],
    }
}

// init scaffolds into its argument, which need not exist yet.
fn init(input: &ToolInput) -> Result<CommandPlan> {
    let path = julia_quoted(input.text("path").unwrap_or("."));
    Ok(julia_eval(format!("using StaticWebPages; init({})", path)))
}

fn serve(input: &ToolInput) -> Result<CommandPlan> {
    let port = input.number("port").unwrap_or_else(|| "8000".to_string());
    Ok(julia_eval(format!("using StaticWebPages; serve(port={})", port)).in_dir(input.text("path")))
}
