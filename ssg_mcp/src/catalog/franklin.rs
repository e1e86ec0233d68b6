use anyhow::Result;

use super::{PATH_TO_SITE_ROOT, adapter_version, julia_eval, site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool, ToolInput, julia_quoted};

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "franklin".into(),
        display_name: "Franklin.jl".into(),
        target_language: "Julia".into(),
        description: "Static site generator for technical blogging in Julia with LaTeX support".into(),
        binary: "julia".into(),
        install_hint: Some("Install Julia, then run: julia -e 'using Pkg; Pkg.add(\"Franklin\")'".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "franklin_newsite",
                "Create a new Franklin site",
                InputSchema::empty()
                    .optional("path", PropertyType::String, "Path for the new site")
                    .optional("template", PropertyType::String, "Template name"),
                newsite,
            ),
            Tool::command(
                "franklin_serve",
                "Start Franklin development server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("port", PropertyType::Number, "Port number")
                    .optional("host", PropertyType::String, "Host to bind to"),
                serve,
            ),
            Tool::command(
                "franklin_optimize",
                "Build optimized site for deployment",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_SITE_ROOT)
                    .optional("minify", PropertyType::Boolean, "Minify output (default: true)")
                    .optional("prerender", PropertyType::Boolean, "Prerender pages (default: true)"),
                optimize,
            ),
            Tool::command(
                "franklin_publish",
                "Publish site to GitHub Pages",
                site_root(PATH_TO_SITE_ROOT),
                |input| Ok(julia_eval("using Franklin; publish()").in_dir(input.text("path"))),
            ),
            adapter_version("franklin_version", "Get Julia/Franklin version"),
        ],
    }
}

// newsite creates the directory, so it runs from the dispatch directory.
fn newsite(input: &ToolInput) -> Result<CommandPlan> {
    let path = julia_quoted(input.text("path").unwrap_or("."));
    let expression = match input.text("template") {
        Some(template) => format!(
            "using Franklin; newsite({}; template={})",
            path,
            julia_quoted(template)
        ),
        None => format!("using Franklin; newsite({})", path),
    };
    Ok(julia_eval(expression))
}

fn serve(input: &ToolInput) -> Result<CommandPlan> {
    let mut kwargs = Vec::new();
    if let Some(port) = input.number("port") {
        kwargs.push(format!("port={}", port));
    }
    if let Some(host) = input.text("host") {
        kwargs.push(format!("host={}", julia_quoted(host)));
    }
    Ok(julia_eval(format!("using Franklin; serve({})", kwargs.join(", "))).in_dir(input.text("path")))
}

/// Both options are on unless explicitly turned off.
fn optimize(input: &ToolInput) -> Result<CommandPlan> {
    let minify = input.flag("minify").unwrap_or(true);
    let prerender = input.flag("prerender").unwrap_or(true);
    Ok(julia_eval(format!(
        "using Franklin; optimize(minify={}, prerender={})",
        minify, prerender
    ))
    .in_dir(input.text("path")))
}
