use anyhow::Result;

use super::{adapter_version, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool, ToolInput};

const DEFAULT_TEMPLATE: &str = "srid/ema-template";

/// Ema sites are Nix flakes; every tool runs through `nix`.
pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "ema".into(),
        display_name: "Ema".into(),
        target_language: "Haskell".into(),
        description: "Next-gen Haskell static site generator with hot reload and Nix support".into(),
        binary: "nix".into(),
        install_hint: Some("Install Nix with flakes enabled: https://nixos.org/download/".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "ema_init",
                "Initialize a new Ema site from template",
                InputSchema::empty()
                    .required("path", PropertyType::String, "Path for the new site")
                    .optional(
                        "template",
                        PropertyType::String,
                        "Template to use (default: srid/ema-template)",
                    ),
                init,
            ),
            in_site_root("ema_run", "Run Ema development server with hot reload", Program::Adapter, &["run"]),
            in_site_root("ema_build", "Build the Ema site for production", Program::Adapter, &["build"]),
            in_site_root("ema_develop", "Enter development shell", Program::Adapter, &["develop"]),
            in_site_root("ema_update", "Update flake inputs", Program::Adapter, &["flake", "update"]),
            adapter_version("ema_version", "Get Nix version"),
        ],
    }
}

fn init(input: &ToolInput) -> Result<CommandPlan> {
    let template = input.text("template").unwrap_or(DEFAULT_TEMPLATE);
    Ok(CommandPlan::adapter(["flake", "init", "-t"])
        .arg(format!("github:{}", template))
        .in_dir(input.text("path")))
}
