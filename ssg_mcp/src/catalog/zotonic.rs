use super::{adapter_version, in_site_root};
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Program, Tool};

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "zotonic".into(),
        display_name: "Zotonic".into(),
        target_language: "Erlang".into(),
        description: "Erlang web framework and CMS with static site export".into(),
        binary: "zotonic".into(),
        install_hint: Some("Install Erlang/OTP, then follow https://zotonic.com/docs to install Zotonic".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            in_site_root("zotonic_start", "Start Zotonic", Program::Adapter, &["start"]),
            in_site_root("zotonic_stop", "Stop Zotonic", Program::Adapter, &["stop"]),
            Tool::command(
                "zotonic_addsite",
                "Add a new site",
                InputSchema::empty()
                    .optional("path", PropertyType::String, "Path to Zotonic root")
                    .required("name", PropertyType::String, "Site name"),
                |input| {
                    Ok(CommandPlan::adapter(["addsite"])
                        .opt_arg(input.text("name"))
                        .in_dir(input.text("path")))
                },
            ),
            in_site_root("zotonic_status", "Show Zotonic status", Program::Adapter, &["status"]),
            in_site_root("zotonic_shell", "Start Erlang shell", Program::Adapter, &["shell"]),
            in_site_root("zotonic_compile", "Compile Zotonic", Program::Adapter, &["compile"]),
            adapter_version("zotonic_version", "Get Zotonic version"),
        ],
    }
}
