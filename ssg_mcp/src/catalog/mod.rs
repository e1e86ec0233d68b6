//! # Built-in Adapter Catalog
//!
//! Each submodule describes one static-site-generator family as an [`AdapterSpec`]:
//! identity, conventional binary, install hint, ordered probes and tools. Tool executors
//! only plan commands; spawning is left to the runner in the execution context.
//!
//! [`configured_specs`] applies a [`SsgConfig`] on top of [`builtin_specs`]: disabled
//! adapters are dropped, binaries and install hints are overridden.

use anyhow::Result;
use async_trait::async_trait;

use crate::adapter::AdapterSpec;
use crate::config::SsgConfig;
use crate::process::ProcessResult;
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, ExecutionContext, Program, Tool, ToolExecutor, ToolInput};

mod babashka;
mod cobalt;
mod coleslaw;
mod cryogen;
mod documenter;
mod ema;
mod fornax;
mod franklin;
mod frog;
mod hakyll;
mod laika;
mod marmot;
mod mdbook;
mod nimble_publisher;
mod nimrod;
mod orchid;
mod perun;
mod pollen;
mod publish;
mod reggae;
mod scalatex;
mod serum;
mod staticwebpages;
mod tableau;
mod wub;
mod yocaml;
mod zola;
mod zotonic;

pub(crate) const PATH_TO_SITE_ROOT: &str = "Path to site root";

/// Every built-in adapter, in registration order.
pub fn builtin_specs() -> Vec<AdapterSpec> {
    vec![
        zola::spec(),
        mdbook::spec(),
        cobalt::spec(),
        hakyll::spec(),
        ema::spec(),
        fornax::spec(),
        publish::spec(),
        franklin::spec(),
        documenter::spec(),
        coleslaw::spec(),
        babashka::spec(),
        cryogen::spec(),
        frog::spec(),
        pollen::spec(),
        laika::spec(),
        scalatex::spec(),
        marmot::spec(),
        nimble_publisher::spec(),
        nimrod::spec(),
        orchid::spec(),
        perun::spec(),
        reggae::spec(),
        serum::spec(),
        staticwebpages::spec(),
        tableau::spec(),
        wub::spec(),
        yocaml::spec(),
        zotonic::spec(),
    ]
}

/// Built-in adapters with `config` applied.
pub fn configured_specs(config: &SsgConfig) -> Vec<AdapterSpec> {
    let specs = builtin_specs();

    let known: Vec<&str> = specs.iter().map(|spec| spec.name.as_str()).collect();
    for unknown in config.unknown_adapters(&known) {
        tracing::warn!(
            "Configuration mentions unknown adapter '{}'; known adapters: {}",
            unknown,
            known.join(", ")
        );
    }

    specs
        .into_iter()
        .filter(|spec| {
            let enabled = config.is_enabled(&spec.name);
            if !enabled {
                tracing::info!("Adapter '{}' disabled by configuration", spec.name);
            }
            enabled
        })
        .map(|mut spec| {
            if let Some(settings) = config.settings(&spec.name) {
                if let Some(binary) = settings.binary.as_ref().filter(|b| !b.trim().is_empty()) {
                    spec.binary = binary.clone();
                }
                if let Some(hint) = &settings.install_instructions {
                    spec.install_hint = Some(hint.clone());
                }
            }
            spec
        })
        .collect()
}

/// Runs a fixed argument list, optionally inside the input's `path`.
#[derive(Debug, Clone)]
struct FixedCommand {
    program: Program,
    args: &'static [&'static str],
    in_site_root: bool,
}

#[async_trait]
impl ToolExecutor for FixedCommand {
    async fn execute(&self, input: &ToolInput, ctx: ExecutionContext<'_>) -> Result<ProcessResult> {
        let mut plan = CommandPlan {
            program: self.program.clone(),
            args: self.args.iter().map(|arg| arg.to_string()).collect(),
            working_dir: None,
            stdin: None,
        };
        if self.in_site_root {
            plan = plan.in_dir(input.text("path"));
        }
        let invocation = plan.into_invocation(ctx.binary, ctx.working_dir);
        Ok(ctx.runner.run(&invocation).await)
    }
}

/// A tool with no input that runs `program args`.
pub(crate) fn fixed(name: &str, description: &str, program: Program, args: &'static [&'static str]) -> Tool {
    Tool::new(
        name,
        description,
        InputSchema::empty(),
        FixedCommand {
            program,
            args,
            in_site_root: false,
        },
    )
}

/// `<binary> --version`.
pub(crate) fn adapter_version(name: &str, description: &str) -> Tool {
    fixed(name, description, Program::Adapter, &["--version"])
}

/// A tool whose only input is an optional site root it runs inside.
pub(crate) fn in_site_root(
    name: &str,
    description: &str,
    program: Program,
    args: &'static [&'static str],
) -> Tool {
    Tool::new(
        name,
        description,
        site_root(PATH_TO_SITE_ROOT),
        FixedCommand {
            program,
            args,
            in_site_root: true,
        },
    )
}

/// `julia -e <expression>`.
pub(crate) fn julia_eval(expression: impl Into<String>) -> CommandPlan {
    CommandPlan::adapter(["-e"]).arg(expression)
}

/// Schema with a single optional `path`.
pub(crate) fn site_root(description: &str) -> InputSchema {
    InputSchema::empty().optional("path", PropertyType::String, description)
}
