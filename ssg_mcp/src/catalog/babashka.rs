use super::adapter_version;
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool};

const WORKING_DIRECTORY: &str = "Working directory";

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "babashka".into(),
        display_name: "Babashka".into(),
        target_language: "Clojure".into(),
        description: "Fast Clojure scripting runtime, usable for static site generation".into(),
        binary: "bb".into(),
        install_hint: Some("See https://github.com/babashka/babashka#installation".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "babashka_run",
                "Run a Babashka script",
                InputSchema::empty()
                    .optional("path", PropertyType::String, WORKING_DIRECTORY)
                    .required("script", PropertyType::String, "Script file to run"),
                |input| {
                    Ok(CommandPlan::adapter(Vec::<String>::new())
                        .opt_arg(input.text("script"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "babashka_eval",
                "Evaluate Clojure expression",
                InputSchema::empty()
                    .optional("path", PropertyType::String, WORKING_DIRECTORY)
                    .required("expr", PropertyType::String, "Clojure expression"),
                |input| {
                    Ok(CommandPlan::adapter(["-e"])
                        .opt_arg(input.text("expr"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "babashka_tasks",
                "List available tasks",
                InputSchema::empty().optional("path", PropertyType::String, WORKING_DIRECTORY),
                |input| Ok(CommandPlan::adapter(["tasks"]).in_dir(input.text("path"))),
            ),
            Tool::command(
                "babashka_task",
                "Run a task from bb.edn",
                InputSchema::empty()
                    .optional("path", PropertyType::String, WORKING_DIRECTORY)
                    .required("task", PropertyType::String, "Task name"),
                |input| {
                    Ok(CommandPlan::adapter(Vec::<String>::new())
                        .opt_arg(input.text("task"))
                        .in_dir(input.text("path")))
                },
            ),
            Tool::command(
                "babashka_nrepl",
                "Start nREPL server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, WORKING_DIRECTORY)
                    .optional("port", PropertyType::Number, "Port number"),
                |input| {
                    let port = input.number("port");
                    Ok(CommandPlan::adapter(["nrepl-server"])
                        .opt_arg(port.as_deref())
                        .in_dir(input.text("path")))
                },
            ),
            adapter_version("babashka_version", "Get Babashka version"),
        ],
    }
}
