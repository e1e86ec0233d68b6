use anyhow::Result;

use super::adapter_version;
use crate::adapter::{AdapterSpec, Probe};
use crate::schema_validation::{InputSchema, PropertyType};
use crate::tool::{CommandPlan, Tool, ToolInput};

const PATH_TO_BOOK_ROOT: &str = "Path to book root";

pub fn spec() -> AdapterSpec {
    AdapterSpec {
        name: "mdbook".into(),
        display_name: "mdBook".into(),
        target_language: "Rust".into(),
        description: "Create books from Markdown files, used for Rust documentation".into(),
        binary: "mdbook".into(),
        install_hint: Some("cargo install mdbook".into()),
        probes: vec![Probe::adapter(["--version"])],
        tools: vec![
            Tool::command(
                "mdbook_init",
                "Initialize a new mdBook",
                InputSchema::empty()
                    .optional("path", PropertyType::String, "Path for the new book")
                    .optional("title", PropertyType::String, "Book title")
                    .optional("force", PropertyType::Boolean, "Overwrite existing files"),
                init,
            ),
            Tool::command(
                "mdbook_build",
                "Build the book",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_BOOK_ROOT)
                    .optional("destDir", PropertyType::String, "Output directory")
                    .optional("open", PropertyType::Boolean, "Open in browser after build"),
                build,
            ),
            Tool::command(
                "mdbook_serve",
                "Start mdBook development server",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_BOOK_ROOT)
                    .optional("port", PropertyType::Number, "Port number (default: 3000)")
                    .optional("hostname", PropertyType::String, "Hostname to bind to")
                    .optional("open", PropertyType::Boolean, "Open browser automatically"),
                serve,
            ),
            Tool::command(
                "mdbook_watch",
                "Watch for changes and rebuild",
                InputSchema::empty()
                    .optional("path", PropertyType::String, PATH_TO_BOOK_ROOT)
                    .optional("destDir", PropertyType::String, "Output directory"),
                watch,
            ),
            Tool::command(
                "mdbook_clean",
                "Clean the build directory",
                book_root(),
                |input| Ok(CommandPlan::adapter(["clean"]).opt_arg(input.text("path"))),
            ),
            Tool::command(
                "mdbook_test",
                "Test code samples in the book",
                book_root(),
                |input| Ok(CommandPlan::adapter(["test"]).opt_arg(input.text("path"))),
            ),
            adapter_version("mdbook_version", "Get mdBook version"),
        ],
    }
}

fn book_root() -> InputSchema {
    InputSchema::empty().optional("path", PropertyType::String, PATH_TO_BOOK_ROOT)
}

// mdBook takes the book root as a positional argument rather than running inside it.
fn init(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["init"])
        .opt_arg(input.text("path"))
        .opt_value("--title", input.text("title"))
        .flag_if("--force", input.flag("force")))
}

fn build(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["build"])
        .opt_arg(input.text("path"))
        .opt_value("--dest-dir", input.text("destDir"))
        .flag_if("--open", input.flag("open")))
}

fn serve(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["serve"])
        .opt_arg(input.text("path"))
        .opt_value("--port", input.number("port"))
        .opt_value("--hostname", input.text("hostname"))
        .flag_if("--open", input.flag("open")))
}

fn watch(input: &ToolInput) -> Result<CommandPlan> {
    Ok(CommandPlan::adapter(["watch"])
        .opt_arg(input.text("path"))
        .opt_value("--dest-dir", input.text("destDir")))
}
