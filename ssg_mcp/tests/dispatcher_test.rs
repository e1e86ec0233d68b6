use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use ssg_mcp::{
    AdapterRegistry, AdapterSpec, DispatchRequest, Dispatcher, ErrorKind, InputSchema,
    ProcessResult, PropertyType, SsgConfig, Tool, ToolInput,
    process::{Invocation, ProcessRunner},
    schema_validation::Violation,
    test_utils::RecordingRunner,
    utils::logging::init_test_logging,
    tool::{ExecutionContext, ToolExecutor},
};

fn builtin_dispatcher(runner: &RecordingRunner) -> Dispatcher {
    let registry =
        AdapterRegistry::with_builtin_adapters(&SsgConfig::default(), Arc::new(runner.clone()))
            .unwrap();
    Dispatcher::new(Arc::new(registry))
}

struct PanickingExecutor;

#[async_trait]
impl ToolExecutor for PanickingExecutor {
    async fn execute(&self, _input: &ToolInput, _ctx: ExecutionContext<'_>) -> Result<ProcessResult> {
        panic!("executor exploded");
    }
}

fn fake_adapter(tools: Vec<Tool>) -> AdapterSpec {
    AdapterSpec {
        name: "fake".into(),
        display_name: "Fake".into(),
        target_language: "None".into(),
        description: "Test adapter".into(),
        binary: "fake".into(),
        install_hint: None,
        probes: Vec::new(),
        tools,
    }
}

#[tokio::test]
async fn test_unknown_adapter_spawns_nothing() {
    init_test_logging();
    let runner = RecordingRunner::new();
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke("ghost-adapter", "anything", &json!({}), None)
        .await;

    assert!(!response.ok);
    assert!(response.result.is_none());
    let error = response.error.unwrap();
    assert_eq!(error.kind, ErrorKind::UnknownAdapter);
    assert!(error.message.contains("ghost-adapter"));
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn test_unknown_tool_spawns_nothing() {
    let runner = RecordingRunner::new().succeed("zola");
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke("zola", "mdbook_build", &json!({}), None)
        .await;

    assert_eq!(response.error.unwrap().kind, ErrorKind::UnknownTool);
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn test_missing_required_property_never_runs_the_executor() {
    let runner = RecordingRunner::new().succeed("cobalt");
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke("cobalt", "cobalt_new", &json!({ "path": "/tmp/site" }), None)
        .await;

    assert!(!response.ok);
    let error = response.error.unwrap();
    assert_eq!(error.kind, ErrorKind::InvalidInput);
    assert_eq!(
        error.violations,
        vec![Violation::MissingRequired {
            property: "title".into()
        }]
    );
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn test_every_violation_is_reported() {
    let runner = RecordingRunner::new();
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke(
            "cobalt",
            "cobalt_serve",
            &json!({ "port": "8080", "drafts": "yes", "path": 3 }),
            None,
        )
        .await;

    let error = response.error.unwrap();
    let mut properties: Vec<&str> = error
        .violations
        .iter()
        .filter_map(Violation::property)
        .collect();
    properties.sort_unstable();
    assert_eq!(properties, vec!["drafts", "path", "port"]);
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn test_required_title_runs_in_requested_path() {
    let runner = RecordingRunner::new().succeed("cobalt");
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke(
            "cobalt",
            "cobalt_new",
            &json!({ "title": "Hello", "path": "/tmp/site" }),
            None,
        )
        .await;

    assert!(response.ok, "{:?}", response.error);
    let invocation = runner.last().unwrap();
    assert_eq!(invocation.program, "cobalt");
    assert_eq!(invocation.args, vec!["new", "Hello"]);
    assert_eq!(invocation.working_dir.as_deref(), Some(Path::new("/tmp/site")));
}

#[tokio::test]
async fn test_relative_path_resolves_against_dispatch_directory() {
    let runner = RecordingRunner::new().succeed("zola");
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .dispatch(&DispatchRequest {
            adapter: "zola".into(),
            tool: "zola_build".into(),
            input: json!({ "path": "site" }),
            working_dir: Some(PathBuf::from("/work")),
        })
        .await;

    assert!(response.ok);
    assert_eq!(
        runner.last().unwrap().working_dir,
        Some(PathBuf::from("/work/site"))
    );
}

#[tokio::test]
async fn test_nonzero_exit_is_still_a_completed_dispatch() {
    let runner = RecordingRunner::new()
        .succeed("mdbook")
        .respond_when("mdbook", &["build"], ProcessResult::exited(101, "", "no book.toml"));
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke("mdbook", "mdbook_build", &json!({}), None)
        .await;

    assert!(response.ok);
    assert!(response.error.is_none());
    let result = response.result.unwrap();
    assert!(!result.success);
    assert_eq!(result.exit_code, Some(101));
    assert_eq!(result.stderr, "no book.toml");
}

#[tokio::test]
async fn test_missing_binary_blocks_dispatch_with_install_hint() {
    let runner = RecordingRunner::new();
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke("zola", "zola_build", &json!({}), None)
        .await;

    let error = response.error.unwrap();
    assert_eq!(error.kind, ErrorKind::AdapterUnavailable);
    assert!(error.install_hint.unwrap().contains("getzola.org"));
    // Only the probe ran.
    assert_eq!(runner.invocations().len(), 1);
    assert_eq!(runner.last().unwrap().args, vec!["--version"]);
}

#[tokio::test]
async fn test_binary_vanishing_after_connect_yields_spawn_failure_result() {
    let runner = RecordingRunner::new().succeed("zola");
    let dispatcher = builtin_dispatcher(&runner);
    assert!(dispatcher.registry().get("zola").unwrap().connect(&runner).await);

    runner.forget("zola");
    let response = dispatcher
        .invoke("zola", "zola_version", &json!({}), None)
        .await;

    assert!(response.ok);
    let result = response.result.unwrap();
    assert!(!result.success);
    assert_eq!(result.exit_code, None);
    assert!(result.stderr.contains("failed to spawn 'zola'"));
}

#[derive(Debug)]
struct PanickingRunner;

#[async_trait]
impl ProcessRunner for PanickingRunner {
    async fn run(&self, invocation: &Invocation) -> ProcessResult {
        panic!("runner exploded on {}", invocation.program);
    }
}

#[tokio::test]
async fn test_panicking_availability_check_reports_adapter_unavailable() {
    let registry =
        AdapterRegistry::with_builtin_adapters(&SsgConfig::default(), Arc::new(PanickingRunner))
            .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));

    for _ in 0..2 {
        let response = dispatcher
            .invoke("zola", "zola_build", &json!({}), None)
            .await;

        assert!(!response.ok);
        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.kind, ErrorKind::AdapterUnavailable);
        assert!(error.message.contains("probe panicked: runner exploded on zola"), "{}", error.message);
        assert!(error.install_hint.unwrap().contains("getzola.org"));
        assert!(!dispatcher.registry().get("zola").unwrap().is_connected());
    }
}

#[tokio::test]
async fn test_fallback_probe_connects_publish() {
    let runner = RecordingRunner::new().succeed("swift");
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke("publish", "publish_version", &json!({}), None)
        .await;

    assert!(response.ok, "{:?}", response.error);
    assert_eq!(
        runner.programs(),
        vec!["publish", "swift", "swift"],
        "failed publish probe, swift probe, then the tool"
    );
}

#[tokio::test]
async fn test_concurrent_dispatches_share_one_probe() {
    init_test_logging();
    let runner = RecordingRunner::new()
        .succeed("zola")
        .with_delay(Duration::from_millis(50));
    let dispatcher = builtin_dispatcher(&runner);

    let calls = (0..8).map(|_| dispatcher.invoke("zola", "zola_check", &Value::Null, None));
    let responses = futures::future::join_all(calls).await;

    assert!(responses.iter().all(|response| response.ok));
    let probes = runner
        .invocations()
        .into_iter()
        .filter(|invocation| invocation.args == ["--version"])
        .count();
    assert_eq!(probes, 1);
    assert_eq!(runner.invocations().len(), 9);
}

#[tokio::test]
async fn test_executor_panic_becomes_execution_error() {
    init_test_logging();
    let runner = RecordingRunner::new().succeed("fake");
    let mut registry = AdapterRegistry::new(Arc::new(runner.clone()));
    registry
        .register_spec(fake_adapter(vec![Tool::new(
            "explode",
            "Always panics",
            InputSchema::empty(),
            PanickingExecutor,
        )]))
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(registry));

    let response = dispatcher.invoke("fake", "explode", &json!({}), None).await;

    let error = response.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Execution);
    assert!(error.message.contains("executor exploded"));
    // A later dispatch still works.
    let again = dispatcher.invoke("fake", "explode", &json!({}), None).await;
    assert_eq!(again.error.unwrap().kind, ErrorKind::Execution);
}

#[tokio::test]
async fn test_invalid_module_name_becomes_execution_error() {
    let runner = RecordingRunner::new().succeed("julia");
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke(
            "documenter",
            "documenter_doctest",
            &json!({ "module": "Foo); run(`rm -rf /`" }),
            None,
        )
        .await;

    assert_eq!(response.error.unwrap().kind, ErrorKind::Execution);
    assert_eq!(runner.programs(), vec!["julia"], "only the probe ran");
}

#[tokio::test]
async fn test_optional_flags_follow_presence() {
    let runner = RecordingRunner::new().succeed("zola");
    let dispatcher = builtin_dispatcher(&runner);

    dispatcher
        .invoke("zola", "zola_serve", &json!({ "interface": "0.0.0.0" }), None)
        .await;
    assert_eq!(
        runner.last().unwrap().args,
        vec!["serve", "--interface", "0.0.0.0"]
    );

    dispatcher
        .invoke(
            "zola",
            "zola_serve",
            &json!({ "port": 1111, "drafts": false, "openBrowser": true }),
            None,
        )
        .await;
    assert_eq!(
        runner.last().unwrap().args,
        vec!["serve", "--port", "1111", "--open"]
    );
}

#[tokio::test]
async fn test_disconnect_forces_a_new_probe() {
    let runner = RecordingRunner::new().succeed("zola");
    let dispatcher = builtin_dispatcher(&runner);

    dispatcher.invoke("zola", "zola_check", &json!({}), None).await;
    dispatcher.registry().disconnect_all();
    assert!(!dispatcher.registry().get("zola").unwrap().is_connected());
    dispatcher.invoke("zola", "zola_check", &json!({}), None).await;

    let args: Vec<Vec<String>> = runner
        .invocations()
        .into_iter()
        .map(|invocation| invocation.args)
        .collect();
    assert_eq!(
        args,
        vec![
            vec!["--version".to_string()],
            vec!["check".to_string()],
            vec!["--version".to_string()],
            vec!["check".to_string()],
        ]
    );
}

#[tokio::test]
async fn test_response_serializes_uniformly() {
    let runner = RecordingRunner::new();
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke("ghost-adapter", "anything", &json!({}), None)
        .await;
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["ok"], json!(false));
    assert_eq!(value["result"], Value::Null);
    assert_eq!(value["error"]["kind"], json!("unknown_adapter"));
}

#[tokio::test]
async fn test_schema_declared_number_is_rendered_without_fraction() {
    let runner = RecordingRunner::new().succeed("bb");
    let dispatcher = builtin_dispatcher(&runner);

    let response = dispatcher
        .invoke("babashka", "babashka_nrepl", &json!({ "port": 1667.0 }), None)
        .await;

    assert!(response.ok);
    assert_eq!(runner.last().unwrap().args, vec!["nrepl-server", "1667"]);
}

#[test]
fn test_property_types_render_as_json_schema_names() {
    assert_eq!(PropertyType::Number.as_str(), "number");
    assert_eq!(PropertyType::Object.as_str(), "object");
}
