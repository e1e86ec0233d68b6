use std::sync::Arc;

use ssg_mcp::{
    AdapterRegistry, AdapterSpec, ConnectionState, InputSchema, ProcessResult, RegistryError,
    SsgConfig, Tool,
    registry::format_install_guidance,
    test_utils::RecordingRunner,
    tool::CommandPlan,
};

fn spec(name: &str, binary: &str) -> AdapterSpec {
    AdapterSpec {
        name: name.into(),
        display_name: name.to_uppercase(),
        target_language: "Test".into(),
        description: format!("{} adapter", name),
        binary: binary.into(),
        install_hint: Some(format!("install {}", binary)),
        probes: Vec::new(),
        tools: vec![Tool::command(
            "run",
            "Run it",
            InputSchema::empty(),
            |_| Ok(CommandPlan::adapter(["run"])),
        )],
    }
}

#[tokio::test]
async fn test_connect_all_returns_per_adapter_map_with_partial_failure() {
    let runner = RecordingRunner::new().succeed("zola").succeed("lein");
    let registry =
        AdapterRegistry::with_builtin_adapters(&SsgConfig::default(), Arc::new(runner)).unwrap();

    let outcome = registry.connect_all().await;

    assert_eq!(outcome.len(), registry.len());
    assert_eq!(outcome.get("zola"), Some(&true));
    assert_eq!(outcome.get("cryogen"), Some(&true));
    assert_eq!(outcome.get("mdbook"), Some(&false));
    assert_eq!(outcome.values().filter(|connected| **connected).count(), 2);
    assert!(registry.get("zola").unwrap().is_connected());
    assert!(!registry.get("hakyll").unwrap().is_connected());
}

#[tokio::test]
async fn test_reports_keep_registration_order_and_probe_failures() {
    let runner = RecordingRunner::new()
        .respond("fornax", ProcessResult::exited(1, "", "bad flag"))
        .respond("dotnet", ProcessResult::exited(0, "0.15.1", ""));
    let registry =
        AdapterRegistry::with_builtin_adapters(&SsgConfig::default(), Arc::new(runner)).unwrap();

    let reports = registry.connect_all_with_report().await;

    let names: Vec<&str> = reports.iter().map(|r| r.adapter.as_str()).collect();
    let registered: Vec<&str> = registry.adapters().map(|a| a.name()).collect();
    assert_eq!(names, registered);

    let fornax = reports.iter().find(|r| r.adapter == "fornax").unwrap();
    assert!(fornax.connected);
    assert_eq!(fornax.failures.len(), 1);
    assert_eq!(fornax.failures[0].exit_code, Some(1));
    assert_eq!(fornax.failures[0].diagnostic, "bad flag");

    let guidance = format_install_guidance(&reports);
    assert!(!guidance.contains("- fornax:"));
    assert!(guidance.contains("- zola: no availability probe succeeded"));
}

#[test]
fn test_duplicate_adapter_is_rejected() {
    let mut registry = AdapterRegistry::new(Arc::new(RecordingRunner::new()));
    registry.register_spec(spec("alpha", "a")).unwrap();

    let error = registry.register_spec(spec("alpha", "b")).unwrap_err();

    assert_eq!(error, RegistryError::DuplicateAdapter("alpha".into()));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("alpha").unwrap().binary(), "a");
}

#[test]
fn test_same_tool_name_on_different_adapters_is_allowed() {
    let mut registry = AdapterRegistry::new(Arc::new(RecordingRunner::new()));
    registry.register_spec(spec("alpha", "a")).unwrap();
    registry.register_spec(spec("beta", "b")).unwrap();

    let (alpha, _) = registry.find_tool("alpha", "run").unwrap();
    let (beta, _) = registry.find_tool("beta", "run").unwrap();
    assert_eq!(alpha.binary(), "a");
    assert_eq!(beta.binary(), "b");
}

#[test]
fn test_unknown_lookups() {
    let mut registry = AdapterRegistry::new(Arc::new(RecordingRunner::new()));
    registry.register_spec(spec("alpha", "a")).unwrap();

    assert_eq!(
        registry.get("ghost").unwrap_err(),
        RegistryError::UnknownAdapter("ghost".into())
    );
    assert_eq!(
        registry.find_tool("alpha", "fly").unwrap_err(),
        RegistryError::UnknownTool {
            adapter: "alpha".into(),
            tool: "fly".into()
        }
    );
    assert!(matches!(
        registry.find_tool("ghost", "run"),
        Err(RegistryError::UnknownAdapter(_))
    ));
}

#[test]
fn test_invalid_names_are_rejected() {
    let mut registry = AdapterRegistry::new(Arc::new(RecordingRunner::new()));

    assert!(matches!(
        registry.register_spec(spec("Bad.Name", "x")),
        Err(RegistryError::InvalidName { what: "adapter", .. })
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_adapter_listing_is_restartable_and_ordered() {
    let mut registry = AdapterRegistry::new(Arc::new(RecordingRunner::new()));
    for name in ["gamma", "alpha", "beta"] {
        registry.register_spec(spec(name, name)).unwrap();
    }

    let first: Vec<&str> = registry.adapters().map(|a| a.name()).collect();
    let second: Vec<&str> = registry.adapters().map(|a| a.name()).collect();

    assert_eq!(first, vec!["gamma", "alpha", "beta"]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_disconnect_then_is_connected_is_false_for_every_adapter() {
    let binaries = [
        "zola", "mdbook", "cobalt", "stack", "nix", "fornax", "publish", "julia", "sbcl", "bb",
        "lein", "raco", "sbt", "mill", "marmot", "mix", "nimble", "java", "boot", "reggae",
        "tclsh", "dune", "zotonic",
    ];
    let runner = binaries
        .into_iter()
        .fold(RecordingRunner::new(), |runner, binary| runner.succeed(binary));
    let registry =
        AdapterRegistry::with_builtin_adapters(&SsgConfig::default(), Arc::new(runner)).unwrap();

    let outcome = registry.connect_all().await;
    assert!(outcome.values().all(|connected| *connected));

    for adapter in registry.adapters() {
        adapter.disconnect();
        assert!(!adapter.is_connected());
        assert_eq!(adapter.state(), ConnectionState::Disconnected);
        // Idempotent.
        adapter.disconnect();
        assert!(!adapter.is_connected());
    }
}

#[test]
fn test_describe_runs_nothing_and_qualifies_tool_names() {
    let runner = RecordingRunner::new();
    let registry =
        AdapterRegistry::with_builtin_adapters(&SsgConfig::default(), Arc::new(runner.clone()))
            .unwrap();

    let catalog = registry.describe();

    assert_eq!(catalog.len(), 28);
    let mdbook = catalog.iter().find(|a| a.name == "mdbook").unwrap();
    assert_eq!(mdbook.state, ConnectionState::Disconnected);
    assert!(mdbook.tools.iter().all(|t| t.qualified_name.starts_with("mdbook.")));
    assert_eq!(mdbook.tools[0].input_schema["type"], "object");
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn test_describe_reports_connection_state() {
    let runner = RecordingRunner::new().succeed("zola");
    let registry =
        AdapterRegistry::with_builtin_adapters(&SsgConfig::default(), Arc::new(runner)).unwrap();
    assert!(registry.get("zola").unwrap().connect(registry.runner().as_ref()).await);

    let catalog = registry.describe();
    let zola = catalog.iter().find(|a| a.name == "zola").unwrap();
    assert_eq!(zola.state, ConnectionState::Connected);
    let cobalt = catalog.iter().find(|a| a.name == "cobalt").unwrap();
    assert_eq!(cobalt.state, ConnectionState::Disconnected);

    let json = serde_json::to_value(zola).unwrap();
    assert_eq!(json["state"], "connected");
    assert!(json.get("connected").is_none());
    assert_eq!(serde_json::to_value(cobalt).unwrap()["state"], "disconnected");
}
