use std::{path::PathBuf, sync::Arc};

use serde_json::{Value, json};
use ssg_mcp::{AdapterRegistry, Dispatcher, SsgConfig, test_utils::RecordingRunner};

const BINARIES: &[&str] = &[
    "zola", "mdbook", "cobalt", "stack", "nix", "fornax", "publish", "swift", "julia", "sbcl",
    "bb", "lein", "raco", "sbt", "mill", "marmot", "crystal", "shards", "mix", "nimble", "nim",
    "./gradlew", "java", "boot", "reggae", "make", "tclsh", "dune", "opam", "zotonic",
];

struct Case {
    tool: &'static str,
    input: Value,
    program: &'static str,
    args: &'static [&'static str],
    working_dir: Option<&'static str>,
}

fn case(
    tool: &'static str,
    input: Value,
    program: &'static str,
    args: &'static [&'static str],
    working_dir: Option<&'static str>,
) -> Case {
    Case {
        tool,
        input,
        program,
        args,
        working_dir,
    }
}

fn dispatcher() -> (Dispatcher, RecordingRunner) {
    let runner = BINARIES
        .iter()
        .fold(RecordingRunner::new(), |runner, binary| runner.succeed(binary));
    let registry =
        AdapterRegistry::with_builtin_adapters(&SsgConfig::default(), Arc::new(runner.clone()))
            .unwrap();
    (Dispatcher::new(Arc::new(registry)), runner)
}

async fn check(cases: Vec<Case>) {
    let (dispatcher, runner) = dispatcher();

    for case in cases {
        let (adapter, tool) = case.tool.split_once('.').unwrap();
        let response = dispatcher.invoke(adapter, tool, &case.input, None).await;
        assert!(response.ok, "{}: {:?}", case.tool, response.error);

        let invocation = runner.last().unwrap();
        assert_eq!(invocation.program, case.program, "{}", case.tool);
        assert_eq!(invocation.args, case.args, "{}", case.tool);
        assert_eq!(
            invocation.working_dir,
            case.working_dir.map(PathBuf::from),
            "{}",
            case.tool
        );
    }
}

#[tokio::test]
async fn test_rust_generators() {
    check(vec![
        case("zola.zola_init", json!({ "path": "blog", "force": true }), "zola", &["init", "blog", "--force"], None),
        case(
            "zola.zola_build",
            json!({ "path": "/srv/site", "baseUrl": "https://example.org", "drafts": true }),
            "zola",
            &["build", "--base-url", "https://example.org", "--drafts"],
            Some("/srv/site"),
        ),
        case("zola.zola_check", json!({ "drafts": false }), "zola", &["check"], None),
        case("zola.zola_version", json!({}), "zola", &["--version"], None),
        case("mdbook.mdbook_build", json!({ "path": "guide", "destDir": "public" }), "mdbook", &["build", "guide", "--dest-dir", "public"], None),
        case("cobalt.cobalt_new", json!({ "title": "Hello", "path": "/tmp/site" }), "cobalt", &["new", "Hello"], Some("/tmp/site")),
        case("cobalt.cobalt_serve", json!({ "port": 3000, "host": "0.0.0.0" }), "cobalt", &["serve", "--port", "3000", "--host", "0.0.0.0"], None),
        case("cobalt.cobalt_clean", json!({ "path": "site" }), "cobalt", &["clean"], Some("site")),
    ])
    .await;
}

#[tokio::test]
async fn test_haskell_and_nix_generators() {
    check(vec![
        case("hakyll.hakyll_init", json!({ "name": "blog", "path": "/src" }), "stack", &["new", "blog", "hakyll-template"], Some("/src")),
        case("hakyll.hakyll_rebuild", json!({ "path": "blog" }), "stack", &["exec", "site", "--", "rebuild"], Some("blog")),
        case("hakyll.hakyll_check", json!({ "internal": true }), "stack", &["exec", "site", "--", "check", "--internal-links"], None),
        case("ema.ema_init", json!({ "path": "site" }), "nix", &["flake", "init", "-t", "github:srid/ema-template"], Some("site")),
        case("ema.ema_update", json!({}), "nix", &["flake", "update"], None),
    ])
    .await;
}

#[tokio::test]
async fn test_dotnet_and_swift_generators() {
    check(vec![
        case("fornax.fornax_watch", json!({ "port": 8080 }), "fornax", &["watch", "--port", "8080"], None),
        case("fornax.fornax_version", json!({ "path": "ignored" }), "fornax", &["version"], None),
        case("publish.publish_generate", json!({ "path": "site" }), "publish", &["generate"], Some("site")),
        case("publish.publish_build", json!({ "path": "site" }), "swift", &["build"], Some("site")),
        case("publish.publish_version", json!({}), "swift", &["--version"], None),
    ])
    .await;
}

#[tokio::test]
async fn test_julia_generators() {
    check(vec![
        case(
            "franklin.franklin_newsite",
            json!({ "path": "mysite", "template": "basic" }),
            "julia",
            &["-e", r#"using Franklin; newsite("mysite"; template="basic")"#],
            None,
        ),
        case(
            "franklin.franklin_optimize",
            json!({ "minify": false }),
            "julia",
            &["-e", "using Franklin; optimize(minify=false, prerender=true)"],
            None,
        ),
        case(
            "documenter.documenter_makedocs",
            json!({ "path": "pkg", "sitename": "My \"Docs\"" }),
            "julia",
            &["-e", r#"using Documenter; makedocs(sitename="My \"Docs\"")"#],
            Some("pkg"),
        ),
        case(
            "documenter.documenter_makedocs",
            json!({ "sitename": "$(run(`id`))" }),
            "julia",
            &["-e", r#"using Documenter; makedocs(sitename="\$(run(`id`))")"#],
            None,
        ),
        case(
            "staticwebpages.staticwebpages_init",
            json!({ "path": "www" }),
            "julia",
            &["-e", r#"using StaticWebPages; init("www")"#],
            None,
        ),
        case(
            "staticwebpages.staticwebpages_serve",
            json!({ "path": "www" }),
            "julia",
            &["-e", "using StaticWebPages; serve(port=8000)"],
            Some("www"),
        ),
        case(
            "documenter.documenter_serve",
            json!({}),
            "julia",
            &["-e", r#"using LiveServer; serve(dir="docs/build", port=8000)"#],
            None,
        ),
    ])
    .await;
}

#[tokio::test]
async fn test_lisp_and_clojure_generators() {
    check(vec![
        case(
            "coleslaw.coleslaw_init",
            json!({ "path": "blog" }),
            "sbcl",
            &["--eval", "(ql:quickload :coleslaw)", "--eval", r#"(coleslaw:setup "blog")"#, "--quit"],
            None,
        ),
        case(
            "coleslaw.coleslaw_preview",
            json!({ "port": 9090 }),
            "sbcl",
            &["--eval", "(ql:quickload :coleslaw)", "--eval", "(coleslaw:preview :port 9090)", "--quit"],
            None,
        ),
        case("babashka.babashka_eval", json!({ "expr": "(+ 1 2)", "path": "scripts" }), "bb", &["-e", "(+ 1 2)"], Some("scripts")),
        case("babashka.babashka_task", json!({ "task": "build" }), "bb", &["build"], None),
        case("babashka.babashka_nrepl", json!({}), "bb", &["nrepl-server"], None),
        case("cryogen.cryogen_new", json!({ "name": "blog" }), "lein", &["new", "cryogen", "blog"], None),
        case("cryogen.cryogen_serve", json!({ "path": "blog" }), "lein", &["ring", "server"], Some("blog")),
    ])
    .await;
}

#[tokio::test]
async fn test_racket_generators() {
    check(vec![
        case("frog.frog_init", json!({ "path": "blog" }), "raco", &["frog", "--init"], Some("blog")),
        case("frog.frog_preview", json!({ "port": 3000 }), "raco", &["frog", "--preview", "--port", "3000"], None),
        case("frog.frog_new_post", json!({ "title": "Hello World" }), "raco", &["frog", "--new", "Hello World"], None),
        case("frog.frog_version", json!({}), "raco", &["frog", "--version"], None),
        case("pollen.pollen_start", json!({ "path": "book", "port": 8088 }), "raco", &["pollen", "start", "8088"], Some("book")),
        case("pollen.pollen_render", json!({ "file": "index.html.pm" }), "raco", &["pollen", "render", "index.html.pm"], None),
        case("pollen.pollen_publish", json!({ "dest": "/tmp/out" }), "raco", &["pollen", "publish", "/tmp/out"], None),
        case("pollen.pollen_version", json!({}), "raco", &["pollen", "version"], None),
    ])
    .await;
}

#[tokio::test]
async fn test_jvm_generators() {
    check(vec![
        case("laika.laika_site", json!({ "path": "docs" }), "sbt", &["laikaSite"], Some("docs")),
        case("laika.laika_preview", json!({ "port": 4242 }), "sbt", &["laikaPreview"], None),
        case("scalatex.scalatex_compile", json!({}), "mill", &["docs.compile"], None),
        case("scalatex.scalatex_watch", json!({ "module": "site" }), "mill", &["--watch", "site.compile"], None),
        case("orchid.orchid_init", json!({ "type": "blog" }), "./gradlew", &["init", "--type", "blog"], None),
        case("orchid.orchid_serve", json!({ "path": "site", "port": 8080 }), "./gradlew", &["orchidServe", "-PorchidPort=8080"], Some("site")),
        case("orchid.orchid_version", json!({}), "java", &["-version"], None),
        case("perun.perun_build", json!({}), "boot", &["build"], None),
        case("perun.perun_build", json!({ "task": "prod" }), "boot", &["prod"], None),
        case("perun.perun_watch", json!({ "path": "blog" }), "boot", &["watch", "build"], Some("blog")),
        case("perun.perun_serve", json!({ "port": 3000 }), "boot", &["serve", "-p", "3000"], None),
    ])
    .await;
}

#[tokio::test]
async fn test_elixir_generators() {
    check(vec![
        case("nimble-publisher.nimble_publisher_new", json!({ "name": "blog", "path": "/src" }), "mix", &["phx.new", "blog", "--no-ecto"], Some("/src")),
        case("nimble-publisher.nimble_publisher_server", json!({ "path": "blog" }), "mix", &["phx.server"], Some("blog")),
        case("serum.serum_init", json!({ "path": "site" }), "mix", &["serum.new", "site"], None),
        case("serum.serum_build", json!({ "path": "site", "output": "dist" }), "mix", &["serum.build", "--output", "dist"], Some("site")),
        case("serum.serum_gen_page", json!({ "title": "About", "name": "about" }), "mix", &["serum.gen.page", "About", "--name", "about"], None),
        case("serum.serum_gen_post", json!({ "title": "Hi", "tag": "news" }), "mix", &["serum.gen.post", "Hi", "--tag", "news"], None),
        case("serum.serum_version", json!({}), "mix", &["serum", "--version"], None),
        case("tableau.tableau_new", json!({ "name": "site" }), "mix", &["tableau.new", "site"], None),
        case("tableau.tableau_server", json!({ "port": 4999 }), "mix", &["tableau.server", "--port", "4999"], None),
        case("tableau.tableau_gen_post", json!({ "title": "Launch", "path": "site" }), "mix", &["tableau.gen.post", "Launch"], Some("site")),
    ])
    .await;
}

#[tokio::test]
async fn test_native_toolchain_generators() {
    check(vec![
        case("marmot.marmot_build", json!({ "output": "public" }), "marmot", &["build", "--output", "public"], None),
        case("marmot.marmot_deps", json!({ "path": "site" }), "shards", &["install"], Some("site")),
        case("nimrod.nimrod_init", json!({ "name": "notes" }), "nimble", &["init", "notes"], None),
        case("nimrod.nimrod_build", json!({ "release": true }), "nimble", &["build", "--release"], None),
        case("nimrod.nimrod_build", json!({ "release": false }), "nimble", &["build"], None),
        case("nimrod.nimrod_run", json!({ "script": "site.nim" }), "nim", &["c", "-r", "site.nim"], None),
        case("nimrod.nimrod_install", json!({}), "nimble", &["install", "nimib"], None),
        case("nimrod.nimrod_deps", json!({ "path": "p" }), "nimble", &["install", "-d"], Some("p")),
        case("reggae.reggae_init", json!({ "backend": "ninja" }), "reggae", &["--backend=ninja"], None),
        case("reggae.reggae_init", json!({}), "reggae", &[], None),
        case("reggae.reggae_build", json!({ "target": "site" }), "make", &["site"], None),
        case("reggae.reggae_clean", json!({ "path": "p" }), "make", &["clean"], Some("p")),
        case("yocaml.yocaml_init", json!({ "name": "blog" }), "dune", &["init", "project", "blog"], None),
        case("yocaml.yocaml_exec", json!({ "path": "blog" }), "dune", &["exec", "./bin/main.exe"], Some("blog")),
        case("yocaml.yocaml_deps", json!({ "path": "blog" }), "opam", &["install", ".", "--deps-only"], Some("blog")),
        case("zotonic.zotonic_addsite", json!({ "name": "blog" }), "zotonic", &["addsite", "blog"], None),
        case("zotonic.zotonic_status", json!({ "path": "/opt/zotonic" }), "zotonic", &["status"], Some("/opt/zotonic")),
    ])
    .await;
}

#[tokio::test]
async fn test_wub_scripts_go_to_stdin() {
    let (dispatcher, runner) = dispatcher();

    let response = dispatcher
        .invoke("wub", "wub_generate", &json!({ "path": "site", "output": "[exec id]" }), None)
        .await;
    assert!(response.ok, "{:?}", response.error);
    let invocation = runner.last().unwrap();
    assert_eq!(invocation.program, "tclsh");
    assert!(invocation.args.is_empty());
    assert_eq!(invocation.working_dir, Some(PathBuf::from("site")));
    assert_eq!(
        invocation.stdin.as_deref(),
        Some("source wub.tcl\npackage require Wub\nWub generate \"\\[exec id\\]\"\n")
    );

    let response = dispatcher
        .invoke("wub", "wub_start", &json!({}), None)
        .await;
    assert!(response.ok, "{:?}", response.error);
    let invocation = runner.last().unwrap();
    assert_eq!(invocation.args, ["wub.tcl"]);
    assert_eq!(invocation.stdin, None);

    // The availability check also talks to tclsh over stdin.
    let availability = runner
        .invocations()
        .into_iter()
        .find(|invocation| invocation.program == "tclsh" && invocation.stdin.is_some())
        .unwrap();
    assert_eq!(availability.stdin.as_deref(), Some("puts [info patchlevel]\n"));
}
