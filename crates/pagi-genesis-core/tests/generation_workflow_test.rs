//! Generation workflow test: agent writes a project, the studio-side operations see it.
//!
//! 1. Init a project root
//! 2. Run a shell "agent" that writes files into it
//! 3. List, read and HTML-check the output
//! 4. Serve it through the preview server
//!
//! Run with: `cargo test -p pagi-genesis-core --test generation_workflow_test`

#![cfg(unix)]

use pagi_genesis_core::{
    run_generation, AgentOptions, CommandAgent, GenerationOutcome, GenesisConfig, PreviewServer,
    ProjectRoot,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const FAKE_AGENT: &str = r#"
payload=$(cat)
cd "$PAGI_GENESIS_PROJECT_ROOT" || exit 1
mkdir -p css
printf '<html><body>%s</body></html>' "$payload" > index.html
printf 'body { color: #FA921C; }' > css/style.css
"#;

#[tokio::test]
async fn test_agent_output_is_listed_and_served() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let root = ProjectRoot::init(temp_dir.path().join("generated_project")).expect("init root");

    let agent = CommandAgent::new(
        "sh",
        vec!["-c".to_string(), FAKE_AGENT.to_string()],
        root.path(),
    );
    let outcome = run_generation(&agent, "orange landing page", AgentOptions::default()).await;
    assert!(
        matches!(outcome, GenerationOutcome::Completed(_)),
        "unexpected outcome: {outcome:?}"
    );

    let files = root.list_generated_files();
    assert_eq!(files, vec!["css/style.css", "index.html"]);
    assert!(root.read_file_content("index.html").contains("orange landing page"));

    let report = root.check_html_files().expect("html check");
    assert!(report.has_index);
    assert_eq!(report.html_files, vec!["index.html"]);

    let server = PreviewServer::new(root.path(), "127.0.0.1");
    let addr = server.start(0).await.expect("start preview");
    let addr = server.restart(addr.port()).await.expect("restart preview");

    let mut stream = tokio::net::TcpStream::connect(addr).await.expect("connect");
    stream
        .write_all(b"GET /css/style.css HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .expect("write request");
    let mut response = String::new();
    stream.read_to_string(&mut response).await.expect("read response");
    assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
    assert!(response.contains("#FA921C"));

    server.stop().await;
}

#[tokio::test]
async fn test_blank_prompt_leaves_project_untouched() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let root = ProjectRoot::init(temp_dir.path().join("generated_project")).expect("init root");
    let agent = CommandAgent::new(
        "sh",
        vec!["-c".to_string(), FAKE_AGENT.to_string()],
        root.path(),
    );

    let outcome = run_generation(&agent, "   ", AgentOptions::default()).await;
    assert!(matches!(outcome, GenerationOutcome::EmptyPrompt));
    assert!(root.list_generated_files().is_empty());
}

/// Stand-in for the generation graph package, run as `python -m graph`.
const GRAPH_MAIN: &str = r#"
import json, os, sys
payload = json.load(sys.stdin)
root = os.environ["PAGI_GENESIS_PROJECT_ROOT"]
with open(os.path.join(root, "index.html"), "w") as f:
    f.write("<h1>" + payload["input"]["user_prompt"] + "</h1>")
"#;

#[tokio::test]
async fn test_default_agent_args_find_graph_package_beside_root() {
    if std::process::Command::new("python3").arg("--version").output().is_err() {
        eprintln!("python3 not available; skipping");
        return;
    }
    let app_dir = tempfile::tempdir().expect("create temp dir");
    std::fs::create_dir_all(app_dir.path().join("graph")).unwrap();
    std::fs::write(app_dir.path().join("graph/__init__.py"), "").unwrap();
    std::fs::write(app_dir.path().join("graph/__main__.py"), GRAPH_MAIN).unwrap();
    let root = ProjectRoot::init(app_dir.path().join("generated_project")).expect("init root");

    // The studio is launched from the app directory; the project root is a subdirectory of it.
    let agent = CommandAgent::new("python3", GenesisConfig::default().agent_args, root.path())
        .with_working_dir(app_dir.path());
    let outcome = run_generation(&agent, "weather widget", AgentOptions::default()).await;
    assert!(
        matches!(outcome, GenerationOutcome::Completed(_)),
        "unexpected outcome: {outcome:?}"
    );
    assert_eq!(root.list_generated_files(), vec!["index.html"]);
    assert_eq!(root.read_file_content("index.html"), "<h1>weather widget</h1>");
}
