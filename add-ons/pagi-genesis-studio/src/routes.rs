//! Studio routes. Each button on the page posts to one endpoint and swaps the returned fragment in.
//! Failures never bubble up as HTTP errors; they come back as rendered notices.

use axum::{
    extract::{Query, State},
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use pagi_genesis_core::{run_generation, GenerationOutcome};
use serde::Deserialize;

use crate::app::StudioState;
use crate::render::{self, Notice};

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct FileQuery {
    #[serde(default)]
    path: String,
}

pub fn build_router(state: StudioState) -> Router {
    Router::new()
        .route("/", get(serve_studio_ui))
        .route("/health", get(health))
        .route("/api/v1/status", get(api_status))
        .route("/api/v1/generate", post(generate_handler))
        .route("/api/v1/files", get(list_files_handler))
        .route("/api/v1/files/options", get(file_browser_handler))
        .route("/api/v1/files/content", get(file_content_handler))
        .route("/api/v1/server/start", post(start_server_handler))
        .route("/api/v1/server/restart", post(restart_server_handler))
        .route("/api/v1/html-check", get(html_check_handler))
        .route("/api/v1/browser/open", post(open_browser_handler))
        .with_state(state)
}

/// Run filesystem walks, reads and the browser launch on the blocking pool.
async fn off_executor<T, F>(work: F) -> Result<T, String>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| e.to_string())
}

async fn health() -> &'static str {
    "OK"
}

async fn serve_studio_ui(State(state): State<StudioState>) -> Html<String> {
    const INDEX: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html"));
    Html(INDEX.replace("{{app_name}}", &render::html_escape(&state.config.app_name)))
}

async fn api_status(State(state): State<StudioState>) -> Json<serde_json::Value> {
    let preview = state.preview.address().await;
    let root = state.root.clone();
    let file_count = off_executor(move || root.list_files().map(|f| f.len()).unwrap_or(0))
        .await
        .unwrap_or(0);
    Json(serde_json::json!({
        "app": state.config.app_name,
        "version": pagi_genesis_core::version(),
        "project_root": state.root.path().display().to_string(),
        "file_count": file_count,
        "generation_running": state.generation_lock.try_lock().is_err(),
        "preview": {
            "running": preview.is_some(),
            "address": preview.map(|a| a.to_string()),
            "url": state.config.preview_url(),
        }
    }))
}

/// "Generate Project": `run_generation` warns on a blank prompt, otherwise runs the agent to completion.
async fn generate_handler(
    State(state): State<StudioState>,
    Form(form): Form<GenerateForm>,
) -> Html<String> {
    let Ok(_running) = state.generation_lock.try_lock() else {
        return Html(render::notice(
            Notice::Warning,
            "A project is already being generated. Wait for it to finish.",
        ));
    };

    tracing::info!(root = %state.root.path().display(), "project generation requested");
    let html = match run_generation(state.agent.as_ref(), &form.prompt, state.agent_options()).await {
        GenerationOutcome::EmptyPrompt => {
            render::notice(Notice::Warning, "Please enter a project prompt")
        }
        GenerationOutcome::Completed(_) => {
            render::notice(Notice::Success, "Project generation completed!")
        }
        GenerationOutcome::Failed(e) => {
            render::notice(Notice::Error, &format!("Error during generation: {}", e))
        }
    };
    Html(html)
}

async fn list_files_handler(State(state): State<StudioState>) -> Html<String> {
    let root = state.root.clone();
    let files = off_executor(move || root.list_generated_files())
        .await
        .unwrap_or_else(|e| vec![format!("Error listing files: {}", e)]);
    Html(render::file_list(&files))
}

async fn file_browser_handler(State(state): State<StudioState>) -> Html<String> {
    let root = state.root.clone();
    let listed = off_executor(move || {
        let files = root.list_generated_files();
        let first = files.first().map(|f| root.read_file_content(f));
        (files, first)
    })
    .await;
    match listed {
        Ok((files, first)) => Html(render::file_browser(&files, first.as_deref())),
        Err(e) => Html(render::notice(
            Notice::Error,
            &format!("Error listing files: {}", e),
        )),
    }
}

async fn file_content_handler(
    State(state): State<StudioState>,
    Query(query): Query<FileQuery>,
) -> Html<String> {
    if query.path.trim().is_empty() {
        return Html(render::notice(
            Notice::Error,
            "Error reading file: no file selected",
        ));
    }
    let root = state.root.clone();
    let path = query.path.clone();
    let content = off_executor(move || root.read_file_content(&path))
        .await
        .unwrap_or_else(|e| format!("Error reading file: {}", e));
    Html(render::file_content(&query.path, &content))
}

async fn start_server_handler(State(state): State<StudioState>) -> Html<String> {
    let html = match state.preview.start(state.config.preview_port).await {
        Ok(_) => render::notice(
            Notice::Success,
            &format!("Web server started on {}", state.config.preview_url()),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "preview server start failed");
            render::notice(Notice::Error, &format!("Error starting server: {}", e))
        }
    };
    Html(html)
}

async fn restart_server_handler(State(state): State<StudioState>) -> Html<String> {
    let html = match state.preview.restart(state.config.preview_port).await {
        Ok(_) => render::notice(Notice::Success, "Server restarted!"),
        Err(e) => {
            tracing::warn!(error = %e, "preview server restart failed");
            render::notice(Notice::Error, &format!("Error restarting server: {}", e))
        }
    };
    Html(html)
}

async fn html_check_handler(State(state): State<StudioState>) -> Html<String> {
    let root = state.root.clone();
    let status = off_executor(move || root.html_status())
        .await
        .unwrap_or_else(|e| format!("Error checking HTML files: {}", e));
    Html(render::notice(Notice::Info, &status))
}

async fn open_browser_handler(State(state): State<StudioState>) -> Html<String> {
    let open_browser = state.open_browser;
    let port = state.config.preview_port;
    let opened = off_executor(move || open_browser(port).map_err(|e| e.to_string()))
        .await
        .and_then(|r| r);
    let html = match opened {
        Ok(_) => render::notice(Notice::Success, "Opening browser..."),
        Err(e) => render::notice(Notice::Error, &format!("Error opening browser: {}", e)),
    };
    Html(html)
}
