//! PAGI Genesis Studio — serves the generator UI and wires it to the agent and preview server.
//! Run: cargo run -p pagi-genesis-studio
//! Then open http://127.0.0.1:3001 (opened automatically unless PAGI_GENESIS__OPEN_UI_ON_START=false).

use pagi_genesis_core::{open_url, GenesisConfig};
use pagi_genesis_studio::{build_router, StudioState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[pagi-genesis-studio] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "genesis studio stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = GenesisConfig::load()?;
    let state = StudioState::from_config(config)?;
    let config = state.config.clone();
    let preview = state.preview.clone();

    let addr = format!("{}:{}", config.host, config.ui_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let url = config.ui_url();
    tracing::info!(
        %url,
        project_root = %state.root.path().display(),
        agent = %config.agent_program,
        preview_port = config.preview_port,
        "genesis studio listening"
    );

    if config.open_ui_on_start {
        if let Err(e) = open_url(&url) {
            tracing::warn!(error = %e, "could not open studio in browser");
        }
    }

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("CTRL-C received; shutting down studio");
        })
        .await?;

    preview.stop().await;
    Ok(())
}
