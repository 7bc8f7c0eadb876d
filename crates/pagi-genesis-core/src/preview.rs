//! Preview server: serves the generated project as static files on a fixed port.
//!
//! Starting is idempotent. A start while a server is already up shuts the old one down,
//! waits for the listener to be released and binds again, so "Start" and "Restart" share
//! one code path.

use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tower_http::services::ServeDir;

use crate::error::{GenesisError, GenesisResult};

/// How long in-flight preview requests get before the server task is aborted.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

struct RunningPreview {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl RunningPreview {
    async fn shutdown(self) {
        let RunningPreview {
            addr,
            shutdown_tx,
            mut handle,
        } = self;
        let _ = shutdown_tx.send(());
        if tokio::time::timeout(SHUTDOWN_GRACE, &mut handle).await.is_err() {
            tracing::warn!(%addr, "preview server did not drain in time; aborting");
            handle.abort();
            let _ = handle.await;
        }
        tracing::info!(%addr, "preview server stopped");
    }
}

pub struct PreviewServer {
    root: PathBuf,
    host: String,
    running: Mutex<Option<RunningPreview>>,
}

impl PreviewServer {
    pub fn new(root: impl Into<PathBuf>, host: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            host: host.into(),
            running: Mutex::new(None),
        }
    }

    /// Bind `host:port` and serve the project root. Replaces any running instance.
    pub async fn start(&self, port: u16) -> GenesisResult<SocketAddr> {
        let mut running = self.running.lock().await;
        if let Some(previous) = running.take() {
            previous.shutdown().await;
        }

        let bind_addr = format!("{}:{}", self.host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| GenesisError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;
        let addr = listener.local_addr()?;

        let app = Router::new().fallback_service(
            ServeDir::new(&self.root).append_index_html_on_directories(true),
        );
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                tracing::error!(%addr, error = %e, "preview server exited with error");
            }
        });

        tracing::info!(%addr, root = %self.root.display(), "preview server started");
        *running = Some(RunningPreview {
            addr,
            shutdown_tx,
            handle,
        });
        Ok(addr)
    }

    /// Same as [`PreviewServer::start`]; named for the "Restart Server" action.
    pub async fn restart(&self, port: u16) -> GenesisResult<SocketAddr> {
        self.start(port).await
    }

    /// Stop the running server, if any. Returns whether one was running.
    pub async fn stop(&self) -> bool {
        let previous = self.running.lock().await.take();
        match previous {
            Some(previous) => {
                previous.shutdown().await;
                true
            }
            None => false,
        }
    }

    pub async fn address(&self) -> Option<SocketAddr> {
        self.running
            .lock()
            .await
            .as_ref()
            .filter(|r| !r.handle.is_finished())
            .map(|r| r.addr)
    }

    pub async fn is_running(&self) -> bool {
        self.address().await.is_some()
    }
}
