//! System browser launch for the preview server.

use crate::error::{GenesisError, GenesisResult};

pub fn preview_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

/// Open the system browser at `http://localhost:<port>`.
pub fn open_web_browser(port: u16) -> GenesisResult<String> {
    let url = preview_url(port);
    open_url(&url)?;
    Ok(url)
}

pub fn open_url(url: &str) -> GenesisResult<()> {
    tracing::info!(%url, "opening browser");
    webbrowser::open(url).map_err(|e| GenesisError::Browser(e.to_string()))
}
