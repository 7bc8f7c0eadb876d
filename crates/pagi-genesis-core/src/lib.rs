//! PAGI Genesis — Core library.
//! Project root, agent bridge, preview server and browser launch for the Genesis studio.

pub mod agent;
pub mod browser;
pub mod config;
pub mod error;
pub mod generation;
pub mod preview;
pub mod project;

pub use agent::{AgentOptions, AgentOutcome, AgentRequest, CommandAgent, ProjectAgent};
pub use browser::{open_url, open_web_browser, preview_url};
pub use config::{GenesisConfig, DEFAULT_CONFIG_PATH};
pub use error::{GenesisError, GenesisResult};
pub use generation::{run_generation, GenerationOutcome};
pub use preview::PreviewServer;
pub use project::{HtmlReport, ProjectRoot};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
