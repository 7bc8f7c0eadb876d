//! Project root, agent and preview server wiring for the Genesis studio.

use pagi_genesis_core::{
    open_web_browser, AgentOptions, CommandAgent, GenesisConfig, GenesisResult, PreviewServer,
    ProjectAgent, ProjectRoot,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Launches a browser at the preview port; returns the URL it opened.
pub type BrowserOpener = fn(u16) -> GenesisResult<String>;

/// Everything a button handler needs. Cheap to clone.
#[derive(Clone)]
pub struct StudioState {
    pub config: Arc<GenesisConfig>,
    pub root: ProjectRoot,
    pub agent: Arc<dyn ProjectAgent>,
    pub preview: Arc<PreviewServer>,
    pub open_browser: BrowserOpener,
    /// Held for the duration of one agent run.
    pub generation_lock: Arc<Mutex<()>>,
}

impl StudioState {
    /// Init the project root and build the command-line agent from config.
    pub fn from_config(config: GenesisConfig) -> GenesisResult<Self> {
        let root = ProjectRoot::init(config.project_root.clone())?;
        let mut agent = CommandAgent::new(
            config.agent_program.clone(),
            config.agent_args.clone(),
            root.path(),
        );
        if let Some(dir) = &config.agent_workdir {
            agent = agent.with_working_dir(dir);
        }
        Ok(Self::with_agent(config, root, Arc::new(agent)))
    }

    pub fn with_agent(
        config: GenesisConfig,
        root: ProjectRoot,
        agent: Arc<dyn ProjectAgent>,
    ) -> Self {
        let preview = Arc::new(PreviewServer::new(root.path(), config.host.clone()));
        Self {
            config: Arc::new(config),
            root,
            agent,
            preview,
            open_browser: open_web_browser,
            generation_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn agent_options(&self) -> AgentOptions {
        AgentOptions {
            recursion_limit: self.config.recursion_limit,
        }
    }
}
