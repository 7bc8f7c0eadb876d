//! Genesis configuration: built-in defaults, optional TOML file, then `PAGI_GENESIS__*` environment.
//!
//! | Key | Default | Env |
//! |-----|---------|-----|
//! | app_name | PAGI Genesis Studio | PAGI_GENESIS__APP_NAME |
//! | host | 127.0.0.1 | PAGI_GENESIS__HOST |
//! | ui_port | 3001 | PAGI_GENESIS__UI_PORT |
//! | preview_port | 8000 | PAGI_GENESIS__PREVIEW_PORT |
//! | project_root | ./generated_project | PAGI_GENESIS__PROJECT_ROOT |
//! | agent_program | python | PAGI_GENESIS__AGENT_PROGRAM |
//! | agent_args | -m graph | PAGI_GENESIS__AGENT_ARGS (space separated) |
//! | agent_workdir | studio launch directory | PAGI_GENESIS__AGENT_WORKDIR |
//! | recursion_limit | 100 | PAGI_GENESIS__RECURSION_LIMIT |
//! | open_ui_on_start | true | PAGI_GENESIS__OPEN_UI_ON_START |

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::GenesisResult;

/// Config file used when `PAGI_GENESIS_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/genesis.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub app_name: String,
    /// Interface both the studio UI and the preview server bind to.
    pub host: String,
    pub ui_port: u16,
    /// Fixed port of the generated-project preview server.
    pub preview_port: u16,
    pub project_root: PathBuf,
    pub agent_program: String,
    #[serde(default)]
    pub agent_args: Vec<String>,
    /// Working directory of the agent process. Unset: the studio's own, so `-m graph` resolves there.
    #[serde(default)]
    pub agent_workdir: Option<PathBuf>,
    pub recursion_limit: u32,
    pub open_ui_on_start: bool,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            app_name: "PAGI Genesis Studio".to_string(),
            host: "127.0.0.1".to_string(),
            ui_port: 3001,
            preview_port: 8000,
            project_root: PathBuf::from("./generated_project"),
            agent_program: "python".to_string(),
            agent_args: vec!["-m".to_string(), "graph".to_string()],
            agent_workdir: None,
            recursion_limit: 100,
            open_ui_on_start: true,
        }
    }
}

impl GenesisConfig {
    /// Load from `PAGI_GENESIS_CONFIG` (or [`DEFAULT_CONFIG_PATH`]) and the environment.
    pub fn load() -> GenesisResult<Self> {
        let path = std::env::var("PAGI_GENESIS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&path)
    }

    /// Load with an explicit file path. A missing file is skipped.
    pub fn load_from(path: &Path) -> GenesisResult<Self> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("host", defaults.host)?
            .set_default("ui_port", i64::from(defaults.ui_port))?
            .set_default("preview_port", i64::from(defaults.preview_port))?
            .set_default(
                "project_root",
                defaults.project_root.to_string_lossy().to_string(),
            )?
            .set_default("agent_program", defaults.agent_program)?
            .set_default("agent_args", defaults.agent_args)?
            .set_default("recursion_limit", i64::from(defaults.recursion_limit))?
            .set_default("open_ui_on_start", defaults.open_ui_on_start)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix("PAGI_GENESIS")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("agent_args"),
            )
            .build()?;

        Ok(built.try_deserialize()?)
    }

    /// URL of the preview server as shown to the user.
    pub fn preview_url(&self) -> String {
        format!("http://localhost:{}", self.preview_port)
    }

    /// URL of the studio UI itself.
    pub fn ui_url(&self) -> String {
        format!("http://{}:{}", self.host, self.ui_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = GenesisConfig::load_from(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config.preview_port, 8000);
        assert_eq!(config.recursion_limit, 100);
        assert_eq!(config.agent_args, vec!["-m", "graph"]);
        assert_eq!(config.agent_workdir, None);
        assert_eq!(config.preview_url(), "http://localhost:8000");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("genesis.toml");
        std::fs::write(
            &path,
            "preview_port = 8100\nproject_root = \"out\"\nagent_args = [\"run.py\"]\nagent_workdir = \"agents\"\n",
        )
        .expect("write config");

        let config = GenesisConfig::load_from(&path).expect("load");
        assert_eq!(config.preview_port, 8100);
        assert_eq!(config.project_root, PathBuf::from("out"));
        assert_eq!(config.agent_args, vec!["run.py"]);
        assert_eq!(config.agent_workdir, Some(PathBuf::from("agents")));
        assert_eq!(config.ui_port, 3001);
    }
}
