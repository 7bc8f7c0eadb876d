//! Bridge to the external generation agent.
//!
//! The agent owns all generation work. Genesis only hands it `{"user_prompt": ...}` plus a
//! recursion limit and waits for it to finish. [`CommandAgent`] runs it as a child process:
//! one JSON document on stdin, exit status for success.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

use crate::error::{GenesisError, GenesisResult};

/// Payload passed to the agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentRequest {
    pub user_prompt: String,
}

/// Invocation options passed alongside the payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentOptions {
    pub recursion_limit: u32,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            recursion_limit: 100,
        }
    }
}

/// What a finished agent run left behind.
#[derive(Debug, Clone, Default)]
pub struct AgentOutcome {
    pub stdout: String,
    pub stderr: String,
}

#[async_trait::async_trait]
pub trait ProjectAgent: Send + Sync {
    /// Run generation to completion. Errors mean the run failed.
    async fn invoke(&self, request: &AgentRequest, options: AgentOptions)
        -> GenesisResult<AgentOutcome>;
}

#[derive(Serialize)]
struct AgentEnvelope<'a> {
    input: &'a AgentRequest,
    config: AgentOptions,
}

/// Runs the agent as `program args...`.
///
/// The child inherits the studio's working directory unless one is set, so `python -m graph`
/// resolves the agent package beside the studio. The project root reaches it only through
/// `PAGI_GENESIS_PROJECT_ROOT`.
#[derive(Debug, Clone)]
pub struct CommandAgent {
    program: String,
    args: Vec<String>,
    project_root: PathBuf,
    working_dir: Option<PathBuf>,
}

impl CommandAgent {
    pub fn new(program: impl Into<String>, args: Vec<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            project_root: project_root.into(),
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait::async_trait]
impl ProjectAgent for CommandAgent {
    async fn invoke(
        &self,
        request: &AgentRequest,
        options: AgentOptions,
    ) -> GenesisResult<AgentOutcome> {
        let envelope = serde_json::to_vec(&AgentEnvelope {
            input: request,
            config: options,
        })?;

        tracing::info!(
            program = %self.program,
            recursion_limit = options.recursion_limit,
            prompt_chars = request.user_prompt.chars().count(),
            "invoking generation agent"
        );

        let mut command = tokio::process::Command::new(&self.program);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        let mut child = command
            .args(&self.args)
            .env("PAGI_GENESIS_PROJECT_ROOT", &self.project_root)
            .env(
                "PAGI_GENESIS_RECURSION_LIMIT",
                options.recursion_limit.to_string(),
            )
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| GenesisError::AgentSpawn {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // An agent that never reads stdin closes the pipe early; that is not a failure.
            if let Err(e) = stdin.write_all(&envelope).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            tracing::warn!(
                program = %self.program,
                code = ?output.status.code(),
                "generation agent failed"
            );
            return Err(GenesisError::AgentFailed {
                code: output.status.code(),
                stderr,
            });
        }

        tracing::info!(program = %self.program, "generation agent finished");
        Ok(AgentOutcome { stdout, stderr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let request = AgentRequest {
            user_prompt: "todo app".to_string(),
        };
        let json = serde_json::to_value(AgentEnvelope {
            input: &request,
            config: AgentOptions::default(),
        })
        .unwrap();
        assert_eq!(json["input"]["user_prompt"], "todo app");
        assert_eq!(json["config"]["recursion_limit"], 100);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_agent_receives_payload() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().join("generated_project");
        std::fs::create_dir_all(&root).unwrap();
        let agent = CommandAgent::new(
            "sh",
            vec![
                "-c".to_string(),
                "cat; echo; pwd; echo \"$PAGI_GENESIS_PROJECT_ROOT\"".to_string(),
            ],
            &root,
        )
        .with_working_dir(dir.path());
        let outcome = agent
            .invoke(
                &AgentRequest {
                    user_prompt: "dark mode todo".to_string(),
                },
                AgentOptions { recursion_limit: 7 },
            )
            .await
            .expect("agent run");

        let first_line = outcome.stdout.lines().next().unwrap_or_default();
        let echoed: serde_json::Value = serde_json::from_str(first_line).expect("payload json");
        assert_eq!(echoed["input"]["user_prompt"], "dark mode todo");
        assert_eq!(echoed["config"]["recursion_limit"], 7);
        let cwd = outcome.stdout.lines().nth(1).unwrap_or_default();
        let expected = dir.path().canonicalize().unwrap();
        assert_eq!(std::path::Path::new(cwd).canonicalize().unwrap(), expected);
        let exported_root = outcome.stdout.lines().nth(2).unwrap_or_default();
        assert_eq!(std::path::Path::new(exported_root), root.as_path());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_agent_failure_carries_stderr() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let agent = CommandAgent::new(
            "sh",
            vec!["-c".to_string(), "echo boom >&2; exit 3".to_string()],
            dir.path(),
        );
        let err = agent
            .invoke(
                &AgentRequest {
                    user_prompt: "x".to_string(),
                },
                AgentOptions::default(),
            )
            .await
            .unwrap_err();
        match err {
            GenesisError::AgentFailed { code, stderr } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let agent = CommandAgent::new("pagi-genesis-no-such-agent", Vec::new(), dir.path());
        let err = agent
            .invoke(
                &AgentRequest {
                    user_prompt: "x".to_string(),
                },
                AgentOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GenesisError::AgentSpawn { .. }));
    }
}
