//! Prompt validation and a single agent run.

use crate::agent::{AgentOptions, AgentOutcome, AgentRequest, ProjectAgent};

#[derive(Debug)]
pub enum GenerationOutcome {
    /// Prompt was blank; the agent was not called.
    EmptyPrompt,
    Completed(AgentOutcome),
    Failed(String),
}

/// Invoke the agent for a non-blank prompt. Blank prompts never reach the agent.
pub async fn run_generation(
    agent: &dyn ProjectAgent,
    prompt: &str,
    options: AgentOptions,
) -> GenerationOutcome {
    if prompt.trim().is_empty() {
        tracing::debug!("generation skipped: empty prompt");
        return GenerationOutcome::EmptyPrompt;
    }
    let request = AgentRequest {
        user_prompt: prompt.to_string(),
    };
    match agent.invoke(&request, options).await {
        Ok(outcome) => GenerationOutcome::Completed(outcome),
        Err(e) => {
            tracing::warn!(error = %e, "project generation failed");
            GenerationOutcome::Failed(e.to_string())
        }
    }
}
