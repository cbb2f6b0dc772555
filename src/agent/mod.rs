//! AI providers and the fallback chains that drive them.
//!
//! The agent service is tried first and the Gemini model second. Each
//! chain ends in a fixed default, so a [`Pipeline`] always produces a
//! result.

pub mod agent_client;
pub mod gemini;
pub mod orchestrator;
pub mod prompts;
pub mod provider;

#[cfg(test)]
mod test_support;

pub use agent_client::{AgentClient, AgentClientConfig, AgentRoute};
pub use gemini::{GeminiClient, GeminiConfig, GeminiProvider};
pub use orchestrator::{Detector, FactChecker, Summarizer};
pub use provider::{AnalysisProvider, DetectionProvider, SummaryProvider};

use crate::config::Config;
use anyhow::{Context, Result};
use tracing::debug;

/// The three orchestrators, sharing one provider list.
pub struct Pipeline {
    pub fact_checker: FactChecker,
    pub summarizer: Summarizer,
    pub detector: Detector,
}

impl Pipeline {
    /// Build the provider chains described by `config`.
    ///
    /// `route` selects the agent endpoint used for fact-checks.
    pub fn from_config(config: &Config, route: AgentRoute) -> Result<Self> {
        let agent = if config.agent.enabled {
            let agent_config = AgentClientConfig {
                base_url: config.agent.url.clone(),
                timeout_seconds: config.agent.timeout_seconds,
                fact_check_timeout_seconds: config.agent.fact_check_timeout_seconds,
                route,
            };
            Some(AgentClient::new(agent_config).context("Failed to create agent client")?)
        } else {
            debug!("Agent disabled, using the model only");
            None
        };

        let gemini_config = GeminiConfig {
            api_url: config.model.api_url.clone(),
            model: config.model.name.clone(),
            api_key: config.model.api_key.clone(),
            timeout_seconds: config.model.timeout_seconds,
        };
        let gemini = GeminiProvider::new(
            GeminiClient::new(gemini_config).context("Failed to create Gemini client")?,
        )
        .with_temperature(config.model.temperature);

        Ok(Self::with_providers(agent, gemini))
    }

    fn with_providers<A, G>(agent: Option<A>, gemini: G) -> Self
    where
        A: AnalysisProvider + SummaryProvider + DetectionProvider + Clone + 'static,
        G: AnalysisProvider + SummaryProvider + DetectionProvider + Clone + 'static,
    {
        let mut analysis: Vec<Box<dyn AnalysisProvider>> = Vec::new();
        let mut summary: Vec<Box<dyn SummaryProvider>> = Vec::new();
        let mut detection: Vec<Box<dyn DetectionProvider>> = Vec::new();

        if let Some(agent) = agent {
            analysis.push(Box::new(agent.clone()));
            summary.push(Box::new(agent.clone()));
            detection.push(Box::new(agent));
        }
        analysis.push(Box::new(gemini.clone()));
        summary.push(Box::new(gemini.clone()));
        detection.push(Box::new(gemini));

        Self {
            fact_checker: FactChecker::new(analysis),
            summarizer: Summarizer::new(summary),
            detector: Detector::new(detection),
        }
    }
}
