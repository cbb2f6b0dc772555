//! Provider seam for the analysis pipeline.
//!
//! Every backend that can answer a fact-check, summary or fake-news
//! request implements one of these traits. Orchestrators hold them as
//! trait objects in priority order.

use crate::models::AnalysisInput;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Why a provider attempt failed. Every variant triggers fallback.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("cannot reach {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} returned {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("no response within {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("invalid response format: {0}")]
    InvalidShape(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl ProviderError {
    /// Classify a reqwest failure against `endpoint`.
    pub fn from_reqwest(err: reqwest::Error, endpoint: &str, limit: Duration) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(limit)
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// Sampling settings for one completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Produces a raw credibility assessment for an article.
///
/// The returned JSON is validated and normalized by the caller.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Upper bound on a single attempt, enforced by the orchestrator.
    fn deadline(&self) -> Option<Duration> {
        None
    }

    async fn analyze(&self, input: &AnalysisInput) -> Result<Value, ProviderError>;
}

/// Produces bullet-point summaries.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn summarize(&self, input: &AnalysisInput) -> Result<Vec<String>, ProviderError>;
}

/// Produces a raw fake-news likelihood.
#[async_trait]
pub trait DetectionProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn detect(&self, input: &AnalysisInput) -> Result<Value, ProviderError>;
}

/// Text completion from a generative-language model.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, ProviderError>;
}
