//! Client for the self-hosted AI agent service.
//!
//! The agent exposes one JSON endpoint per operation:
//! - `POST /api/analyze`: fact-check a published article
//! - `POST /api/fact-check`: fact-check free text
//! - `POST /api/summary`: three-point summary
//! - `POST /api/fake-news-detection`: fake-news likelihood

use crate::agent::provider::{
    AnalysisProvider, DetectionProvider, ProviderError, SummaryProvider,
};
use crate::models::AnalysisInput;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Which agent endpoint answers fact-check requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentRoute {
    /// `/api/analyze`, for articles with a title and URL.
    #[default]
    Analyze,
    /// `/api/fact-check`, for pasted text.
    FactCheck,
}

/// Configuration for the agent client.
#[derive(Debug, Clone)]
pub struct AgentClientConfig {
    pub base_url: String,
    /// Bound on `/api/analyze`, `/api/summary` and `/api/fake-news-detection`.
    pub timeout_seconds: u64,
    /// Bound on `/api/fact-check`.
    pub fact_check_timeout_seconds: u64,
    pub route: AgentRoute,
}

impl Default for AgentClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_seconds: 30,
            fact_check_timeout_seconds: 60,
            route: AgentRoute::Analyze,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    article_title: &'a str,
    article_text: &'a str,
    article_url: &'a str,
    topic: &'a str,
}

#[derive(Debug, Serialize)]
struct FactCheckRequest<'a> {
    text: &'a str,
    title: &'a str,
    source: &'a str,
    topic: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArticleTextRequest<'a> {
    article_title: &'a str,
    article_text: &'a str,
    topic: &'a str,
}

/// HTTP client for the agent service.
#[derive(Debug, Clone)]
pub struct AgentClient {
    config: AgentClientConfig,
    http_client: reqwest::Client,
}

impl AgentClient {
    /// Create a client for the agent at `config.base_url`.
    pub fn new(config: AgentClientConfig) -> Result<Self, ProviderError> {
        info!("Using AI agent at {}", config.base_url);

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::Transport {
                endpoint: config.base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Replace the underlying HTTP client.
    #[cfg(test)]
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    fn route_deadline(&self) -> Duration {
        match self.config.route {
            AgentRoute::Analyze => Duration::from_secs(self.config.timeout_seconds),
            AgentRoute::FactCheck => Duration::from_secs(self.config.fact_check_timeout_seconds),
        }
    }

    /// POST `body` to `path` and return the decoded JSON response.
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        limit: Duration,
    ) -> Result<Value, ProviderError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .timeout(limit)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, &url, limit))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Agent API error ({}): {}", status, body);
            return Err(ProviderError::Status {
                endpoint: url,
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, &url, limit))
    }
}

#[async_trait]
impl AnalysisProvider for AgentClient {
    fn name(&self) -> &str {
        match self.config.route {
            AgentRoute::Analyze => "ai-agent",
            AgentRoute::FactCheck => "ai-agent/fact-check",
        }
    }

    fn deadline(&self) -> Option<Duration> {
        Some(self.route_deadline())
    }

    async fn analyze(&self, input: &AnalysisInput) -> Result<Value, ProviderError> {
        info!("Analyzing article with AI agent: {}", input.title);
        let limit = self.route_deadline();

        let data = match self.config.route {
            AgentRoute::Analyze => {
                let request = AnalyzeRequest {
                    article_title: &input.title,
                    article_text: &input.text,
                    article_url: &input.url,
                    topic: &input.topic,
                };
                self.post_json("/api/analyze", &request, limit).await?
            }
            AgentRoute::FactCheck => {
                let source = if input.url.trim().is_empty() {
                    "User input"
                } else {
                    input.url.as_str()
                };
                let request = FactCheckRequest {
                    text: &input.text,
                    title: &input.title,
                    source,
                    topic: &input.topic,
                };
                self.post_json("/api/fact-check", &request, limit).await?
            }
        };

        debug!("Received fact check data: {}", data);
        Ok(data)
    }
}

#[async_trait]
impl SummaryProvider for AgentClient {
    fn name(&self) -> &str {
        "ai-agent"
    }

    async fn summarize(&self, input: &AnalysisInput) -> Result<Vec<String>, ProviderError> {
        info!("Generating summary with AI agent for: {}", input.title);
        let request = ArticleTextRequest {
            article_title: &input.title,
            article_text: &input.text,
            topic: &input.topic,
        };
        let limit = Duration::from_secs(self.config.timeout_seconds);
        let data = self.post_json("/api/summary", &request, limit).await?;

        let points: Vec<String> = data
            .get("summaryPoints")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        if points.is_empty() {
            return Err(ProviderError::InvalidShape(
                "agent returned no summary points".to_string(),
            ));
        }
        Ok(points)
    }
}

#[async_trait]
impl DetectionProvider for AgentClient {
    fn name(&self) -> &str {
        "ai-agent"
    }

    async fn detect(&self, input: &AnalysisInput) -> Result<Value, ProviderError> {
        info!("Detecting fake news with AI agent for: {}", input.title);
        let request = ArticleTextRequest {
            article_title: &input.title,
            article_text: &input.text,
            topic: &input.topic,
        };
        let limit = Duration::from_secs(self.config.timeout_seconds);
        let data = self
            .post_json("/api/fake-news-detection", &request, limit)
            .await?;

        if !data.is_object() {
            return Err(ProviderError::InvalidShape(format!(
                "expected an object, got {}",
                data
            )));
        }
        Ok(data)
    }
}
