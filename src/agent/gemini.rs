//! Generative-language fallback provider.
//!
//! `GeminiClient` talks to the `generateContent` endpoint; `GeminiProvider`
//! turns article inputs into prompts and the free-form completions back
//! into JSON the orchestrators understand.

use crate::agent::prompts::{fact_check_prompt, fake_news_prompt, summary_prompt};
use crate::agent::provider::{
    AnalysisProvider, CompletionClient, DetectionProvider, GenerationOptions, ProviderError,
    SummaryProvider,
};
use crate::analysis::{
    extract_json_object, inconclusive_detection, parse_error_analysis, parse_summary_points,
    unparsed_analysis,
};
use crate::models::AnalysisInput;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Sampling used for fact-check prompts unless configured otherwise.
pub const ANALYSIS_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.1,
    max_output_tokens: 2048,
};

pub const SUMMARY_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.2,
    max_output_tokens: 200,
};

pub const DETECTION_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.1,
    max_output_tokens: 1024,
};

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL up to and including the API version.
    pub api_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: None,
            timeout_seconds: 60,
        }
    }
}

/// `generateContent` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// `generateContent` response body.
#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, or empty.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default()
    }
}

/// HTTP client for the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        info!("Using Gemini model {} as fallback", config.model);

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Transport {
                endpoint: config.api_url.clone(),
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

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::NotConfigured("Gemini API key"))?;

        let url = self.endpoint();
        let limit = Duration::from_secs(self.config.timeout_seconds);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
            },
        };

        debug!("Sending {} prompt chars to {}", prompt.len(), url);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, &url, limit))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            warn!("Gemini API error ({}): {}", status, message);
            return Err(ProviderError::Status {
                endpoint: url,
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, &url, limit))?;

        Ok(body.text())
    }
}

/// Fallback provider backed by a completion model.
#[derive(Debug, Clone)]
pub struct GeminiProvider<C = GeminiClient> {
    client: C,
    analysis_options: GenerationOptions,
}

impl<C: CompletionClient> GeminiProvider<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            analysis_options: ANALYSIS_OPTIONS,
        }
    }

    /// Override the sampling temperature for fact-check prompts.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.analysis_options.temperature = temperature;
        self
    }
}

#[async_trait]
impl<C: CompletionClient> AnalysisProvider for GeminiProvider<C> {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze(&self, input: &AnalysisInput) -> Result<Value, ProviderError> {
        info!("Analyzing article with Gemini: {}", input.title);

        let prompt = fact_check_prompt(input);
        let text = self.client.complete(&prompt, self.analysis_options).await?;
        debug!("Raw Gemini response: {}", text);

        match extract_json_object(&text) {
            Ok(Some(value)) if value.as_object().is_some_and(|o| !o.is_empty()) => Ok(value),
            Ok(_) => {
                warn!("No analysis object in Gemini response, using default analysis");
                Ok(unparsed_analysis())
            }
            Err(e) => {
                warn!("Error parsing Gemini response: {}", e);
                Ok(parse_error_analysis())
            }
        }
    }
}

#[async_trait]
impl<C: CompletionClient> SummaryProvider for GeminiProvider<C> {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn summarize(&self, input: &AnalysisInput) -> Result<Vec<String>, ProviderError> {
        if input.text.trim().is_empty() {
            return Err(ProviderError::InvalidShape(
                "article text is required".to_string(),
            ));
        }

        info!(
            "Generating summary for article: {} on topic: {}",
            input.title, input.topic
        );
        let text = self
            .client
            .complete(&summary_prompt(input), SUMMARY_OPTIONS)
            .await?;

        Ok(parse_summary_points(&text, &input.topic))
    }
}

#[async_trait]
impl<C: CompletionClient> DetectionProvider for GeminiProvider<C> {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn detect(&self, input: &AnalysisInput) -> Result<Value, ProviderError> {
        info!("Detecting fake news with Gemini for: {}", input.title);
        let text = self
            .client
            .complete(&fake_news_prompt(input), DETECTION_OPTIONS)
            .await?;

        match extract_json_object(&text) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => serde_json::to_value(inconclusive_detection())
                .map_err(|e| ProviderError::Decode(e.to_string())),
            Err(e) => Err(ProviderError::Decode(e.to_string())),
        }
    }
}
