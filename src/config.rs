//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.popnews.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = ".popnews.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// AI agent service settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Generative-language fallback settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Topic used when none is given for an article.
    #[serde(default = "default_topic")]
    pub topic: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
            topic: default_topic(),
        }
    }
}

fn default_output() -> String {
    "popnews_report.md".to_string()
}

fn default_topic() -> String {
    "news".to_string()
}

/// Self-hosted AI agent settings (primary provider).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Whether to try the agent before the model.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Agent service base URL.
    #[serde(default = "default_agent_url")]
    pub url: String,

    /// Bound on article analysis, summary and detection requests.
    #[serde(default = "default_agent_timeout")]
    pub timeout_seconds: u64,

    /// Bound on free-text fact-check requests.
    #[serde(default = "default_fact_check_timeout")]
    pub fact_check_timeout_seconds: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_agent_url(),
            timeout_seconds: default_agent_timeout(),
            fact_check_timeout_seconds: default_fact_check_timeout(),
        }
    }
}

fn default_agent_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_agent_timeout() -> u64 {
    30
}

fn default_fact_check_timeout() -> u64 {
    60
}

/// LLM model settings (fallback provider).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name.
    #[serde(default = "default_model")]
    pub name: String,

    /// Generative-language API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key. Usually supplied through `GEMINI_API_KEY` instead.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Temperature for fact-check generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            api_url: default_api_url(),
            api_key: None,
            temperature: default_temperature(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_timeout() -> u64 {
    60
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Generate a three-point summary alongside the fact-check.
    #[serde(default)]
    pub include_summary: bool,

    /// Run fake-news detection alongside the fact-check.
    #[serde(default)]
    pub include_fake_news: bool,

    /// Maximum characters of article text quoted in Markdown reports.
    #[serde(default = "default_excerpt_chars")]
    pub max_excerpt_chars: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_summary: false,
            include_fake_news: false,
            max_excerpt_chars: default_excerpt_chars(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_excerpt_chars() -> usize {
    280
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.popnews.toml` from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.agent_url {
            self.agent.url = url.clone();
        }
        if args.no_agent {
            self.agent.enabled = false;
        }

        if let Some(ref model) = args.model {
            self.model.name = model.clone();
        }
        if let Some(ref api_url) = args.gemini_url {
            self.model.api_url = api_url.clone();
        }
        if let Some(ref key) = args.gemini_key {
            self.model.api_key = Some(key.clone());
        }
        if let Some(temperature) = args.temperature {
            self.model.temperature = temperature;
        }

        // A single --timeout bounds the agent call; the model keeps its own.
        if let Some(timeout) = args.timeout {
            self.agent.timeout_seconds = timeout;
            self.agent.fact_check_timeout_seconds = timeout;
        }

        if let Some(ref topic) = args.topic {
            self.general.topic = topic.clone();
        }

        // Flags always override
        if args.summary {
            self.report.include_summary = true;
        }
        if args.detect_fake {
            self.report.include_fake_news = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
