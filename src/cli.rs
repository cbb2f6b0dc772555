//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// PopNews - AI fact-checking for news articles
///
/// Scores an article's credibility with the PopNews AI agent, falling
/// back to a Gemini model and finally to a neutral default. Optionally
/// adds a three-point summary and a fake-news likelihood.
///
/// Examples:
///   popnews --title "Rates hold steady" --text-file story.txt --url https://example.com/rates
///   popnews --article article.json --summary --detect-fake --format json
///   popnews --free-text --text "The moon landing was staged"
///   popnews --text-file story.txt --fail-below 5
///   popnews --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Article text to analyze
    #[arg(
        long,
        value_name = "TEXT",
        required_unless_present_any = ["text_file", "article", "init_config"],
        conflicts_with_all = ["text_file", "article"]
    )]
    pub text: Option<String>,

    /// Read the article text from a file
    #[arg(long, value_name = "FILE", conflicts_with = "article")]
    pub text_file: Option<PathBuf>,

    /// Read a whole article (news-search API JSON) from a file
    ///
    /// Uses its title, url and content (or description when content is empty).
    #[arg(short, long, value_name = "FILE")]
    pub article: Option<PathBuf>,

    /// Article title
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Article URL
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Topic the article belongs to (default: news)
    #[arg(long, value_name = "TOPIC")]
    pub topic: Option<String>,

    /// Treat the input as pasted text rather than a published article
    ///
    /// Uses the agent's free-text fact-check endpoint with a longer timeout.
    #[arg(long)]
    pub free_text: bool,

    /// Also generate a three-point AI summary
    #[arg(long)]
    pub summary: bool,

    /// Also run fake-news detection
    #[arg(long)]
    pub detect_fake: bool,

    /// Output file path for the report ("-" for stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// AI agent service URL
    #[arg(long, value_name = "URL", env = "POPNEWS_AGENT_URL")]
    pub agent_url: Option<String>,

    /// Skip the AI agent and go straight to the model
    #[arg(long)]
    pub no_agent: bool,

    /// Generative-language API base URL
    #[arg(long, value_name = "URL")]
    pub gemini_url: Option<String>,

    /// Gemini API key
    #[arg(long, value_name = "KEY", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_key: Option<String>,

    /// Gemini model to use as fallback
    #[arg(short, long, env = "POPNEWS_MODEL")]
    pub model: Option<String>,

    /// Temperature for fact-check generation (0.0 - 1.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Agent request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Exit with code 2 when the credibility score is below this value
    ///
    /// Useful for pipelines that gate on article credibility (0 - 10).
    #[arg(long, value_name = "SCORE")]
    pub fail_below: Option<f64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .popnews.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .popnews.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Title used for free-text checks when none is given.
pub const FREE_TEXT_TITLE: &str = "User submitted content";
/// Topic used for free-text checks when none is given.
pub const FREE_TEXT_TOPIC: &str = "fact check";

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref text) = self.text {
            if text.trim().is_empty() {
                return Err("Article text must not be empty".to_string());
            }
        }

        for (flag, path) in [("--text-file", &self.text_file), ("--article", &self.article)] {
            if let Some(path) = path {
                if !path.is_file() {
                    return Err(format!("{} does not exist: {}", flag, path.display()));
                }
            }
        }

        if let Some(ref url) = self.agent_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Agent URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(ref url) = self.gemini_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Gemini URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Validate temperature range
        if let Some(temperature) = self.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err("Temperature must be between 0.0 and 1.0".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(score) = self.fail_below {
            if !(0.0..=10.0).contains(&score) {
                return Err("--fail-below must be between 0 and 10".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Title to use when none was supplied.
    pub fn default_title(&self) -> Option<String> {
        self.free_text.then(|| FREE_TEXT_TITLE.to_string())
    }

    /// Whether the report goes to stdout.
    pub fn writes_to_stdout(&self) -> bool {
        self.output
            .as_deref()
            .is_some_and(|p| p.as_os_str() == "-")
    }
}
