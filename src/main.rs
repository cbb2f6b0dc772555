//! PopNews - AI fact-checking for news articles
//!
//! A CLI tool that scores an article's credibility with the PopNews AI
//! agent, falling back to a Gemini model and finally to a neutral
//! default, then writes a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success (score at or above --fail-below, or no --fail-below set)
//!   1 - Runtime error (bad input, config, report write, etc.)
//!   2 - Credibility score below the --fail-below threshold

mod agent;
mod analysis;
mod cli;
mod config;
mod models;
mod report;

use agent::{AgentRoute, Pipeline};
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat, FREE_TEXT_TOPIC};
use config::{Config, CONFIG_FILE};
use indicatif::{ProgressBar, ProgressStyle};
use models::{AnalysisInput, Article, Report, ReportMetadata};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Steps shown by the progress spinner.
const STEPS: [&str; 4] = ["Preparing article", "Analyzing", "Fact checking", "Complete"];

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("PopNews v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_fact_check(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Fact check failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .popnews.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to customize the agent URL, model, and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete fact-check workflow. Returns exit code (0 or 2).
async fn run_fact_check(args: Args) -> Result<i32> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Chatter goes to stdout, so keep it out of the way of a piped report.
    let chatty = !args.quiet && !args.writes_to_stdout();
    let progress = step_progress(chatty);

    // Step 1: Prepare the article
    progress.set_message(STEPS[0]);
    let input = build_input(&args, &config)?;
    info!("Prepared article: {} ({} chars)", input.title, input.text.len());

    let route = if args.free_text {
        AgentRoute::FactCheck
    } else {
        AgentRoute::Analyze
    };
    let pipeline = Pipeline::from_config(&config, route)?;
    debug!(
        "Providers: {}",
        pipeline.fact_checker.provider_names().join(" -> ")
    );

    // Step 2: Summary and fake-news detection
    progress.inc(1);
    progress.set_message(STEPS[1]);
    let summary = if config.report.include_summary {
        Some(pipeline.summarizer.summarize(&input).await)
    } else {
        None
    };
    let fake_news = if config.report.include_fake_news {
        Some(pipeline.detector.detect(&input).await)
    } else {
        None
    };

    // Step 3: Fact check
    progress.inc(1);
    progress.set_message(STEPS[2]);
    let outcome = pipeline.fact_checker.run(&input).await;
    let used_default = outcome.used_default();

    progress.inc(1);
    progress.finish_with_message(STEPS[3]);

    // Step 4: Build and write the report
    let duration = start_time.elapsed().as_secs_f64();

    let metadata = ReportMetadata {
        title: input.title.clone(),
        url: input.url.clone(),
        topic: input.topic.clone(),
        analysis_date: Utc::now(),
        model_used: config.model.name.clone(),
        duration_seconds: duration,
        excerpt: report::excerpt(&input.text, config.report.max_excerpt_chars),
    };

    let report = Report {
        metadata,
        fact_check: outcome.result,
        summary,
        fake_news,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    if args.writes_to_stdout() {
        println!("{}", output);
    } else {
        let path = output_path(&args, &config);
        std::fs::write(&path, &output)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;

        if chatty {
            print_summary(&report, duration);
            println!("\n✅ Report saved to: {}", path.display());
        }
    }

    if used_default {
        warn!("No provider produced an assessment; the report holds the default result");
        if !args.quiet {
            eprintln!("\n⚠️  Unable to fact check at this time. Please try again later.");
        }
    }

    // Check --fail-below threshold
    if let Some(threshold) = args.fail_below {
        if report.fact_check.credibility_score < threshold {
            eprintln!(
                "\n⛔ Credibility score {} is below {}. Failing (exit code 2).",
                report.fact_check.credibility_score, threshold
            );
            return Ok(2);
        }
    }

    Ok(0)
}

/// Spinner across the four pipeline steps, hidden when not `visible`.
fn step_progress(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(STEPS.len() as u64 - 1);
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Print the short result summary.
fn print_summary(report: &Report, duration: f64) {
    let level = report.fact_check.level();

    println!("\n📊 Fact-Check Summary:");
    println!("   Title: {}", report.metadata.title);
    println!(
        "   {} Credibility: {}/10 ({})",
        level.emoji(),
        report.fact_check.credibility_score,
        level
    );
    if let Some(ref warning) = report.fact_check.misinformation_warning {
        println!("   ⚠️  Warning: {}", warning);
    }
    if let Some(ref detection) = report.fake_news {
        println!(
            "   Fake-news likelihood: {:.0}%",
            detection.fake_news_score * 100.0
        );
    }
    println!("   Duration: {:.1}s", duration);
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Assemble the analysis input from --article, --text or --text-file.
fn build_input(args: &Args, config: &Config) -> Result<AnalysisInput> {
    let topic = match args.topic {
        None if args.free_text => FREE_TEXT_TOPIC.to_string(),
        _ => config.general.topic.clone(),
    };

    if let Some(ref path) = args.article {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read article: {}", path.display()))?;
        let article: Article = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse article: {}", path.display()))?;

        let mut input = AnalysisInput::from(&article);
        if let Some(ref title) = args.title {
            input.title = title.clone();
        }
        if let Some(ref url) = args.url {
            input.url = url.clone();
        }
        input.topic = topic;
        return non_empty(input);
    }

    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file: {}", path.display()))?,
        (None, None) => anyhow::bail!("No article text given; use --text, --text-file or --article"),
    };

    non_empty(AnalysisInput::new(
        args.title.clone().or_else(|| args.default_title()),
        text,
        args.url.clone(),
        Some(topic),
    ))
}

/// Reject inputs with nothing to analyze.
fn non_empty(input: AnalysisInput) -> Result<AnalysisInput> {
    if input.text.trim().is_empty() {
        anyhow::bail!("Article text is required");
    }
    Ok(input)
}

/// Report path: --output, else the configured default (with a `.json`
/// extension for JSON reports).
fn output_path(args: &Args, config: &Config) -> PathBuf {
    if let Some(ref path) = args.output {
        return path.clone();
    }

    let path = PathBuf::from(&config.general.output);
    match args.format {
        OutputFormat::Json => path.with_extension("json"),
        OutputFormat::Markdown => path,
    }
}
