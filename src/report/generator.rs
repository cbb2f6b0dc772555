//! Markdown and JSON report generation.
//!
//! This module renders a [`Report`] the way the PopNews article card
//! presents a fact-check: score badge first, then the warning, then the
//! supporting lists.

use crate::models::{FactCheckResult, FakeNewsDetection, Report, ReportMetadata};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# PopNews Fact-Check Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_credibility_section(&report.fact_check));

    if let Some(ref points) = report.summary {
        output.push_str(&generate_summary_section(points));
    }
    if let Some(ref detection) = report.fake_news {
        output.push_str(&generate_fake_news_section(detection));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Article\n\n");
    section.push_str(&format!("- **Title:** {}\n", metadata.title));
    if !metadata.url.is_empty() {
        section.push_str(&format!("- **URL:** {}\n", metadata.url));
    }
    section.push_str(&format!("- **Topic:** {}\n", metadata.topic));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Fallback Model:** `{}`\n", metadata.model_used));
    section.push_str(&format!(
        "- **Analysis Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    if let Some(ref excerpt) = metadata.excerpt {
        for line in excerpt.lines() {
            section.push_str(&format!("> {}\n", line));
        }
        section.push('\n');
    }

    section
}

/// Generate the credibility section.
fn generate_credibility_section(result: &FactCheckResult) -> String {
    let mut section = String::new();
    let level = result.level();

    section.push_str("## Credibility\n\n");
    section.push_str(&format!(
        "{} **{}/10** - {}\n\n",
        level.emoji(),
        format_score(result.credibility_score),
        level
    ));

    if let Some(ref warning) = result.misinformation_warning {
        section.push_str(&format!("> ⚠️ **Misinformation Warning:** {}\n\n", warning));
    }

    section.push_str(&generate_list("Reliability Points", &result.reliability_points, None));
    section.push_str(&generate_list("Source Verification", &result.source_verification, None));
    section.push_str(&generate_list(
        "Content Issues",
        &result.content_issues,
        Some("No content issues detected."),
    ));
    section.push_str(&generate_list("Suggested Sources", &result.suggested_sources, None));

    section
}

/// Generate a titled bullet list. Empty lists render `empty` or nothing.
fn generate_list(title: &str, items: &[String], empty: Option<&str>) -> String {
    if items.is_empty() && empty.is_none() {
        return String::new();
    }

    let mut section = format!("### {}\n\n", title);
    if items.is_empty() {
        section.push_str(empty.unwrap_or_default());
        section.push('\n');
    }
    for item in items {
        section.push_str(&format!("- {}\n", item));
    }
    section.push('\n');

    section
}

/// Generate the AI summary section.
fn generate_summary_section(points: &[String]) -> String {
    let mut section = String::new();

    section.push_str("## AI Summary\n\n");
    for (i, point) in points.iter().enumerate() {
        section.push_str(&format!("{}. {}\n", i + 1, point));
    }
    section.push('\n');

    section
}

/// Generate the fake-news detection section.
fn generate_fake_news_section(detection: &FakeNewsDetection) -> String {
    let mut section = String::new();

    section.push_str("## Fake News Detection\n\n");
    section.push_str(&format!(
        "- **Likelihood:** {:.0}%\n",
        detection.fake_news_score * 100.0
    ));
    section.push_str(&format!(
        "- **Verdict:** {}\n",
        if detection.is_fake {
            "Likely fake"
        } else {
            "Likely genuine"
        }
    ));
    if !detection.explanation.is_empty() {
        section.push_str(&format!("\n{}\n", detection.explanation));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(
        "*AI-generated assessment. Verify important claims with the suggested sources.*\n",
    );

    footer
}

/// Whole scores print without a decimal point.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    }
}

/// First `max_chars` characters of `text`, cut at a word boundary.
///
/// Returns `None` when `text` is blank or `max_chars` is zero.
pub fn excerpt(text: &str, max_chars: usize) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || max_chars == 0 {
        return None;
    }
    if text.chars().count() <= max_chars {
        return Some(text.to_string());
    }

    let cut: String = text.chars().take(max_chars).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    Some(format!("{}…", cut.trim_end()))
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
