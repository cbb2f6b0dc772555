//! Data models for the fact-check client.
//!
//! This module contains the core data structures used throughout
//! the application for representing articles, analysis inputs and
//! the normalized results returned by the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credibility band derived from a fact-check score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredibilityLevel {
    /// Score below 5
    Low,
    /// Score from 5 up to (but excluding) 8
    Moderate,
    /// Score of 8 or more
    High,
}

impl fmt::Display for CredibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredibilityLevel::Low => write!(f, "Low Credibility"),
            CredibilityLevel::Moderate => write!(f, "Moderately Credible"),
            CredibilityLevel::High => write!(f, "Highly Credible"),
        }
    }
}

impl CredibilityLevel {
    /// Classify a credibility score.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            CredibilityLevel::High
        } else if score >= 5.0 {
            CredibilityLevel::Moderate
        } else {
            CredibilityLevel::Low
        }
    }

    /// Returns an emoji representation of the level.
    pub fn emoji(&self) -> &'static str {
        match self {
            CredibilityLevel::Low => "🔴",
            CredibilityLevel::Moderate => "🟡",
            CredibilityLevel::High => "🟢",
        }
    }
}

/// Normalized credibility assessment of an article.
///
/// Always built through [`crate::analysis::normalize`] or
/// [`crate::analysis::default_result`], so the score is within `[0, 10]`
/// and every list is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCheckResult {
    pub credibility_score: f64,
    pub reliability_points: Vec<String>,
    pub misinformation_warning: Option<String>,
    pub source_verification: Vec<String>,
    pub content_issues: Vec<String>,
    pub suggested_sources: Vec<String>,
}

impl FactCheckResult {
    /// Band this result falls into.
    pub fn level(&self) -> CredibilityLevel {
        CredibilityLevel::from_score(self.credibility_score)
    }
}

/// Likelihood that an article is fake news.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FakeNewsDetection {
    /// 0 = definitely real, 1 = definitely fake.
    pub fake_news_score: f64,
    pub is_fake: bool,
    pub explanation: String,
}

/// The four inputs of a fact-check run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisInput {
    pub title: String,
    pub text: String,
    pub url: String,
    pub topic: String,
}

impl AnalysisInput {
    /// Build an input, filling the optional fields with their defaults.
    pub fn new(
        title: Option<String>,
        text: impl Into<String>,
        url: Option<String>,
        topic: Option<String>,
    ) -> Self {
        Self {
            title: title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            text: text.into(),
            url: url.unwrap_or_default(),
            topic: topic
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
        }
    }
}

impl From<&Article> for AnalysisInput {
    fn from(article: &Article) -> Self {
        Self::new(
            Some(article.title.clone()),
            article.analysis_text(),
            Some(article.url.clone()),
            None,
        )
    }
}

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_TOPIC: &str = "news";

/// Publisher of an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A news article as delivered by the news-search API.
///
/// Only read by the pipeline; the enrichment fields are filled in by the
/// caller once the analysis has finished.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: ArticleSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_check: Option<FactCheckResult>,
}

impl Article {
    /// Text handed to the analysis providers: content, or the description
    /// when the content is blank.
    pub fn analysis_text(&self) -> String {
        if self.content.trim().is_empty() {
            self.description.clone()
        } else {
            self.content.clone()
        }
    }
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Title of the analyzed article.
    pub title: String,
    /// URL of the analyzed article, if any.
    pub url: String,
    /// Topic the article was filed under.
    pub topic: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Name of the LLM model configured as fallback.
    pub model_used: String,
    /// Duration of the analysis in seconds.
    pub duration_seconds: f64,
    /// Leading part of the analyzed text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

/// The complete enrichment report for one article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub fact_check: FactCheckResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake_news: Option<FakeNewsDetection>,
}
