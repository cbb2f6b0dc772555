//! Provider fallback chains.
//!
//! Each orchestrator walks its providers in priority order, one at a time,
//! and stops at the first usable answer. When every provider fails it
//! returns a fixed fallback, so callers never see an error.

use crate::agent::provider::{
    AnalysisProvider, DetectionProvider, ProviderError, SummaryProvider,
};
use crate::analysis::{
    default_result, failed_detection, fallback_summary, has_numeric_score, normalize,
    normalize_fake_news,
};
use crate::models::{AnalysisInput, FactCheckResult, FakeNewsDetection};
use tracing::{error, info, warn};

/// A fact-check result and the provider that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FactCheckOutcome {
    pub result: FactCheckResult,
    /// `None` when every provider failed and the default result was used.
    pub provider: Option<String>,
}

impl FactCheckOutcome {
    /// Whether no provider produced an assessment.
    pub fn used_default(&self) -> bool {
        self.provider.is_none()
    }
}

/// Fact-check orchestrator.
pub struct FactChecker {
    providers: Vec<Box<dyn AnalysisProvider>>,
}

impl FactChecker {
    /// Providers are tried in the given order.
    pub fn new(providers: Vec<Box<dyn AnalysisProvider>>) -> Self {
        Self { providers }
    }

    /// Names of the configured providers, in priority order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Produce a normalized assessment of `input`. Never fails.
    pub async fn run(&self, input: &AnalysisInput) -> FactCheckOutcome {
        for provider in &self.providers {
            match attempt(provider.as_ref(), input).await {
                Ok(result) => {
                    info!(
                        "Successfully analyzed article with {}: {}",
                        provider.name(),
                        input.title
                    );
                    return FactCheckOutcome {
                        result,
                        provider: Some(provider.name().to_string()),
                    };
                }
                Err(e) => warn!("{} analysis failed, falling back: {}", provider.name(), e),
            }
        }

        error!("All fact-checking methods failed for: {}", input.title);
        FactCheckOutcome {
            result: default_result(&input.url),
            provider: None,
        }
    }
}

/// One bounded attempt against `provider`, validated and normalized.
async fn attempt(
    provider: &dyn AnalysisProvider,
    input: &AnalysisInput,
) -> Result<FactCheckResult, ProviderError> {
    let raw = match provider.deadline() {
        Some(limit) => tokio::time::timeout(limit, provider.analyze(input))
            .await
            .map_err(|_| ProviderError::Timeout(limit))??,
        None => provider.analyze(input).await?,
    };

    if !has_numeric_score(&raw) {
        return Err(ProviderError::InvalidShape(format!(
            "missing numeric credibilityScore in {}",
            raw
        )));
    }

    Ok(normalize(&raw))
}

/// Summary orchestrator.
pub struct Summarizer {
    providers: Vec<Box<dyn SummaryProvider>>,
}

impl Summarizer {
    pub fn new(providers: Vec<Box<dyn SummaryProvider>>) -> Self {
        Self { providers }
    }

    /// Bullet-point summary of `input`. Never fails.
    pub async fn summarize(&self, input: &AnalysisInput) -> Vec<String> {
        if input.text.trim().is_empty() {
            return fallback_summary(&input.topic);
        }

        for provider in &self.providers {
            match provider.summarize(input).await {
                Ok(points) if !points.is_empty() => return points,
                Ok(_) => warn!("{} returned an empty summary", provider.name()),
                Err(e) => warn!("{} summary failed, falling back: {}", provider.name(), e),
            }
        }

        error!("Error generating AI summary for: {}", input.title);
        fallback_summary(&input.topic)
    }
}

/// Fake-news detection orchestrator.
pub struct Detector {
    providers: Vec<Box<dyn DetectionProvider>>,
}

impl Detector {
    pub fn new(providers: Vec<Box<dyn DetectionProvider>>) -> Self {
        Self { providers }
    }

    /// Fake-news likelihood of `input`. Never fails.
    pub async fn detect(&self, input: &AnalysisInput) -> FakeNewsDetection {
        let mut last_error = String::from("no detection provider configured");

        for provider in &self.providers {
            match provider.detect(input).await {
                Ok(raw) => return normalize_fake_news(&raw),
                Err(e) => {
                    warn!("{} detection failed, falling back: {}", provider.name(), e);
                    last_error = e.to_string();
                }
            }
        }

        failed_detection(&last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Scripted provider counting its calls.
    struct Scripted {
        name: &'static str,
        reply: Option<Value>,
        delay: Option<Duration>,
        deadline: Option<Duration>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn ok(name: &'static str, reply: Value) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    name,
                    reply: Some(reply),
                    delay: None,
                    deadline: None,
                    calls: calls.clone(),
                },
                calls,
            )
        }

        fn failing(name: &'static str) -> (Self, Arc<AtomicUsize>) {
            let (mut provider, calls) = Self::ok(name, Value::Null);
            provider.reply = None;
            (provider, calls)
        }

        fn slow(mut self, delay: Duration, deadline: Duration) -> Self {
            self.delay = Some(delay);
            self.deadline = Some(deadline);
            self
        }

        async fn respond(&self) -> Result<Value, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply.clone().ok_or_else(|| ProviderError::Transport {
                endpoint: self.name.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    #[async_trait]
    impl AnalysisProvider for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn deadline(&self) -> Option<Duration> {
            self.deadline
        }

        async fn analyze(&self, _input: &AnalysisInput) -> Result<Value, ProviderError> {
            self.respond().await
        }
    }

    #[async_trait]
    impl DetectionProvider for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        async fn detect(&self, _input: &AnalysisInput) -> Result<Value, ProviderError> {
            self.respond().await
        }
    }

    struct FixedSummary(Result<Vec<String>, ()>);

    #[async_trait]
    impl SummaryProvider for FixedSummary {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn summarize(&self, _input: &AnalysisInput) -> Result<Vec<String>, ProviderError> {
            self.0
                .clone()
                .map_err(|_| ProviderError::InvalidShape("no summary".to_string()))
        }
    }

    fn input() -> AnalysisInput {
        AnalysisInput::new(
            Some("Bridge reopens".to_string()),
            "The bridge reopened after repairs.",
            Some("https://www.localnews.example/bridge".to_string()),
            Some("transport".to_string()),
        )
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let (primary, primary_calls) = Scripted::ok(
            "primary",
            json!({"credibilityScore": 15, "reliabilityPoints": ["Named sources"]}),
        );
        let (secondary, secondary_calls) = Scripted::ok("secondary", json!({"credibilityScore": 1}));
        let checker = FactChecker::new(vec![Box::new(primary), Box::new(secondary)]);

        let result = checker.run(&input()).await.result;
        assert_eq!(result.credibility_score, 10.0);
        assert_eq!(result.reliability_points, vec!["Named sources"]);
        assert!(result.suggested_sources.is_empty());
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_score_falls_back() {
        let (primary, _) = Scripted::ok("primary", json!({"reliabilityPoints": ["x"]}));
        let (secondary, secondary_calls) =
            Scripted::ok("secondary", json!({"credibilityScore": -3, "contentIssues": ["Loaded language"]}));
        let checker = FactChecker::new(vec![Box::new(primary), Box::new(secondary)]);

        let result = checker.run(&input()).await.result;
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.credibility_score, 0.0);
        assert_eq!(result.content_issues, vec!["Loaded language"]);
    }

    #[tokio::test]
    async fn test_string_score_falls_back() {
        let (primary, _) = Scripted::ok("primary", json!({"credibilityScore": "9"}));
        let (secondary, secondary_calls) = Scripted::ok("secondary", json!({"credibilityScore": 6}));
        let checker = FactChecker::new(vec![Box::new(primary), Box::new(secondary)]);

        assert_eq!(checker.run(&input()).await.result.credibility_score, 6.0);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let (primary, primary_calls) = Scripted::failing("primary");
        let (secondary, secondary_calls) = Scripted::ok("secondary", json!({"credibilityScore": 8}));
        let checker = FactChecker::new(vec![Box::new(primary), Box::new(secondary)]);

        assert_eq!(checker.run(&input()).await.result.credibility_score, 8.0);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_deadline_abandons_slow_primary() {
        let (primary, _) = Scripted::ok("primary", json!({"credibilityScore": 9}));
        let primary = primary.slow(Duration::from_secs(10), Duration::from_millis(50));
        let (secondary, secondary_calls) = Scripted::ok("secondary", json!({"credibilityScore": 4}));
        let checker = FactChecker::new(vec![Box::new(primary), Box::new(secondary)]);

        let started = std::time::Instant::now();
        let result = checker.run(&input()).await.result;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(result.credibility_score, 4.0);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_total_failure_returns_default() {
        let (primary, _) = Scripted::failing("primary");
        let (secondary, _) = Scripted::failing("secondary");
        let checker = FactChecker::new(vec![Box::new(primary), Box::new(secondary)]);

        let result = checker.run(&input()).await.result;
        assert_eq!(result.credibility_score, 5.0);
        assert_eq!(result.misinformation_warning, None);
        assert!(result
            .suggested_sources
            .iter()
            .any(|s| s == "Associated Press (AP)" || s == "Reuters" || s == "BBC"));
        assert_eq!(
            result.source_verification[0],
            "Source: localnews.example - Verification pending"
        );
    }

    #[tokio::test]
    async fn test_no_providers_returns_default() {
        let checker = FactChecker::new(Vec::new());
        let mut text_only = input();
        text_only.url = "not a url".to_string();

        let result = checker.run(&text_only).await.result;
        assert_eq!(result.credibility_score, 5.0);
        assert_eq!(result.source_verification[0], "Source verification pending");
    }

    #[tokio::test]
    async fn test_outcome_names_answering_provider() {
        let (primary, _) = Scripted::failing("primary");
        let (secondary, _) = Scripted::ok("secondary", json!({"credibilityScore": 7}));
        let checker = FactChecker::new(vec![Box::new(primary), Box::new(secondary)]);

        let outcome = checker.run(&input()).await;
        assert_eq!(outcome.provider.as_deref(), Some("secondary"));
        assert!(!outcome.used_default());

        let (only, _) = Scripted::failing("primary");
        let checker = FactChecker::new(vec![Box::new(only)]);
        let outcome = checker.run(&input()).await;
        assert!(outcome.used_default());
        assert_eq!(outcome.result, default_result(&input().url));
    }

    #[tokio::test]
    async fn test_answer_equal_to_default_is_not_default() {
        let url = input().url;
        let neutral = serde_json::to_value(default_result(&url)).unwrap();
        let (primary, _) = Scripted::ok("primary", neutral);
        let checker = FactChecker::new(vec![Box::new(primary)]);

        let outcome = checker.run(&input()).await;
        assert_eq!(outcome.result, default_result(&url));
        assert!(!outcome.used_default());
    }

    /// Fails after a pause, flagging when it is done.
    struct SlowFailure {
        finished: Arc<AtomicBool>,
    }

    #[async_trait]
    impl AnalysisProvider for SlowFailure {
        fn name(&self) -> &str {
            "slow"
        }

        async fn analyze(&self, _input: &AnalysisInput) -> Result<Value, ProviderError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.finished.store(true, Ordering::SeqCst);
            Err(ProviderError::InvalidShape("nothing usable".to_string()))
        }
    }

    /// Records whether the earlier provider had finished when it started.
    struct Observer {
        finished: Arc<AtomicBool>,
        saw_finished: Arc<AtomicBool>,
    }

    #[async_trait]
    impl AnalysisProvider for Observer {
        fn name(&self) -> &str {
            "observer"
        }

        async fn analyze(&self, _input: &AnalysisInput) -> Result<Value, ProviderError> {
            self.saw_finished
                .store(self.finished.load(Ordering::SeqCst), Ordering::SeqCst);
            Ok(json!({"credibilityScore": 6}))
        }
    }

    #[tokio::test]
    async fn test_secondary_starts_after_primary_finishes() {
        let finished = Arc::new(AtomicBool::new(false));
        let saw_finished = Arc::new(AtomicBool::new(false));
        let primary: Box<dyn AnalysisProvider> = Box::new(SlowFailure {
            finished: finished.clone(),
        });
        let secondary: Box<dyn AnalysisProvider> = Box::new(Observer {
            finished: finished.clone(),
            saw_finished: saw_finished.clone(),
        });
        let checker = FactChecker::new(vec![primary, secondary]);

        let outcome = checker.run(&input()).await;
        assert_eq!(outcome.provider.as_deref(), Some("observer"));
        assert!(saw_finished.load(Ordering::SeqCst));
    }

    #[test]
    fn test_provider_names_in_order() {
        let (primary, _) = Scripted::failing("ai-agent");
        let (secondary, _) = Scripted::failing("gemini");
        let checker = FactChecker::new(vec![Box::new(primary), Box::new(secondary)]);
        assert_eq!(checker.provider_names(), vec!["ai-agent", "gemini"]);
    }

    #[test]
    fn test_run_blocking() {
        let (primary, _) = Scripted::ok("primary", json!({"credibilityScore": 3.5}));
        let checker = FactChecker::new(vec![Box::new(primary)]);
        let result = tokio_test::block_on(checker.run(&input())).result;
        assert_eq!(result.credibility_score, 3.5);
    }

    #[tokio::test]
    async fn test_summarizer_fallback_chain() {
        let summarizer = Summarizer::new(vec![
            Box::new(FixedSummary(Err(()))),
            Box::new(FixedSummary(Ok(vec![]))),
            Box::new(FixedSummary(Ok(vec!["Point".to_string()]))),
        ]);
        assert_eq!(summarizer.summarize(&input()).await, vec!["Point"]);

        let summarizer = Summarizer::new(vec![Box::new(FixedSummary(Err(())))]);
        let points = summarizer.summarize(&input()).await;
        assert_eq!(points, fallback_summary("transport"));
    }

    #[tokio::test]
    async fn test_summarizer_skips_providers_for_empty_text() {
        let summarizer = Summarizer::new(vec![Box::new(FixedSummary(Ok(vec![
            "unused".to_string(),
        ])))]);
        let empty = AnalysisInput::new(None, "", None, Some("sports".to_string()));
        assert_eq!(summarizer.summarize(&empty).await, fallback_summary("sports"));
    }

    #[tokio::test]
    async fn test_detector_normalizes_and_falls_back() {
        let (primary, _) = Scripted::failing("primary");
        let (secondary, _) = Scripted::ok("secondary", json!({"fakeNewsScore": 2.0}));
        let detector = Detector::new(vec![Box::new(primary), Box::new(secondary)]);

        let detection = detector.detect(&input()).await;
        assert_eq!(detection.fake_news_score, 1.0);
        assert!(detection.is_fake);

        let (only, _) = Scripted::failing("primary");
        let detector = Detector::new(vec![Box::new(only)]);
        let detection = detector.detect(&input()).await;
        assert_eq!(detection.fake_news_score, 0.5);
        assert!(!detection.is_fake);
        assert!(detection
            .explanation
            .starts_with("Error in fake news detection: cannot reach primary"));
    }
}
