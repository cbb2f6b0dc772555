//! Normalization of raw provider output.
//!
//! Providers return loosely-shaped JSON. These functions turn it into the
//! stable [`FactCheckResult`] / [`FakeNewsDetection`] shapes.

use crate::models::{FactCheckResult, FakeNewsDetection};
use serde_json::Value;

/// Lowest credibility score a result can carry.
pub const MIN_SCORE: f64 = 0.0;
/// Highest credibility score a result can carry.
pub const MAX_SCORE: f64 = 10.0;

/// Whether `raw` is an object carrying a numeric `credibilityScore`.
///
/// Only responses passing this check may be handed to [`normalize`].
pub fn has_numeric_score(raw: &Value) -> bool {
    raw.get("credibilityScore").is_some_and(Value::is_number)
}

/// Normalize a validated provider response.
///
/// The score is clamped into `[0, 10]`; list fields that are missing or not
/// arrays become empty. A non-numeric score (which validation should have
/// rejected) is read as the lower bound.
pub fn normalize(raw: &Value) -> FactCheckResult {
    let score = raw
        .get("credibilityScore")
        .and_then(Value::as_f64)
        .unwrap_or(MIN_SCORE);

    FactCheckResult {
        credibility_score: score.clamp(MIN_SCORE, MAX_SCORE),
        reliability_points: string_list(raw, "reliabilityPoints"),
        misinformation_warning: raw
            .get("misinformationWarning")
            .and_then(Value::as_str)
            .map(String::from),
        source_verification: string_list(raw, "sourceVerification"),
        content_issues: string_list(raw, "contentIssues"),
        suggested_sources: string_list(raw, "suggestedSources"),
    }
}

/// Normalize a fake-news detection response.
///
/// Missing score reads as 0.5; missing `isFake` is derived from the score.
pub fn normalize_fake_news(raw: &Value) -> FakeNewsDetection {
    let score = raw
        .get("fakeNewsScore")
        .and_then(Value::as_f64)
        .unwrap_or(0.5)
        .clamp(0.0, 1.0);

    FakeNewsDetection {
        fake_news_score: score,
        is_fake: raw
            .get("isFake")
            .and_then(Value::as_bool)
            .unwrap_or(score > 0.5),
        explanation: raw
            .get("explanation")
            .and_then(Value::as_str)
            .unwrap_or("No explanation provided")
            .to_string(),
    }
}

fn string_list(raw: &Value, field: &str) -> Vec<String> {
    match raw.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(normalize(&json!({"credibilityScore": 15})).credibility_score, 10.0);
        assert_eq!(normalize(&json!({"credibilityScore": -3})).credibility_score, 0.0);
        assert_eq!(normalize(&json!({"credibilityScore": 7})).credibility_score, 7.0);
        assert_eq!(normalize(&json!({"credibilityScore": 6.5})).credibility_score, 6.5);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let result = normalize(&json!({"credibilityScore": 4}));
        assert!(result.reliability_points.is_empty());
        assert!(result.source_verification.is_empty());
        assert!(result.content_issues.is_empty());
        assert!(result.suggested_sources.is_empty());
        assert_eq!(result.misinformation_warning, None);
    }

    #[test]
    fn test_non_array_lists_default_to_empty() {
        let result = normalize(&json!({
            "credibilityScore": 4,
            "reliabilityPoints": "not a list",
            "contentIssues": null,
            "suggestedSources": {"name": "Reuters"}
        }));
        assert!(result.reliability_points.is_empty());
        assert!(result.content_issues.is_empty());
        assert!(result.suggested_sources.is_empty());
    }

    #[test]
    fn test_warning_passes_through() {
        let result = normalize(&json!({
            "credibilityScore": 3,
            "misinformationWarning": "Claims about X are unsupported"
        }));
        assert_eq!(
            result.misinformation_warning.as_deref(),
            Some("Claims about X are unsupported")
        );

        let result = normalize(&json!({"credibilityScore": 3, "misinformationWarning": null}));
        assert_eq!(result.misinformation_warning, None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let result = normalize(&json!({
            "credibilityScore": 8,
            "reliabilityPoints": ["Cites primary sources", "Named author"],
            "misinformationWarning": "Headline overstates findings",
            "sourceVerification": ["Matches Reuters coverage"],
            "contentIssues": [],
            "suggestedSources": ["Reuters", "BBC"]
        }));
        let round_trip = normalize(&serde_json::to_value(&result).unwrap());
        assert_eq!(round_trip, result);
    }

    #[test]
    fn test_has_numeric_score() {
        assert!(has_numeric_score(&json!({"credibilityScore": 0})));
        assert!(has_numeric_score(&json!({"credibilityScore": 12.5})));
        assert!(!has_numeric_score(&json!({"credibilityScore": "7"})));
        assert!(!has_numeric_score(&json!({"reliabilityPoints": []})));
        assert!(!has_numeric_score(&json!(null)));
        assert!(!has_numeric_score(&json!([1, 2])));
    }

    #[test]
    fn test_fake_news_normalization() {
        let detection = normalize_fake_news(&json!({"fakeNewsScore": 1.7, "explanation": "x"}));
        assert_eq!(detection.fake_news_score, 1.0);
        assert!(detection.is_fake);

        let detection = normalize_fake_news(&json!({"fakeNewsScore": 0.2, "isFake": true}));
        assert_eq!(detection.fake_news_score, 0.2);
        assert!(detection.is_fake);
        assert_eq!(detection.explanation, "No explanation provided");

        let detection = normalize_fake_news(&json!({}));
        assert_eq!(detection.fake_news_score, 0.5);
        assert!(!detection.is_fake);
    }
}
