//! Best-effort extraction of structured data from free-form model text.

use serde_json::Value;

/// Number of bullet points in an article summary.
pub const SUMMARY_POINTS: usize = 3;

/// Extract the JSON object embedded in a model completion.
///
/// The candidate span runs from the leftmost `{` to the rightmost `}` in the
/// whole text, so sibling objects are swallowed into one span and will fail
/// to parse. Returns `Ok(None)` when there is no such span or the span is
/// not an object, and `Err` when the span is not valid JSON.
pub fn extract_json_object(text: &str) -> Result<Option<Value>, serde_json::Error> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Ok(None);
    };
    if end < start {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(&text[start..=end])?;
    Ok(value.is_object().then_some(value))
}

/// Turn a summary completion into exactly [`SUMMARY_POINTS`] bullet points.
///
/// Accepts a JSON array of strings, falls back to quoted fragments when the
/// array is malformed, and otherwise to non-trivial lines of text. Missing
/// points are padded with a generic line about `topic`.
pub fn parse_summary_points(text: &str, topic: &str) -> Vec<String> {
    let trimmed = text.trim();

    let mut points = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        match serde_json::from_str::<Vec<Value>>(trimmed) {
            Ok(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
            Err(_) => {
                let quoted = quoted_fragments(text);
                if quoted.is_empty() {
                    summary_lines(text)
                } else {
                    quoted
                }
            }
        }
    } else {
        summary_lines(text)
    };

    points.truncate(SUMMARY_POINTS);
    while points.len() < SUMMARY_POINTS {
        points.push(format!("Key insight about {} topic", topic));
    }
    points
}

/// Fragments enclosed in single or double quotes, shortest match first.
/// A fragment never spans a line break.
fn quoted_fragments(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let is_quote = |c: char| c == '"' || c == '\'';

    let mut fragments = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !is_quote(chars[i]) {
            i += 1;
            continue;
        }

        // At least one character between the quotes.
        let mut j = i + 2;
        let mut closed = None;
        if i + 1 < chars.len() && chars[i + 1] != '\n' {
            while j < chars.len() && chars[j] != '\n' {
                if is_quote(chars[j]) {
                    closed = Some(j);
                    break;
                }
                j += 1;
            }
        }

        match closed {
            Some(end) => {
                fragments.push(chars[i + 1..end].iter().collect());
                i = end + 1;
            }
            None => i += 1,
        }
    }
    fragments
}

/// Lines stripped of list markers and quotes, keeping those longer than
/// ten characters.
fn summary_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim_start_matches(|c: char| {
                c == '"' || c == '\'' || c == '.' || c == '-' || c.is_ascii_digit() || c.is_whitespace()
            })
            .trim_end_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace())
            .to_string()
        })
        .filter(|line| line.chars().count() > 10)
        .collect()
}
