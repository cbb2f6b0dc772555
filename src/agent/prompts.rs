//! Prompt templates for the generative-language fallback.

use crate::models::AnalysisInput;

/// Fact-checker rubric asking for the `FactCheckResult` JSON fields.
pub fn fact_check_prompt(input: &AnalysisInput) -> String {
    let url = if input.url.trim().is_empty() {
        "No URL provided"
    } else {
        input.url.as_str()
    };

    format!(
        r#"You are a professional fact-checker with expertise in source verification and misinformation detection.

Here's a news article to analyze:
Title: {title}
Content: {content}
Source URL: {url}

Please perform a comprehensive analysis of this article:

1. Credibility Assessment:
   - Evaluate the credibility on a scale of 1-10 (where 10 is highly credible)
   - Consider factors like source reputation, author expertise, citation quality, and evidence presented

2. Source Verification:
   - Identify which authoritative sources would typically cover this topic
   - Note if information contradicts established reliable sources
   - Check if claims align with consensus among reputable outlets

3. Content Analysis:
   - Look for logical fallacies or misleading framing
   - Check for emotional manipulation or sensationalism
   - Identify potential partisan bias or agenda-driven content
   - Note any information presented out of context

4. Reliability Points:
   - Provide 4-5 specific, detailed points about the reliability of this article
   - Include both strengths and potential weaknesses in reporting

5. Misinformation Warning:
   - If applicable, provide a specific warning about potential misinformation
   - Explain exactly what claims may be misleading and why
   - Suggest specific trusted sources where one could verify these claims

Format your response as a JSON object with these fields:
- credibilityScore (number between 1-10)
- reliabilityPoints (array of 4-5 detailed strings)
- misinformationWarning (detailed string or null if no issues detected)
- sourceVerification (array of 2-3 strings with source verification details)
- contentIssues (array of strings highlighting specific content issues, or empty array if none)
- suggestedSources (array of strings naming 2-3 reliable sources that could verify this topic)

Be objective, evidence-based and thorough in your analysis."#,
        title = input.title,
        content = input.text,
        url = url,
    )
}

/// Three-bullet summary request, answered as a JSON array of strings.
pub fn summary_prompt(input: &AnalysisInput) -> String {
    format!(
        r#"You are a specialized AI that creates brief, insightful summaries of news articles.

Here's an article about {topic}:
Title: {title}

Content: {content}

Generate exactly 3 bullet points that summarize the key insights from this article.
Each bullet point should be a single sentence and should highlight different aspects:
1. The main news or development
2. Important context or background information
3. The potential impact or significance

Format your response as a JSON array of strings, each string being one bullet point.
Do not include any other text, explanations or formatting."#,
        topic = input.topic,
        title = input.title,
        content = input.text,
    )
}

/// Fake-news likelihood request.
pub fn fake_news_prompt(input: &AnalysisInput) -> String {
    format!(
        r#"You are an expert in detecting fake news and misinformation.

Please analyze the following news article and determine if it contains fake news or misinformation:

Title: {title}
Content: {title} {content}

Provide a score from 0 to 1 indicating the likelihood that this is fake news (0 = definitely real, 1 = definitely fake).
Also provide a brief explanation of your reasoning.

Format your response as a JSON object with these fields:
- fakeNewsScore (number between 0 and 1)
- explanation (string)
- isFake (boolean, true if score > 0.5)"#,
        title = input.title,
        content = input.text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_check_prompt_embeds_article() {
        let input = AnalysisInput::new(
            Some("Storm hits coast".to_string()),
            "Winds reached 120 km/h.",
            None,
            None,
        );
        let prompt = fact_check_prompt(&input);
        assert!(prompt.contains("Title: Storm hits coast"));
        assert!(prompt.contains("Content: Winds reached 120 km/h."));
        assert!(prompt.contains("Source URL: No URL provided"));
        assert!(prompt.contains("credibilityScore (number between 1-10)"));
    }

    #[test]
    fn test_summary_prompt_mentions_topic() {
        let input = AnalysisInput::new(None, "Body", None, Some("science".to_string()));
        let prompt = summary_prompt(&input);
        assert!(prompt.contains("Here's an article about science:"));
        assert!(prompt.contains("Title: Untitled"));
    }

    #[test]
    fn test_fake_news_prompt_fields() {
        let input = AnalysisInput::new(Some("T".to_string()), "Body", None, None);
        let prompt = fake_news_prompt(&input);
        assert!(prompt.contains("Content: T Body"));
        assert!(prompt.contains("fakeNewsScore"));
    }
}
