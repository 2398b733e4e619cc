//! Prompt construction and response-text handling for knowledge-graph generation.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use profilegraph_shared::{Attribute, ProfileInput};

/// Hard ceiling on source text sent to the model, in characters.
pub const MAX_SOURCE_CHARS: usize = 16_000;

pub const SYSTEM_PROMPT: &str = "You are a professional knowledge graph generator. You need to \
    analyze information about a professional profile and generate a structured knowledge graph \
    in JSON format.";

/// Join source texts with single spaces and keep the first [`MAX_SOURCE_CHARS`] characters.
pub fn combine_sources(texts: &[String]) -> String {
    texts.join(" ").chars().take(MAX_SOURCE_CHARS).collect()
}

/// Build the user message for `profile` with already-combined source text.
pub fn user_prompt(profile: &ProfileInput, combined_text: &str) -> String {
    let mut prompt = String::new();

    let _ = writeln!(prompt, "Generate a structured knowledge graph for the following professional profile:");
    prompt.push('\n');
    prompt.push_str("Professional Profile:\n");
    let _ = writeln!(prompt, "- Title: {}", profile.title);
    let _ = writeln!(prompt, "- Company: {}", profile.company);
    let _ = writeln!(prompt, "- Location: {}", profile.location);
    if let Some(age) = profile.age {
        let _ = writeln!(prompt, "- Age: {age}");
    }
    if !profile.additional_context.is_empty() {
        let _ = writeln!(
            prompt,
            "- Additional Context: {}",
            profile.additional_context.join(", ")
        );
    }

    prompt.push('\n');
    prompt.push_str("I have scraped data from the web about this profile:\n");
    prompt.push_str(combined_text);
    prompt.push_str("\n\n");

    prompt.push_str(SECTIONS_TEMPLATE);
    for attr in Attribute::ALL {
        let _ = writeln!(prompt, "   - {}", attr.label());
    }
    prompt.push_str(CLOSING_TEMPLATE);

    prompt
}

const SECTIONS_TEMPLATE: &str = "\
Create a professional knowledge graph JSON with the following structure:

1. Tools Used:
   - High Probability (90%): List 3-5 tools that people in this role are very likely to use
   - Medium Probability (70%): List 3-5 tools that people in this role might use
   - Low Probability (50%): List 3-5 tools that people in this role occasionally use

2. Biggest Pain Points:
   - High Probability (90%): List 2-4 pain points that people in this role are very likely to face
   - Medium Probability (70%): List 2-4 pain points that people in this role might face
   - Low Probability (50%): List 2-4 pain points that people in this role occasionally face

3. Attribute Ranges (rate each as Low, Medium, or High):
";

const CLOSING_TEMPLATE: &str = "
4. Education Level & Learning Approach:
   - Provide a paragraph describing typical education requirements and learning approaches for this role

ONLY respond with the JSON object directly. Do not include any explanations, markdown formatting, or additional text.
";

/// The span from the first `{` to the last `}`, or the whole text if there is none.
pub fn json_candidate(text: &str) -> &str {
    static OBJECT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));
    OBJECT_RE.find(text).map_or(text, |m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ProfileInput {
        ProfileInput {
            title: "Staff Developer".into(),
            location: "Lisbon".into(),
            company: "Globex".into(),
            ..Default::default()
        }
    }

    #[test]
    fn prompt_includes_profile_and_sections() {
        let prompt = user_prompt(&profile(), "forum posts about CI pipelines");
        assert!(prompt.contains("- Title: Staff Developer"));
        assert!(prompt.contains("- Company: Globex"));
        assert!(prompt.contains("- Location: Lisbon"));
        assert!(prompt.contains("forum posts about CI pipelines"));
        assert!(prompt.contains("List 3-5 tools"));
        assert!(prompt.contains("List 2-4 pain points"));
        assert!(prompt.contains("   - Cognitive Control (Inhibition)\n"));
        assert!(prompt.contains("4. Education Level & Learning Approach:"));
        assert!(prompt.trim_end().ends_with("or additional text."));
    }

    #[test]
    fn optional_lines_omitted_when_absent() {
        let prompt = user_prompt(&profile(), "");
        assert!(!prompt.contains("- Age:"));
        assert!(!prompt.contains("- Additional Context:"));
    }

    #[test]
    fn optional_lines_present_when_given() {
        let mut p = profile();
        p.age = Some(42);
        p.additional_context = vec!["remote".into(), "healthcare".into()];
        let prompt = user_prompt(&p, "");
        assert!(prompt.contains("- Age: 42\n"));
        assert!(prompt.contains("- Additional Context: remote, healthcare\n"));
    }

    #[test]
    fn sources_joined_with_spaces() {
        let texts = vec!["alpha".to_string(), String::new(), "gamma".to_string()];
        assert_eq!(combine_sources(&texts), "alpha  gamma");
    }

    #[test]
    fn sources_truncated_at_char_limit() {
        let texts = vec!["é".repeat(10_000), "x".repeat(10_000)];
        let combined = combine_sources(&texts);
        assert_eq!(combined.chars().count(), MAX_SOURCE_CHARS);
        assert!(combined.starts_with('é'));
        assert!(combined.ends_with('x'));
    }

    #[test]
    fn candidate_strips_commentary() {
        let text = "Sure! Here it is:\n```json\n{\"a\": {\"b\": 1}}\n```\nHope that helps.";
        assert_eq!(json_candidate(text), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn candidate_falls_back_to_raw_text() {
        assert_eq!(json_candidate("no json here"), "no json here");
        assert_eq!(json_candidate(""), "");
    }
}
