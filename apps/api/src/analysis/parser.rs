use serde_json::{json, Value};

use crate::ai_client::strip_json_fences;

/// Placeholder stored in the four non-summary fields when the model's output
/// cannot be parsed as JSON.
pub const FALLBACK_PLACEHOLDER: &str = "Please review the full analysis";
/// How much of the raw model output survives into `jobSummary` on fallback.
pub const FALLBACK_SUMMARY_CHARS: usize = 500;

/// Parses the model's text output into the summary content object.
///
/// Invalid JSON does not fail the request: the degraded fallback keeps the
/// first 500 characters of the raw text as `jobSummary` and fills the
/// remaining four fields with a fixed placeholder. Returns whether the
/// fallback was taken.
pub fn parse_summary_content(raw: &str) -> (Value, bool) {
    let stripped = strip_json_fences(raw);
    match serde_json::from_str::<Value>(stripped) {
        Ok(value) if value.is_object() => (value, false),
        _ => (fallback_content(raw), true),
    }
}

fn fallback_content(raw: &str) -> Value {
    json!({
        "jobSummary": truncate_chars(raw, FALLBACK_SUMMARY_CHARS),
        "mustHaves": FALLBACK_PLACEHOLDER,
        "challenges": FALLBACK_PLACEHOLDER,
        "jobDescription": FALLBACK_PLACEHOLDER,
        "recapEmail": FALLBACK_PLACEHOLDER,
    })
}

/// Truncates on character boundaries, never inside a multi-byte sequence.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_json_passes_through() {
        let raw = r#"{"jobSummary":"s","mustHaves":["a"],"challenges":"c","jobDescription":"d","recapEmail":"e"}"#;
        let (content, fell_back) = parse_summary_content(raw);
        assert!(!fell_back);
        assert_eq!(content["jobSummary"], "s");
        assert_eq!(content["mustHaves"][0], "a");
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let raw = "```json\n{\"jobSummary\":\"s\"}\n```";
        let (content, fell_back) = parse_summary_content(raw);
        assert!(!fell_back);
        assert_eq!(content["jobSummary"], "s");
    }

    #[test]
    fn invalid_json_takes_fallback_shape() {
        let raw = "The candidate discussed a senior engineering role at length.";
        let (content, fell_back) = parse_summary_content(raw);
        assert!(fell_back);
        assert_eq!(content["jobSummary"], raw);
        for field in ["mustHaves", "challenges", "jobDescription", "recapEmail"] {
            assert_eq!(content[field], FALLBACK_PLACEHOLDER);
        }
        assert_eq!(content.as_object().unwrap().len(), 5);
    }

    #[test]
    fn fallback_carries_exactly_the_five_section_keys() {
        let (content, _) = parse_summary_content("not json");
        let mut keys: Vec<_> = content.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "challenges",
                "jobDescription",
                "jobSummary",
                "mustHaves",
                "recapEmail"
            ]
        );
    }

    #[test]
    fn non_object_json_also_falls_back() {
        let (_, fell_back) = parse_summary_content("[1, 2, 3]");
        assert!(fell_back);
        let (_, fell_back) = parse_summary_content("\"just a string\"");
        assert!(fell_back);
    }

    #[test]
    fn fallback_summary_is_capped_at_500_chars() {
        let raw = "x".repeat(1200);
        let (content, fell_back) = parse_summary_content(&raw);
        assert!(fell_back);
        assert_eq!(
            content["jobSummary"].as_str().unwrap().chars().count(),
            FALLBACK_SUMMARY_CHARS
        );
    }

    #[test]
    fn fallback_truncation_respects_multibyte_boundaries() {
        let raw = "é".repeat(600);
        let (content, _) = parse_summary_content(&raw);
        let summary = content["jobSummary"].as_str().unwrap().to_string();
        assert_eq!(summary.chars().count(), FALLBACK_SUMMARY_CHARS);
        assert!(raw.starts_with(&summary));
    }
}
