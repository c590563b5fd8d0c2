// Analysis prompt templates. All prompts for the analysis module live here.

use serde_json::Value;

/// Default system prompt: a fixed five-section analysis returned as JSON with
/// exactly the keys the client renders.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an expert recruitment analyst. Analyze the interview transcript and produce a structured report.
Respond with valid JSON only — no markdown fences, no explanations — using exactly these keys:
{
  \"jobSummary\": \"2-3 paragraph summary of the role discussed in the interview\",
  \"mustHaves\": [\"list of must-have skills and qualifications mentioned\"],
  \"challenges\": \"key challenges of the role and team, as described\",
  \"jobDescription\": \"a complete job description draft based on the conversation\",
  \"recapEmail\": \"a professional recap email the recruiter can send to the hiring manager\"
}
Base every section strictly on what was said in the transcript. Do not invent facts.";

/// Builds the system prompt for an analysis call. A resolved template
/// overrides the default five-section structure with its own section shape.
pub fn build_system_prompt(template_content: Option<&Value>) -> String {
    match template_content {
        Some(content) => format!(
            "You are an expert recruitment analyst. Analyze the interview transcript and produce \
             a structured report following this template structure exactly. Respond with valid \
             JSON only — no markdown fences, no explanations.\n\nTEMPLATE:\n{}",
            serde_json::to_string_pretty(content).unwrap_or_else(|_| content.to_string())
        ),
        None => DEFAULT_SYSTEM_PROMPT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_prompt_names_all_five_keys() {
        for key in [
            "jobSummary",
            "mustHaves",
            "challenges",
            "jobDescription",
            "recapEmail",
        ] {
            assert!(DEFAULT_SYSTEM_PROMPT.contains(key), "missing {key}");
        }
    }

    #[test]
    fn no_template_falls_back_to_default() {
        assert_eq!(build_system_prompt(None), DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn template_prompt_embeds_template_content() {
        let template = json!({"sections": [{"key": "techDepth", "label": "Technical depth"}]});
        let prompt = build_system_prompt(Some(&template));
        assert!(prompt.contains("techDepth"));
        assert!(prompt.contains("template structure"));
    }
}
