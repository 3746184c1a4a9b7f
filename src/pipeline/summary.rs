//! Summary generator
//!
//! Builds the summary prompt, calls the LLM port and validates the JSON reply into
//! a [`SummaryResult`].

use crate::domain::models::SummaryResult;
use crate::domain::prompts::PromptTemplates;
use crate::error::{AppError, Result};
use crate::ports::llm::{CompletionRequest, LlmConfig, LlmServicePort};
use std::sync::Arc;

pub struct SummaryGenerator {
    llm: Arc<dyn LlmServicePort>,
    config: LlmConfig,
}

impl SummaryGenerator {
    pub fn new(llm: Arc<dyn LlmServicePort>, config: LlmConfig) -> Self {
        Self { llm, config }
    }

    pub fn provider_name(&self) -> &str {
        self.llm.provider_name()
    }

    fn build_request(&self, transcript: &str) -> CompletionRequest {
        CompletionRequest {
            system: Some(PromptTemplates::system().to_string()),
            prompt: PromptTemplates::render_summary(transcript),
            json_mode: self.llm.supports_json_mode(),
        }
    }

    /// Summarize a transcript
    ///
    /// Upstream failures are `SummaryGeneration`; replies that are not a valid
    /// summary object are `SummaryParse`.
    pub async fn generate(&self, transcript: &str) -> Result<SummaryResult> {
        let request = self.build_request(transcript);

        log::info!(
            "Generating summary with {} for a {} character transcript",
            self.llm.provider_name(),
            transcript.len()
        );

        let raw = self.llm.complete(&request, &self.config).await?;
        let result = parse_summary(&raw)?;

        log::info!(
            "Summary generated with {} action item(s)",
            result.action_items.len()
        );
        Ok(result)
    }
}

/// Strips a surrounding Markdown code fence, if any
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening fence line
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}

/// Parse and validate a raw model reply
pub fn parse_summary(raw: &str) -> Result<SummaryResult> {
    let payload = strip_code_fence(raw);

    let value: serde_json::Value = serde_json::from_str(payload).map_err(|e| {
        log::warn!("Model reply is not valid JSON: {}", e);
        log::debug!("Raw model reply: {}", raw);
        AppError::SummaryParse(format!("Response is not valid JSON: {}", e))
    })?;

    if !value.is_object() {
        return Err(AppError::SummaryParse(
            "Response is not a JSON object".to_string(),
        ));
    }

    let result: SummaryResult = serde_json::from_value(value)
        .map_err(|e| AppError::SummaryParse(format!("Unexpected response shape: {}", e)))?;

    if result.summary.trim().is_empty() {
        return Err(AppError::SummaryParse(
            "Response has an empty summary".to_string(),
        ));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ActionItem;
    use crate::ports::mocks::MockLlm;

    const REPLY: &str = r#"{
        "summary": "The team agreed on the launch plan.\nMarketing starts next week.",
        "actionItems": [
            {"item": "Prepare launch email", "owner": "Alice", "timeline": "Monday"},
            {"item": "Update pricing page", "owner": "Bob"}
        ]
    }"#;

    fn generator(llm: &MockLlm) -> SummaryGenerator {
        SummaryGenerator::new(Arc::new(llm.clone()), LlmConfig::default())
    }

    #[tokio::test]
    async fn test_generate_returns_validated_result() {
        let llm = MockLlm::replying(REPLY);
        let result = generator(&llm).generate("Alice: let's launch").await.unwrap();

        assert!(result.summary.starts_with("The team agreed"));
        assert_eq!(
            result.action_items,
            vec![
                ActionItem::new("Prepare launch email", "Alice", Some("Monday".to_string())),
                ActionItem::new("Update pricing page", "Bob", None),
            ]
        );
    }

    #[tokio::test]
    async fn test_request_carries_prompt_and_system_message() {
        let llm = MockLlm::replying(REPLY);
        generator(&llm).generate("Alice: let's launch").await.unwrap();

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("Alice: let's launch"));
        assert_eq!(requests[0].system.as_deref(), Some(PromptTemplates::system()));
        assert!(requests[0].json_mode);
    }

    #[tokio::test]
    async fn test_json_mode_follows_provider_support() {
        let llm = MockLlm::replying(REPLY).without_json_mode();
        generator(&llm).generate("transcript").await.unwrap();

        let requests = llm.requests();
        assert!(!requests[0].json_mode);
        assert!(requests[0].system.is_some());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_generation_error() {
        let llm = MockLlm::failing("401 invalid api key");
        let err = generator(&llm).generate("transcript").await.unwrap_err();

        assert!(matches!(err, AppError::SummaryGeneration(ref msg) if msg.contains("invalid api key")));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_parse_error() {
        let llm = MockLlm::replying("Sure! Here is your summary: the meeting went well.");
        let err = generator(&llm).generate("transcript").await.unwrap_err();
        assert!(matches!(err, AppError::SummaryParse(_)));
    }

    #[test]
    fn test_missing_action_items_become_empty() {
        let result = parse_summary(r#"{"summary": "Short sync, nothing to do."}"#).unwrap();
        assert!(result.action_items.is_empty());
    }

    #[test]
    fn test_schema_violations_are_parse_errors() {
        for reply in [
            r#"{"actionItems": []}"#,
            r#"{"summary": "   ", "actionItems": []}"#,
            r#"{"summary": "ok", "actionItems": "none"}"#,
            r#"{"summary": 42}"#,
            r#"["summary"]"#,
            "",
        ] {
            assert!(
                matches!(parse_summary(reply), Err(AppError::SummaryParse(_))),
                "reply {:?} should be rejected",
                reply
            );
        }
    }

    #[test]
    fn test_code_fenced_reply_is_accepted() {
        let fenced = format!("```json\n{}\n```", REPLY);
        let result = parse_summary(&fenced).unwrap();
        assert_eq!(result.action_items.len(), 2);

        let bare_fence = "```\n{\"summary\": \"ok\"}\n```";
        assert_eq!(parse_summary(bare_fence).unwrap().summary, "ok");

        let one_line = "```{\"summary\": \"ok\"}```";
        assert_eq!(parse_summary(one_line).unwrap().summary, "ok");
    }

    #[test]
    fn test_action_items_with_null_owner() {
        let result = parse_summary(
            r#"{"summary": "ok", "actionItems": [{"item": "Follow up", "owner": null, "timeline": null}]}"#,
        )
        .unwrap();
        assert_eq!(result.action_items[0], ActionItem::new("Follow up", "", None));
    }
}
