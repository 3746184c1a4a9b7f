//! Prompt templates for meeting summary generation
//!
//! Provides the system and user prompts sent to the LLM and the helper that
//! fills the transcript placeholder.

/// Prompt templates used by the summary generator
pub struct PromptTemplates;

impl PromptTemplates {
    /// System-role instruction sent with every request
    pub fn system() -> &'static str {
        "You are an expert meeting assistant that writes executive summaries and extracts \
action items. Always respond with a single valid JSON object and nothing else: no \
Markdown, no code fences, no commentary."
    }

    /// Prompt asking for the summary and the action items as one JSON object
    pub fn meeting_summary() -> &'static str {
        r#"Analyze the following meeting transcript.

Meeting Transcript:
{transcript}

Produce:
1. An executive summary of 2-3 paragraphs covering the main topics, key decisions and important outcomes.
2. A list of action items. For each action item provide:
   - "item": the specific task
   - "owner": the person responsible (empty string if nobody was named)
   - "timeline": the deadline or timeframe, only if one was mentioned

Format the response strictly as a JSON object with exactly these keys:
{
  "summary": "executive summary text, paragraphs separated by newlines",
  "actionItems": [
    {"item": "task description", "owner": "person responsible", "timeline": "deadline"}
  ]
}

If there are no action items, return an empty "actionItems" array."#
    }

    /// Fills the summary prompt with a transcript
    pub fn render_summary(transcript: &str) -> String {
        Self::meeting_summary().replace("{transcript}", transcript)
    }
}
