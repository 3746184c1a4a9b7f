//! `POST /generate-summary`

use crate::domain::models::ActionItem;
use crate::error::{AppError, Result};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateSummaryRequest {
    #[serde(default)]
    pub transcript: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSummaryResponse {
    pub success: bool,
    pub summary: String,
    pub action_items: Vec<ActionItem>,
}

/// Summarize a transcript into a summary and action items
pub async fn generate_summary(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerateSummaryRequest>, JsonRejection>,
) -> Result<Json<GenerateSummaryResponse>> {
    let Json(request) = payload?;

    if request.transcript.trim().is_empty() {
        return Err(AppError::InvalidInput("transcript is required".to_string()));
    }

    let generator = state.summarizer.as_ref().ok_or_else(|| {
        AppError::Config(
            "Summary generation is not configured; set the API key for the selected LLM provider"
                .to_string(),
        )
    })?;

    let result = generator.generate(&request.transcript).await?;

    Ok(Json(GenerateSummaryResponse {
        success: true,
        summary: result.summary,
        action_items: result.action_items,
    }))
}
