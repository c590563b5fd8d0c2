use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::analysis::pipeline::run_analysis;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInterviewRequest {
    pub interview_id: Option<String>,
    pub transcript: Option<String>,
    pub template_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInterviewResponse {
    pub success: bool,
    pub summary: Value,
    pub summary_id: Uuid,
}

/// POST /process-interview
///
/// Runs the transcript through the chat model and stores the structured
/// summary. An unusable `templateId` (absent, foreign-private, or not a
/// UUID) falls back to the default prompt rather than erroring.
pub async fn handle_process_interview(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ProcessInterviewRequest>,
) -> Result<Json<ProcessInterviewResponse>, AppError> {
    let interview_id = request
        .interview_id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("interviewId is required".to_string()))?;
    let interview_id = Uuid::parse_str(interview_id)
        .map_err(|_| AppError::BadRequest("interviewId must be a valid UUID".to_string()))?;

    let transcript = request
        .transcript
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("transcript is required".to_string()))?;

    let template_id = request.template_id.as_deref().and_then(|raw| {
        let parsed = Uuid::parse_str(raw).ok();
        if parsed.is_none() {
            debug!("Ignoring malformed templateId {raw:?}");
        }
        parsed
    });

    let outcome = run_analysis(
        &state.db,
        &state.ai,
        auth.user_id,
        interview_id,
        transcript,
        template_id,
    )
    .await?;

    Ok(Json(ProcessInterviewResponse {
        success: true,
        summary: outcome.summary,
        summary_id: outcome.summary_id,
    }))
}
