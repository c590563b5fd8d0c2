use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::pipeline::run_analysis;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::interviews::status::{advance, fetch_owned};
use crate::models::interview::InterviewStatus;
use crate::state::AppState;
use crate::transcription::decode::{decode_chunked, CHUNK_SIZE};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeAudioRequest {
    pub interview_id: Option<String>,
    pub audio_data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeAudioResponse {
    pub success: bool,
    pub transcription: String,
    pub message: String,
}

/// POST /transcribe-audio
///
/// Decodes the base64 audio payload, submits it to speech-to-text, then runs
/// the analysis pipeline on the resulting transcript under the same caller.
///
/// An upstream failure or empty transcript surfaces directly to the caller
/// with the interview left at `processing` — no `failed` transition, no
/// retry. Re-initiating the upload is the only recovery path.
pub async fn handle_transcribe_audio(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<TranscribeAudioRequest>,
) -> Result<Json<TranscribeAudioResponse>, AppError> {
    let interview_id = request
        .interview_id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("interviewId is required".to_string()))?;
    let interview_id = Uuid::parse_str(interview_id)
        .map_err(|_| AppError::BadRequest("interviewId must be a valid UUID".to_string()))?;

    let audio_data = request
        .audio_data
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("audioData is required".to_string()))?;

    let interview = fetch_owned(&state.db, interview_id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundOrForbidden("Interview not found".to_string()))?;

    advance(&state.db, interview_id, auth.user_id, InterviewStatus::Processing).await?;

    let audio = decode_chunked(audio_data, CHUNK_SIZE)
        .map_err(|e| AppError::BadRequest(format!("audioData is not valid base64: {e}")))?;
    info!(
        "Decoded {} bytes of audio for interview {interview_id}",
        audio.len()
    );

    let transcript = state.ai.transcribe(audio, &interview.file_name).await?;

    if transcript.trim().is_empty() {
        return Err(AppError::EmptyTranscript);
    }

    run_analysis(
        &state.db,
        &state.ai,
        auth.user_id,
        interview_id,
        transcript.trim(),
        None,
    )
    .await?;

    Ok(Json(TranscribeAudioResponse {
        success: true,
        transcription: transcript.trim().to_string(),
        message: "Audio transcribed and analyzed successfully".to_string(),
    }))
}
