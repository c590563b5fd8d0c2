use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::audit;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::interviews::status::fetch_owned;
use crate::interviews::storage::{object_key, upload_object};
use crate::interviews::validation::validate_new_interview;
use crate::models::interview::{InterviewRow, InterviewStatus};
use crate::models::summary::InterviewSummaryRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterviewRequest {
    pub candidate_name: String,
    pub position_title: String,
    pub file_name: String,
    pub file_size: Option<i64>,
    pub interview_date: Option<NaiveDate>,
    #[serde(default)]
    pub consent_obtained: bool,
    pub retention_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct InterviewDetailResponse {
    pub interview: InterviewRow,
    /// Latest summary by `created_at`. The schema permits several rows per
    /// interview; only the newest is surfaced here.
    pub summary: Option<InterviewSummaryRow>,
}

/// POST /api/v1/interviews
///
/// Creates the interview record in `uploading` state. File metadata is
/// validated against the allow-list and size ceiling before any upload
/// happens; audio files additionally require the consent flag.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<InterviewRow>), AppError> {
    validate_new_interview(
        &request.candidate_name,
        &request.position_title,
        &request.file_name,
        request.file_size,
        request.consent_obtained,
        state.config.max_upload_bytes,
    )
    .map_err(AppError::BadRequest)?;

    let interview = sqlx::query_as::<_, InterviewRow>(
        r#"
        INSERT INTO interviews
            (user_id, file_name, file_size, candidate_name, position_title,
             interview_date, status, consent_obtained, retention_until)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(auth.user_id)
    .bind(request.file_name.trim())
    .bind(request.file_size)
    .bind(request.candidate_name.trim())
    .bind(request.position_title.trim())
    .bind(request.interview_date)
    .bind(InterviewStatus::Uploading.as_str())
    .bind(request.consent_obtained)
    .bind(request.retention_until)
    .fetch_one(&state.db)
    .await?;

    audit::record(
        &state.db,
        auth.user_id,
        "interview.created",
        "interview",
        interview.id,
        json!({ "file_name": interview.file_name }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(interview)))
}

/// POST /api/v1/interviews/:id/upload
///
/// Accepts the raw file as a multipart part named `file` and stores it in
/// the interview bucket under `{ownerId}/{interviewId}-{filename}`. Only
/// valid while the interview is still in `uploading`.
pub async fn handle_upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(interview_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<InterviewRow>, AppError> {
    let interview = fetch_owned(&state.db, interview_id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundOrForbidden("Interview not found".to_string()))?;

    if interview.status() != Some(InterviewStatus::Uploading) {
        return Err(AppError::BadRequest(format!(
            "Interview is already {}, file cannot be replaced",
            interview.status
        )));
    }

    let mut file: Option<(String, bytes::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        file = Some((content_type, bytes));
        break;
    }

    let (content_type, bytes) =
        file.ok_or_else(|| AppError::BadRequest("Multipart field 'file' is required".to_string()))?;

    if bytes.len() as i64 > state.config.max_upload_bytes {
        return Err(AppError::BadRequest(format!(
            "File exceeds the {} byte upload limit",
            state.config.max_upload_bytes
        )));
    }

    let key = object_key(auth.user_id, interview_id, &interview.file_name);
    let file_size = bytes.len() as i64;
    let file_url = upload_object(
        &state.s3,
        &state.config.s3_endpoint,
        &state.config.s3_bucket,
        &key,
        bytes,
        &content_type,
    )
    .await?;

    let interview = sqlx::query_as::<_, InterviewRow>(
        "UPDATE interviews SET file_url = $3, file_size = $4, updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(interview_id)
    .bind(auth.user_id)
    .bind(&file_url)
    .bind(file_size)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(interview))
}

/// GET /api/v1/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    let interviews = sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(auth.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(interviews))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<InterviewDetailResponse>, AppError> {
    let interview = fetch_owned(&state.db, interview_id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundOrForbidden("Interview not found".to_string()))?;

    let summary = latest_summary(&state.db, interview_id).await?;

    Ok(Json(InterviewDetailResponse { interview, summary }))
}

/// DELETE /api/v1/interviews/:id
///
/// Deletes the interview (summaries and share links cascade) and makes a
/// best-effort attempt to remove the stored file.
pub async fn handle_delete_interview(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(interview_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let interview = fetch_owned(&state.db, interview_id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundOrForbidden("Interview not found".to_string()))?;

    sqlx::query("DELETE FROM interviews WHERE id = $1 AND user_id = $2")
        .bind(interview_id)
        .bind(auth.user_id)
        .execute(&state.db)
        .await?;

    if interview.file_url.is_some() {
        let key = object_key(auth.user_id, interview_id, &interview.file_name);
        if let Err(e) = state
            .s3
            .delete_object()
            .bucket(&state.config.s3_bucket)
            .key(&key)
            .send()
            .await
        {
            warn!("Failed to delete stored file {key}: {e}");
        }
    }

    audit::record(
        &state.db,
        auth.user_id,
        "interview.deleted",
        "interview",
        interview_id,
        json!({}),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// Latest summary for an interview, by `created_at`.
pub async fn latest_summary(
    pool: &sqlx::PgPool,
    interview_id: Uuid,
) -> Result<Option<InterviewSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewSummaryRow>(
        "SELECT * FROM interview_summaries WHERE interview_id = $1
         ORDER BY created_at DESC LIMIT 1",
    )
    .bind(interview_id)
    .fetch_optional(pool)
    .await
}
