use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::audit;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::interviews::handlers::latest_summary;
use crate::interviews::status::fetch_owned;
use crate::models::interview::InterviewRow;
use crate::models::share::{ShareLinkRow, PERMISSION_VIEW_SUMMARY, PERMISSION_VIEW_TRANSCRIPT};
use crate::models::user::UserProfileRow;
use crate::sharing::tokens::generate_access_token;
use crate::state::AppState;

/// Default share lifetime: one week.
const DEFAULT_EXPIRY_HOURS: i64 = 168;
const MAX_EXPIRY_HOURS: i64 = 24 * 90;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    pub expires_in_hours: Option<i64>,
    pub permissions: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedInterviewResponse {
    pub candidate_name: String,
    pub position_title: String,
    pub interview_date: Option<NaiveDate>,
    pub status: String,
    pub shared_by: Option<String>,
    pub summary_content: Option<Value>,
    pub ai_model_used: Option<String>,
    pub transcript_text: Option<String>,
}

/// POST /api/v1/interviews/:id/share
///
/// Creates a time-bounded share link for an interview the caller owns.
pub async fn handle_create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(interview_id): Path<Uuid>,
    Json(request): Json<CreateShareRequest>,
) -> Result<(StatusCode, Json<ShareLinkRow>), AppError> {
    fetch_owned(&state.db, interview_id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFoundOrForbidden("Interview not found".to_string()))?;

    let hours = request.expires_in_hours.unwrap_or(DEFAULT_EXPIRY_HOURS);
    if !(1..=MAX_EXPIRY_HOURS).contains(&hours) {
        return Err(AppError::BadRequest(format!(
            "expiresInHours must be between 1 and {MAX_EXPIRY_HOURS}"
        )));
    }

    let permissions = request
        .permissions
        .unwrap_or_else(|| vec![PERMISSION_VIEW_SUMMARY.to_string()]);
    for p in &permissions {
        if p != PERMISSION_VIEW_SUMMARY && p != PERMISSION_VIEW_TRANSCRIPT {
            return Err(AppError::BadRequest(format!("Unknown permission: {p}")));
        }
    }

    let link = sqlx::query_as::<_, ShareLinkRow>(
        r#"
        INSERT INTO share_links (interview_id, access_token, expires_at, permissions)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(interview_id)
    .bind(generate_access_token())
    .bind(Utc::now() + Duration::hours(hours))
    .bind(&permissions)
    .fetch_one(&state.db)
    .await?;

    audit::record(
        &state.db,
        auth.user_id,
        "share.created",
        "share_link",
        link.id,
        json!({ "interview_id": interview_id, "permissions": permissions }),
    )
    .await;

    Ok((StatusCode::CREATED, Json(link)))
}

/// DELETE /api/v1/shares/:id
///
/// Revokes a share link. Scoped through the parent interview's owner.
pub async fn handle_revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(share_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query(
        "DELETE FROM share_links
         WHERE id = $1
           AND interview_id IN (SELECT id FROM interviews WHERE user_id = $2)",
    )
    .bind(share_id)
    .bind(auth.user_id)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFoundOrForbidden(
            "Share link not found".to_string(),
        ));
    }

    audit::record(
        &state.db,
        auth.user_id,
        "share.revoked",
        "share_link",
        share_id,
        json!({}),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/shared/:token
///
/// Unauthenticated read through a share token. Expiry is evaluated here, at
/// read time; expired rows stay in the table and simply stop resolving.
pub async fn handle_read_shared(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<SharedInterviewResponse>, AppError> {
    let link: Option<ShareLinkRow> =
        sqlx::query_as("SELECT * FROM share_links WHERE access_token = $1")
            .bind(&token)
            .fetch_optional(&state.db)
            .await?;

    let link = link
        .filter(|l| !l.is_expired(Utc::now()))
        .ok_or_else(|| {
            AppError::NotFoundOrForbidden("Share link not found or expired".to_string())
        })?;

    let interview = sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
        .bind(link.interview_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFoundOrForbidden("Share link not found or expired".to_string())
        })?;

    // Shared reads are not owner-scoped; include who shared the interview.
    let owner = sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profiles WHERE id = $1")
        .bind(interview.user_id)
        .fetch_optional(&state.db)
        .await?;

    let mut response = SharedInterviewResponse {
        candidate_name: interview.candidate_name,
        position_title: interview.position_title,
        interview_date: interview.interview_date,
        status: interview.status,
        shared_by: owner.and_then(|o| o.display_name.or(Some(o.email))),
        summary_content: None,
        ai_model_used: None,
        transcript_text: None,
    };

    if link.grants(PERMISSION_VIEW_SUMMARY) || link.grants(PERMISSION_VIEW_TRANSCRIPT) {
        if let Some(summary) = latest_summary(&state.db, link.interview_id).await? {
            if link.grants(PERMISSION_VIEW_SUMMARY) {
                response.summary_content = Some(summary.summary_content.clone());
                response.ai_model_used = Some(summary.ai_model_used.clone());
            }
            if link.grants(PERMISSION_VIEW_TRANSCRIPT) {
                response.transcript_text = Some(summary.transcript_text);
            }
        }
    }

    Ok(Json(response))
}
