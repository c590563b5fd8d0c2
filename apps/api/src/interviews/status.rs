use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::interview::{InterviewRow, InterviewStatus};

/// Fetches an interview scoped to its owner. Absent and foreign-owned rows
/// are indistinguishable: both return `None`.
pub async fn fetch_owned(
    pool: &PgPool,
    interview_id: Uuid,
    user_id: Uuid,
) -> Result<Option<InterviewRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1 AND user_id = $2")
        .bind(interview_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Advances an interview's status along the forward-only chain.
///
/// A transition the chain does not define (backwards, skipping, or out of a
/// terminal state) is skipped silently and leaves the row untouched; returns
/// whether a write happened. There is no row lock: two concurrent callers can
/// still interleave, which is the documented behavior of this pipeline.
pub async fn advance(
    pool: &PgPool,
    interview_id: Uuid,
    user_id: Uuid,
    next: InterviewStatus,
) -> Result<bool, sqlx::Error> {
    let current: Option<String> =
        sqlx::query_scalar("SELECT status FROM interviews WHERE id = $1 AND user_id = $2")
            .bind(interview_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    let allowed = current
        .as_deref()
        .and_then(InterviewStatus::parse)
        .map(|s| s.can_transition(next))
        .unwrap_or(false);

    if !allowed {
        debug!(
            "Skipping status transition to {} for interview {interview_id} (current: {current:?})",
            next.as_str()
        );
        return Ok(false);
    }

    sqlx::query("UPDATE interviews SET status = $3, updated_at = now() WHERE id = $1 AND user_id = $2")
        .bind(interview_id)
        .bind(user_id)
        .bind(next.as_str())
        .execute(pool)
        .await?;

    Ok(true)
}
