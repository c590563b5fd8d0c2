use serde_json::Value;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

/// Records an audit trail entry. Best-effort: a failed write is logged and
/// swallowed so auditing can never fail the request it describes.
pub async fn record(
    pool: &PgPool,
    user_id: Uuid,
    action: &str,
    resource_type: &str,
    resource_id: Uuid,
    details: Value,
) {
    let result = sqlx::query(
        "INSERT INTO audit_logs (user_id, action, resource_type, resource_id, details)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(action)
    .bind(resource_type)
    .bind(resource_id)
    .bind(details)
    .execute(pool)
    .await;

    if let Err(e) = result {
        warn!("Audit log write failed for {action} on {resource_type} {resource_id}: {e}");
    }
}

/// Records a usage event (e.g. a completed analysis). Best-effort like `record`.
pub async fn track_usage(pool: &PgPool, user_id: Uuid, event_type: &str, event_data: Value) {
    let result = sqlx::query(
        "INSERT INTO usage_analytics (user_id, event_type, event_data) VALUES ($1, $2, $3)",
    )
    .bind(user_id)
    .bind(event_type)
    .bind(event_data)
    .execute(pool)
    .await;

    if let Err(e) = result {
        warn!("Usage event write failed for {event_type}: {e}");
    }
}
