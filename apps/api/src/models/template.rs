use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Reusable prompt/section-shape definition selectable at analysis time.
/// Public templates are readable by everyone but owned only by their creator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SummaryTemplateRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub template_content: Value,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
