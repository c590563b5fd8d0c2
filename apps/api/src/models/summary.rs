use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored analysis result. `summary_content` holds the five-section object
/// (camelCase keys: jobSummary, mustHaves, challenges, jobDescription,
/// recapEmail) for default-prompt analyses, or the template's own shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewSummaryRow {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub template_id: Option<Uuid>,
    pub summary_content: Value,
    pub transcript_text: String,
    pub ai_model_used: String,
    pub processing_time_seconds: i32,
    pub created_at: DateTime<Utc>,
}
