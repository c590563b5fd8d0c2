use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Display metadata for an account identity. 1:1 with the auth layer's user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub company_name: Option<String>,
    pub subscription_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
