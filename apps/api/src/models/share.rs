use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const PERMISSION_VIEW_SUMMARY: &str = "view_summary";
pub const PERMISSION_VIEW_TRANSCRIPT: &str = "view_transcript";

/// Token granting time-bounded, permission-scoped external read access to an
/// interview. Expiry is checked at read time; expired rows are not purged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareLinkRow {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ShareLinkRow {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(expires_at: DateTime<Utc>, permissions: Vec<String>) -> ShareLinkRow {
        ShareLinkRow {
            id: Uuid::new_v4(),
            interview_id: Uuid::new_v4(),
            access_token: "t".repeat(43),
            expires_at,
            permissions,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn expiry_is_compared_at_read_time() {
        let now = Utc::now();
        assert!(link(now - Duration::hours(1), vec![]).is_expired(now));
        assert!(link(now, vec![]).is_expired(now));
        assert!(!link(now + Duration::hours(1), vec![]).is_expired(now));
    }

    #[test]
    fn permission_grants() {
        let now = Utc::now() + Duration::hours(1);
        let l = link(now, vec![PERMISSION_VIEW_SUMMARY.to_string()]);
        assert!(l.grants(PERMISSION_VIEW_SUMMARY));
        assert!(!l.grants(PERMISSION_VIEW_TRANSCRIPT));
    }
}
