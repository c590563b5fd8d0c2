use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of an interview record. Transitions are forward-only:
/// `uploading → processing → {completed, failed}`. There is no path back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Uploading,
    Processing,
    Completed,
    Failed,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Uploading => "uploading",
            InterviewStatus::Processing => "processing",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "uploading" => Some(InterviewStatus::Uploading),
            "processing" => Some(InterviewStatus::Processing),
            "completed" => Some(InterviewStatus::Completed),
            "failed" => Some(InterviewStatus::Failed),
            _ => None,
        }
    }

    /// Whether moving from `self` to `next` follows the forward-only chain.
    /// Terminal states accept nothing.
    pub fn can_transition(&self, next: InterviewStatus) -> bool {
        use InterviewStatus::*;
        matches!(
            (self, next),
            (Uploading, Processing) | (Processing, Completed) | (Processing, Failed)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_size: Option<i64>,
    pub file_url: Option<String>,
    pub candidate_name: String,
    pub position_title: String,
    pub interview_date: Option<NaiveDate>,
    pub status: String,
    pub consent_obtained: bool,
    pub retention_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewRow {
    pub fn status(&self) -> Option<InterviewStatus> {
        InterviewStatus::parse(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_allowed() {
        assert!(InterviewStatus::Uploading.can_transition(InterviewStatus::Processing));
        assert!(InterviewStatus::Processing.can_transition(InterviewStatus::Completed));
        assert!(InterviewStatus::Processing.can_transition(InterviewStatus::Failed));
    }

    #[test]
    fn backward_and_skip_transitions_rejected() {
        use InterviewStatus::*;
        assert!(!Processing.can_transition(Uploading));
        assert!(!Uploading.can_transition(Completed));
        assert!(!Uploading.can_transition(Failed));
        assert!(!Completed.can_transition(Processing));
        assert!(!Failed.can_transition(Processing));
        assert!(!Completed.can_transition(Failed));
    }

    #[test]
    fn parse_round_trips() {
        for s in ["uploading", "processing", "completed", "failed"] {
            assert_eq!(InterviewStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(InterviewStatus::parse("archived").is_none());
    }
}
