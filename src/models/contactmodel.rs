use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "contact_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl ContactStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::InProgress => "in-progress",
            ContactStatus::Resolved => "resolved",
            ContactStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub admin_response: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(ContactStatus::InProgress).unwrap(),
            serde_json::json!("in-progress")
        );
        assert_eq!(ContactStatus::InProgress.to_str(), "in-progress");
    }
}
