use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "swap_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl SwapStatus {
    pub fn to_str(&self) -> &str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Completed => "completed",
            SwapStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct SwapRequest {
    pub id: Uuid,
    pub requester: Uuid,
    pub receiver: Uuid,
    pub requested_item: Uuid,
    pub offered_item: Option<Uuid>,
    pub status: SwapStatus,
    pub message: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl SwapRequest {
    /// A request with no offered item is redeemed against the requester's
    /// point balance instead of a counter-item.
    pub fn is_points_redemption(&self) -> bool {
        self.offered_item.is_none()
    }
}

/// Swap joined with the identities and item titles on both sides, for the
/// admin listing.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct SwapWithDetails {
    #[sqlx(flatten)]
    pub swap: SwapRequest,
    pub requester_name: String,
    pub requester_email: String,
    pub receiver_name: String,
    pub receiver_email: String,
    pub requested_item_title: String,
    pub offered_item_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap(offered_item: Option<Uuid>) -> SwapRequest {
        SwapRequest {
            id: Uuid::new_v4(),
            requester: Uuid::new_v4(),
            receiver: Uuid::new_v4(),
            requested_item: Uuid::new_v4(),
            offered_item,
            status: SwapStatus::Pending,
            message: None,
            responded_at: None,
            completed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn redemption_is_absence_of_offered_item() {
        assert!(swap(None).is_points_redemption());
        assert!(!swap(Some(Uuid::new_v4())).is_points_redemption());
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(SwapStatus::Pending.to_str(), "pending");
        assert_eq!(SwapStatus::Completed.to_str(), "completed");
        assert_eq!(SwapStatus::Cancelled.to_str(), "cancelled");
    }
}
