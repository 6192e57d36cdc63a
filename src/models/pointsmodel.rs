use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "transaction_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Earned,
    Spent,
    Bonus,
    Penalty,
}

impl TransactionType {
    pub fn to_str(&self) -> &str {
        match self {
            TransactionType::Earned => "earned",
            TransactionType::Spent => "spent",
            TransactionType::Bonus => "bonus",
            TransactionType::Penalty => "penalty",
        }
    }
}

/// Immutable ledger entry. Rows are only ever inserted; `balance_after`
/// snapshots the user's balance immediately after this entry.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct PointsTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tx_type: TransactionType,
    pub amount: i32,
    pub description: String,
    pub related_item: Option<Uuid>,
    pub related_swap: Option<Uuid>,
    pub balance_after: i32,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_wire_names() {
        assert_eq!(TransactionType::Earned.to_str(), "earned");
        assert_eq!(TransactionType::Spent.to_str(), "spent");
        assert_eq!(TransactionType::Bonus.to_str(), "bonus");
        assert_eq!(TransactionType::Penalty.to_str(), "penalty");
    }
}
