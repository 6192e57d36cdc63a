use std::sync::Arc;

use uuid::Uuid;

use crate::db::db::DBClient;
use crate::models::{
    itemmodel::Item,
    pointsmodel::{PointsTransaction, TransactionType},
    swapmodel::SwapRequest,
};
use crate::service::error::PointsError;

pub const WELCOME_BONUS: i32 = 100;
pub const SWAP_COMPLETION_BONUS: i32 = 10;

/// One ledger posting: who, what kind, how much.
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    pub user_id: Uuid,
    pub tx_type: TransactionType,
    pub amount: i32,
    pub description: String,
}

/// Applies a posting amount to a balance, refusing overdrafts.
pub fn apply_amount(balance: i32, amount: i32) -> Result<i32, PointsError> {
    let new_balance = balance + amount;
    if new_balance < 0 {
        return Err(PointsError::InsufficientPoints {
            required: -amount,
            available: balance,
        });
    }
    Ok(new_balance)
}

/// The postings a completed swap settles with. For a points redemption the
/// value of the requested item moves from requester to receiver; for an
/// item-for-item swap both sides earn the completion bonus.
pub fn settlement_postings(swap: &SwapRequest, requested_item: &Item) -> Vec<Posting> {
    if swap.is_points_redemption() {
        vec![
            Posting {
                user_id: swap.requester,
                tx_type: TransactionType::Spent,
                amount: -requested_item.points_value,
                description: format!("Redeemed \"{}\" with points", requested_item.title),
            },
            Posting {
                user_id: swap.receiver,
                tx_type: TransactionType::Earned,
                amount: requested_item.points_value,
                description: format!("\"{}\" redeemed by another member", requested_item.title),
            },
        ]
    } else {
        vec![
            Posting {
                user_id: swap.requester,
                tx_type: TransactionType::Earned,
                amount: SWAP_COMPLETION_BONUS,
                description: format!("Completed swap for \"{}\"", requested_item.title),
            },
            Posting {
                user_id: swap.receiver,
                tx_type: TransactionType::Earned,
                amount: SWAP_COMPLETION_BONUS,
                description: format!("Completed swap of \"{}\"", requested_item.title),
            },
        ]
    }
}

#[derive(Debug, Clone)]
pub struct PointsService {
    db_client: Arc<DBClient>,
}

impl PointsService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        PointsService { db_client }
    }

    /// Posts one ledger entry and moves the user's balance in the same
    /// database transaction. The user row is locked first, so concurrent
    /// postings for the same user serialize and `balance_after` always
    /// extends the ledger tail.
    pub async fn post(
        &self,
        user_id: Uuid,
        tx_type: TransactionType,
        amount: i32,
        description: &str,
        related_item: Option<Uuid>,
        related_swap: Option<Uuid>,
    ) -> Result<PointsTransaction, PointsError> {
        let mut tx = self.db_client.pool.begin().await?;

        let balance: Option<i32> =
            sqlx::query_scalar("SELECT points FROM users WHERE id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;

        let balance = balance.ok_or(PointsError::UserNotFound(user_id))?;
        let new_balance = apply_amount(balance, amount)?;

        sqlx::query("UPDATE users SET points = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(new_balance)
            .execute(&mut *tx)
            .await?;

        let entry = sqlx::query_as::<_, PointsTransaction>(
            r#"
            INSERT INTO points_transactions
                (user_id, tx_type, amount, description, related_item, related_swap, balance_after)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(tx_type)
        .bind(amount)
        .bind(description)
        .bind(related_item)
        .bind(related_swap)
        .bind(new_balance)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "Ledger posting: user={} type={} amount={} balance_after={}",
            user_id,
            tx_type.to_str(),
            amount,
            new_balance
        );

        Ok(entry)
    }

    pub async fn award_welcome_bonus(
        &self,
        user_id: Uuid,
    ) -> Result<PointsTransaction, PointsError> {
        self.post(
            user_id,
            TransactionType::Bonus,
            WELCOME_BONUS,
            "Welcome to ReWear",
            None,
            None,
        )
        .await
    }

    /// Settles a completed swap. The spend leg runs first, so an overdraft
    /// aborts before anyone is credited.
    pub async fn settle_swap(
        &self,
        swap: &SwapRequest,
        requested_item: &Item,
    ) -> Result<(), PointsError> {
        for posting in settlement_postings(swap, requested_item) {
            self.post(
                posting.user_id,
                posting.tx_type,
                posting.amount,
                &posting.description,
                Some(requested_item.id),
                Some(swap.id),
            )
            .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::itemmodel::{
        ItemCategory, ItemCondition, ItemStatus, ItemType,
    };
    use crate::models::swapmodel::SwapStatus;
    use chrono::Utc;
    use sqlx::types::Json;

    fn item(points_value: i32) -> Item {
        Item {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Denim Jacket".to_string(),
            description: "desc".to_string(),
            category: ItemCategory::Men,
            item_type: ItemType::Jackets,
            size: "M".to_string(),
            condition: ItemCondition::Good,
            brand: None,
            color: "Blue".to_string(),
            material: None,
            points_value,
            location: None,
            tags: vec![],
            images: Json(vec![]),
            status: ItemStatus::Active,
            is_available: true,
            approved_at: None,
            approved_by: None,
            rejected_at: None,
            rejected_by: None,
            rejection_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn swap(offered_item: Option<Uuid>) -> SwapRequest {
        SwapRequest {
            id: Uuid::new_v4(),
            requester: Uuid::new_v4(),
            receiver: Uuid::new_v4(),
            requested_item: Uuid::new_v4(),
            offered_item,
            status: SwapStatus::Accepted,
            message: None,
            responded_at: None,
            completed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn apply_amount_extends_the_balance() {
        assert_eq!(apply_amount(100, 25).unwrap(), 125);
        assert_eq!(apply_amount(100, -100).unwrap(), 0);
    }

    #[test]
    fn apply_amount_refuses_overdraft() {
        let err = apply_amount(20, -75).unwrap_err();
        match err {
            PointsError::InsufficientPoints {
                required,
                available,
            } => {
                assert_eq!(required, 75);
                assert_eq!(available, 20);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn replayed_postings_sum_to_the_final_balance() {
        // balance_after of the last entry is the starting balance plus the
        // sum of all amounts.
        let amounts = [100, -30, 45, -10, 5];
        let start = 0;

        let mut balance = start;
        for amount in amounts {
            balance = apply_amount(balance, amount).unwrap();
        }

        assert_eq!(balance, start + amounts.iter().sum::<i32>());
    }

    #[test]
    fn redemption_moves_the_item_value() {
        let swap = swap(None);
        let item = item(75);
        let postings = settlement_postings(&swap, &item);

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].user_id, swap.requester);
        assert_eq!(postings[0].tx_type, TransactionType::Spent);
        assert_eq!(postings[0].amount, -75);
        assert_eq!(postings[1].user_id, swap.receiver);
        assert_eq!(postings[1].tx_type, TransactionType::Earned);
        assert_eq!(postings[1].amount, 75);

        // Zero-sum: the marketplace neither mints nor burns on a redemption.
        assert_eq!(postings.iter().map(|p| p.amount).sum::<i32>(), 0);
    }

    #[test]
    fn item_swap_awards_the_completion_bonus_to_both_sides() {
        let swap = swap(Some(Uuid::new_v4()));
        let item = item(75);
        let postings = settlement_postings(&swap, &item);

        assert_eq!(postings.len(), 2);
        for posting in &postings {
            assert_eq!(posting.tx_type, TransactionType::Earned);
            assert_eq!(posting.amount, SWAP_COMPLETION_BONUS);
        }
    }

    #[test]
    fn spend_leg_comes_first() {
        // Ordering matters: an overdraft must abort before the receiver is
        // credited, so the spend posting leads.
        let postings = settlement_postings(&swap(None), &item(75));
        assert_eq!(postings[0].tx_type, TransactionType::Spent);
    }

    #[tokio::test]
    async fn service_is_constructible() {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/rewear").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let _svc = PointsService::new(db_client);
    }
}
