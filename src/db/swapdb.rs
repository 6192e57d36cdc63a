// db/swapdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::swapmodel::{SwapRequest, SwapStatus};

#[async_trait]
pub trait SwapExt {
    async fn save_swap_request(
        &self,
        requester: Uuid,
        receiver: Uuid,
        requested_item: Uuid,
        offered_item: Option<Uuid>,
        message: Option<String>,
    ) -> Result<SwapRequest, sqlx::Error>;

    async fn get_swap_request(&self, swap_id: Uuid) -> Result<Option<SwapRequest>, sqlx::Error>;

    /// Requests where the user is on either side of the exchange.
    async fn get_user_swap_requests(
        &self,
        user_id: Uuid,
        status: Option<SwapStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SwapRequest>, sqlx::Error>;

    async fn count_user_swap_requests(
        &self,
        user_id: Uuid,
        status: Option<SwapStatus>,
    ) -> Result<i64, sqlx::Error>;

    async fn pending_swap_exists(
        &self,
        requester: Uuid,
        requested_item: Uuid,
    ) -> Result<bool, sqlx::Error>;

    /// Accept or reject; stamps the response time.
    async fn respond_to_swap(
        &self,
        swap_id: Uuid,
        status: SwapStatus,
    ) -> Result<SwapRequest, sqlx::Error>;

    async fn cancel_swap(&self, swap_id: Uuid) -> Result<SwapRequest, sqlx::Error>;

    async fn complete_swap(&self, swap_id: Uuid) -> Result<SwapRequest, sqlx::Error>;
}

#[async_trait]
impl SwapExt for DBClient {
    async fn save_swap_request(
        &self,
        requester: Uuid,
        receiver: Uuid,
        requested_item: Uuid,
        offered_item: Option<Uuid>,
        message: Option<String>,
    ) -> Result<SwapRequest, sqlx::Error> {
        sqlx::query_as::<_, SwapRequest>(
            r#"
            INSERT INTO swap_requests (requester, receiver, requested_item, offered_item, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(requester)
        .bind(receiver)
        .bind(requested_item)
        .bind(offered_item)
        .bind(message)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_swap_request(&self, swap_id: Uuid) -> Result<Option<SwapRequest>, sqlx::Error> {
        sqlx::query_as::<_, SwapRequest>("SELECT * FROM swap_requests WHERE id = $1")
            .bind(swap_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_swap_requests(
        &self,
        user_id: Uuid,
        status: Option<SwapStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SwapRequest>, sqlx::Error> {
        sqlx::query_as::<_, SwapRequest>(
            r#"
            SELECT * FROM swap_requests
            WHERE (requester = $1 OR receiver = $1)
              AND ($2::swap_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_user_swap_requests(
        &self,
        user_id: Uuid,
        status: Option<SwapStatus>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM swap_requests
            WHERE (requester = $1 OR receiver = $1)
              AND ($2::swap_status IS NULL OR status = $2)
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn pending_swap_exists(
        &self,
        requester: Uuid,
        requested_item: Uuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM swap_requests
                WHERE requester = $1
                  AND requested_item = $2
                  AND status = 'pending'::swap_status
            )
            "#,
        )
        .bind(requester)
        .bind(requested_item)
        .fetch_one(&self.pool)
        .await
    }

    async fn respond_to_swap(
        &self,
        swap_id: Uuid,
        status: SwapStatus,
    ) -> Result<SwapRequest, sqlx::Error> {
        sqlx::query_as::<_, SwapRequest>(
            r#"
            UPDATE swap_requests
            SET status = $2,
                responded_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(swap_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn cancel_swap(&self, swap_id: Uuid) -> Result<SwapRequest, sqlx::Error> {
        sqlx::query_as::<_, SwapRequest>(
            r#"
            UPDATE swap_requests
            SET status = 'cancelled'::swap_status,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(swap_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn complete_swap(&self, swap_id: Uuid) -> Result<SwapRequest, sqlx::Error> {
        sqlx::query_as::<_, SwapRequest>(
            r#"
            UPDATE swap_requests
            SET status = 'completed'::swap_status,
                completed_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(swap_id)
        .fetch_one(&self.pool)
        .await
    }
}
