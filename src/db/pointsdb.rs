// db/pointsdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::pointsmodel::PointsTransaction;

#[async_trait]
pub trait PointsExt {
    async fn get_user_transactions(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PointsTransaction>, sqlx::Error>;

    async fn count_user_transactions(&self, user_id: Uuid) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl PointsExt for DBClient {
    async fn get_user_transactions(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PointsTransaction>, sqlx::Error> {
        sqlx::query_as::<_, PointsTransaction>(
            r#"
            SELECT * FROM points_transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_user_transactions(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM points_transactions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }
}
