// db/admindb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::admindtos::{CategoryCountDto, GrowthPointDto};
use crate::models::{
    itemmodel::{ItemCategory, ItemStatus, ItemWithOwner},
    swapmodel::{SwapStatus, SwapWithDetails},
    usermodel::{User, UserStatus},
};

/// Read-side aggregations for the admin dashboard. Nothing here is cached;
/// every call re-aggregates.
#[async_trait]
pub trait AdminExt {
    async fn count_users(&self) -> Result<i64, sqlx::Error>;
    async fn count_items(&self) -> Result<i64, sqlx::Error>;
    async fn count_swaps(&self) -> Result<i64, sqlx::Error>;
    async fn count_pending_items(&self) -> Result<i64, sqlx::Error>;
    async fn count_active_users_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error>;
    async fn sum_points(&self) -> Result<i64, sqlx::Error>;

    async fn count_users_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error>;
    async fn count_items_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error>;
    async fn count_swaps_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error>;

    async fn user_growth(&self, start: DateTime<Utc>) -> Result<Vec<GrowthPointDto>, sqlx::Error>;
    async fn item_growth(&self, start: DateTime<Utc>) -> Result<Vec<GrowthPointDto>, sqlx::Error>;
    async fn swap_growth(&self, start: DateTime<Utc>) -> Result<Vec<GrowthPointDto>, sqlx::Error>;
    async fn top_categories(&self, limit: i64) -> Result<Vec<CategoryCountDto>, sqlx::Error>;

    async fn search_users(
        &self,
        search: Option<&str>,
        status: Option<UserStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error>;

    async fn count_search_users(
        &self,
        search: Option<&str>,
        status: Option<UserStatus>,
    ) -> Result<i64, sqlx::Error>;

    async fn search_items(
        &self,
        search: Option<&str>,
        status: Option<ItemStatus>,
        category: Option<ItemCategory>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ItemWithOwner>, sqlx::Error>;

    async fn count_search_items(
        &self,
        search: Option<&str>,
        status: Option<ItemStatus>,
        category: Option<ItemCategory>,
    ) -> Result<i64, sqlx::Error>;

    async fn list_swaps(
        &self,
        status: Option<SwapStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SwapWithDetails>, sqlx::Error>;

    async fn count_list_swaps(&self, status: Option<SwapStatus>) -> Result<i64, sqlx::Error>;

    async fn count_user_items(&self, user_id: Uuid) -> Result<i64, sqlx::Error>;
    async fn count_user_swaps(&self, user_id: Uuid) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl AdminExt for DBClient {
    async fn count_users(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_items(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_swaps(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM swap_requests")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_pending_items(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE status = 'pending'::item_status")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_active_users_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE last_active >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
    }

    async fn sum_points(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM points_transactions")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_users_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
    }

    async fn count_items_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
    }

    async fn count_swaps_since(&self, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM swap_requests WHERE created_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
    }

    async fn user_growth(&self, start: DateTime<Utc>) -> Result<Vec<GrowthPointDto>, sqlx::Error> {
        sqlx::query_as::<_, GrowthPointDto>(
            r#"
            SELECT TO_CHAR(created_at, 'YYYY-MM-DD') AS date, COUNT(*) AS count
            FROM users
            WHERE created_at >= $1
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await
    }

    async fn item_growth(&self, start: DateTime<Utc>) -> Result<Vec<GrowthPointDto>, sqlx::Error> {
        sqlx::query_as::<_, GrowthPointDto>(
            r#"
            SELECT TO_CHAR(created_at, 'YYYY-MM-DD') AS date, COUNT(*) AS count
            FROM items
            WHERE created_at >= $1
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await
    }

    async fn swap_growth(&self, start: DateTime<Utc>) -> Result<Vec<GrowthPointDto>, sqlx::Error> {
        sqlx::query_as::<_, GrowthPointDto>(
            r#"
            SELECT TO_CHAR(created_at, 'YYYY-MM-DD') AS date, COUNT(*) AS count
            FROM swap_requests
            WHERE created_at >= $1
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await
    }

    async fn top_categories(&self, limit: i64) -> Result<Vec<CategoryCountDto>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCountDto>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM items
            GROUP BY category
            ORDER BY count DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn search_users(
        &self,
        search: Option<&str>,
        status: Option<UserStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, name, email, password, role, status, points,
                avatar_url, location, bio,
                banned_at, banned_by, ban_reason,
                last_active, created_at, updated_at
            FROM users
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
              AND ($2::user_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_search_users(
        &self,
        search: Option<&str>,
        status: Option<UserStatus>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM users
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
              AND ($2::user_status IS NULL OR status = $2)
            "#,
        )
        .bind(search)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn search_items(
        &self,
        search: Option<&str>,
        status: Option<ItemStatus>,
        category: Option<ItemCategory>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ItemWithOwner>, sqlx::Error> {
        sqlx::query_as::<_, ItemWithOwner>(
            r#"
            SELECT
                i.*,
                u.name AS owner_name,
                u.email AS owner_email
            FROM items i
            JOIN users u ON i.user_id = u.id
            WHERE ($1::TEXT IS NULL OR i.title ILIKE '%' || $1 || '%' OR i.description ILIKE '%' || $1 || '%')
              AND ($2::item_status IS NULL OR i.status = $2)
              AND ($3::item_category IS NULL OR i.category = $3)
            ORDER BY i.created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(search)
        .bind(status)
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_search_items(
        &self,
        search: Option<&str>,
        status: Option<ItemStatus>,
        category: Option<ItemCategory>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM items
            WHERE ($1::TEXT IS NULL OR title ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
              AND ($2::item_status IS NULL OR status = $2)
              AND ($3::item_category IS NULL OR category = $3)
            "#,
        )
        .bind(search)
        .bind(status)
        .bind(category)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_swaps(
        &self,
        status: Option<SwapStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SwapWithDetails>, sqlx::Error> {
        sqlx::query_as::<_, SwapWithDetails>(
            r#"
            SELECT
                s.*,
                ru.name AS requester_name,
                ru.email AS requester_email,
                cu.name AS receiver_name,
                cu.email AS receiver_email,
                ri.title AS requested_item_title,
                oi.title AS offered_item_title
            FROM swap_requests s
            JOIN users ru ON s.requester = ru.id
            JOIN users cu ON s.receiver = cu.id
            JOIN items ri ON s.requested_item = ri.id
            LEFT JOIN items oi ON s.offered_item = oi.id
            WHERE ($1::swap_status IS NULL OR s.status = $1)
            ORDER BY s.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_list_swaps(&self, status: Option<SwapStatus>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM swap_requests
            WHERE ($1::swap_status IS NULL OR status = $1)
            "#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_user_items(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn count_user_swaps(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM swap_requests WHERE requester = $1 OR receiver = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }
}
