// db/itemdb.rs
use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use super::db::DBClient;
use crate::dtos::itemdtos::{CreateItemDto, ItemQueryDto, UpdateItemDto};
use crate::models::itemmodel::Item;

#[async_trait]
pub trait ItemExt {
    async fn save_item(&self, user_id: Uuid, dto: CreateItemDto) -> Result<Item, sqlx::Error>;

    async fn get_item(&self, item_id: Uuid) -> Result<Option<Item>, sqlx::Error>;

    /// Public browse listing: active and available items only.
    async fn browse_items(
        &self,
        query: &ItemQueryDto,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Item>, sqlx::Error>;

    async fn count_browse_items(&self, query: &ItemQueryDto) -> Result<i64, sqlx::Error>;

    async fn get_user_items(&self, user_id: Uuid) -> Result<Vec<Item>, sqlx::Error>;

    /// Owner edit. A rejected item goes back to pending for re-moderation.
    async fn update_item(&self, item_id: Uuid, dto: UpdateItemDto) -> Result<Item, sqlx::Error>;

    async fn delete_item(&self, item_id: Uuid) -> Result<(), sqlx::Error>;

    async fn approve_item(
        &self,
        item_id: Uuid,
        approved_by: Uuid,
    ) -> Result<Option<Item>, sqlx::Error>;

    async fn reject_item(
        &self,
        item_id: Uuid,
        rejected_by: Uuid,
        reason: &str,
    ) -> Result<Option<Item>, sqlx::Error>;

    async fn set_item_availability(
        &self,
        item_id: Uuid,
        is_available: bool,
    ) -> Result<(), sqlx::Error>;

    async fn mark_item_swapped(&self, item_id: Uuid) -> Result<(), sqlx::Error>;

    /// True while a pending or accepted swap still references the item.
    async fn has_open_swap(&self, item_id: Uuid) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl ItemExt for DBClient {
    async fn save_item(&self, user_id: Uuid, dto: CreateItemDto) -> Result<Item, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (
                user_id, title, description, category, item_type, size, condition,
                brand, color, material, points_value, location, tags, images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.category)
        .bind(dto.item_type)
        .bind(dto.size)
        .bind(dto.condition)
        .bind(dto.brand)
        .bind(dto.color)
        .bind(dto.material)
        .bind(dto.points_value)
        .bind(dto.location)
        .bind(dto.tags)
        .bind(Json(dto.images))
        .fetch_one(&self.pool)
        .await
    }

    async fn get_item(&self, item_id: Uuid) -> Result<Option<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn browse_items(
        &self,
        query: &ItemQueryDto,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM items
            WHERE status = 'active'::item_status
              AND is_available = TRUE
              AND ($1::item_category IS NULL OR category = $1)
              AND ($2::item_type IS NULL OR item_type = $2)
              AND ($3::TEXT IS NULL OR size = $3)
              AND ($4::item_condition IS NULL OR condition = $4)
              AND ($5::TEXT IS NULL OR title ILIKE '%' || $5 || '%' OR description ILIKE '%' || $5 || '%')
              AND ($6::INT IS NULL OR points_value >= $6)
              AND ($7::INT IS NULL OR points_value <= $7)
            ORDER BY created_at DESC
            LIMIT $8 OFFSET $9
            "#,
        )
        .bind(query.category)
        .bind(query.item_type)
        .bind(query.size.as_deref())
        .bind(query.condition)
        .bind(query.search.as_deref())
        .bind(query.min_points)
        .bind(query.max_points)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_browse_items(&self, query: &ItemQueryDto) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM items
            WHERE status = 'active'::item_status
              AND is_available = TRUE
              AND ($1::item_category IS NULL OR category = $1)
              AND ($2::item_type IS NULL OR item_type = $2)
              AND ($3::TEXT IS NULL OR size = $3)
              AND ($4::item_condition IS NULL OR condition = $4)
              AND ($5::TEXT IS NULL OR title ILIKE '%' || $5 || '%' OR description ILIKE '%' || $5 || '%')
              AND ($6::INT IS NULL OR points_value >= $6)
              AND ($7::INT IS NULL OR points_value <= $7)
            "#,
        )
        .bind(query.category)
        .bind(query.item_type)
        .bind(query.size.as_deref())
        .bind(query.condition)
        .bind(query.search.as_deref())
        .bind(query.min_points)
        .bind(query.max_points)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user_items(&self, user_id: Uuid) -> Result<Vec<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM items
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_item(&self, item_id: Uuid, dto: UpdateItemDto) -> Result<Item, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                item_type = COALESCE($5, item_type),
                size = COALESCE($6, size),
                condition = COALESCE($7, condition),
                brand = COALESCE($8, brand),
                color = COALESCE($9, color),
                material = COALESCE($10, material),
                points_value = COALESCE($11, points_value),
                location = COALESCE($12, location),
                tags = COALESCE($13, tags),
                images = COALESCE($14, images),
                status = CASE
                    WHEN status = 'rejected'::item_status THEN 'pending'::item_status
                    ELSE status
                END,
                rejected_at = CASE
                    WHEN status = 'rejected'::item_status THEN NULL
                    ELSE rejected_at
                END,
                rejected_by = CASE
                    WHEN status = 'rejected'::item_status THEN NULL
                    ELSE rejected_by
                END,
                rejection_reason = CASE
                    WHEN status = 'rejected'::item_status THEN NULL
                    ELSE rejection_reason
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.category)
        .bind(dto.item_type)
        .bind(dto.size)
        .bind(dto.condition)
        .bind(dto.brand)
        .bind(dto.color)
        .bind(dto.material)
        .bind(dto.points_value)
        .bind(dto.location)
        .bind(dto.tags)
        .bind(dto.images.map(Json))
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_item(&self, item_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn approve_item(
        &self,
        item_id: Uuid,
        approved_by: Uuid,
    ) -> Result<Option<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET status = 'active'::item_status,
                approved_at = NOW(),
                approved_by = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(approved_by)
        .fetch_optional(&self.pool)
        .await
    }

    async fn reject_item(
        &self,
        item_id: Uuid,
        rejected_by: Uuid,
        reason: &str,
    ) -> Result<Option<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET status = 'rejected'::item_status,
                rejected_at = NOW(),
                rejected_by = $2,
                rejection_reason = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(item_id)
        .bind(rejected_by)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_item_availability(
        &self,
        item_id: Uuid,
        is_available: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE items SET is_available = $2, updated_at = NOW() WHERE id = $1")
            .bind(item_id)
            .bind(is_available)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn mark_item_swapped(&self, item_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE items
            SET status = 'swapped'::item_status,
                is_available = FALSE,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(item_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn has_open_swap(&self, item_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM swap_requests
                WHERE (requested_item = $1 OR offered_item = $1)
                  AND status IN ('pending'::swap_status, 'accepted'::swap_status)
            )
            "#,
        )
        .bind(item_id)
        .fetch_one(&self.pool)
        .await
    }
}
