// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::User;

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        email: T,
        password: T,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        avatar_url: Option<String>,
        location: Option<String>,
        bio: Option<String>,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<User, sqlx::Error>;

    async fn update_last_active(&self, user_id: Uuid) -> Result<(), sqlx::Error>;

    async fn ban_user(
        &self,
        user_id: Uuid,
        banned_by: Uuid,
        reason: &str,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn unban_user(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, name, email, password, role, status, points,
                    avatar_url, location, bio,
                    banned_at, banned_by, ban_reason,
                    last_active, created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, name, email, password, role, status, points,
                    avatar_url, location, bio,
                    banned_at, banned_by, ban_reason,
                    last_active, created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        name: T,
        email: T,
        password: T,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, LOWER($2), $3)
            RETURNING
                id, name, email, password, role, status, points,
                avatar_url, location, bio,
                banned_at, banned_by, ban_reason,
                last_active, created_at, updated_at
            "#,
        )
        .bind(name.into())
        .bind(email.into())
        .bind(password.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        avatar_url: Option<String>,
        location: Option<String>,
        bio: Option<String>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                avatar_url = COALESCE($3, avatar_url),
                location = COALESCE($4, location),
                bio = COALESCE($5, bio),
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, email, password, role, status, points,
                avatar_url, location, bio,
                banned_at, banned_by, ban_reason,
                last_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(avatar_url)
        .bind(location)
        .bind(bio)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET password = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, email, password, role, status, points,
                avatar_url, location, bio,
                banned_at, banned_by, ban_reason,
                last_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(password)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_last_active(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_active = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ban_user(
        &self,
        user_id: Uuid,
        banned_by: Uuid,
        reason: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET status = 'banned'::user_status,
                banned_at = NOW(),
                banned_by = $2,
                ban_reason = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, email, password, role, status, points,
                avatar_url, location, bio,
                banned_at, banned_by, ban_reason,
                last_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(banned_by)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
    }

    async fn unban_user(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET status = 'active'::user_status,
                banned_at = NULL,
                banned_by = NULL,
                ban_reason = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id, name, email, password, role, status, points,
                avatar_url, location, bio,
                banned_at, banned_by, ban_reason,
                last_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }
}
