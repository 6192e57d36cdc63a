// db/contactdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::contactmodel::{Contact, ContactStatus};

#[async_trait]
pub trait ContactExt {
    async fn create_contact(
        &self,
        name: String,
        email: String,
        subject: String,
        message: String,
    ) -> Result<Contact, sqlx::Error>;

    async fn get_contacts(&self) -> Result<Vec<Contact>, sqlx::Error>;

    async fn update_contact_status(
        &self,
        contact_id: Uuid,
        status: ContactStatus,
        admin_response: Option<String>,
    ) -> Result<Option<Contact>, sqlx::Error>;
}

#[async_trait]
impl ContactExt for DBClient {
    async fn create_contact(
        &self,
        name: String,
        email: String,
        subject: String,
        message: String,
    ) -> Result<Contact, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, email, subject, message)
            VALUES ($1, LOWER($2), $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(subject)
        .bind(message)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_contacts(&self) -> Result<Vec<Contact>, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            r#"
            SELECT * FROM contacts
            ORDER BY submitted_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn update_contact_status(
        &self,
        contact_id: Uuid,
        status: ContactStatus,
        admin_response: Option<String>,
    ) -> Result<Option<Contact>, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET status = $2,
                admin_response = COALESCE($3, admin_response),
                responded_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(contact_id)
        .bind(status)
        .bind(admin_response)
        .fetch_optional(&self.pool)
        .await
    }
}
