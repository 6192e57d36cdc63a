use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::contactdb::ContactExt,
    dtos::contactdtos::{
        ContactListResponseDto, ContactResponseDto, CreateContactDto, UpdateContactDto,
    },
    error::HttpError,
    middleware::{auth, role_check},
    models::usermodel::UserRole,
    AppState,
};

pub fn contact_handler() -> Router {
    // Submissions are open to anyone; triage is admin-only.
    let admin_routes = Router::new()
        .route("/", get(get_contacts))
        .route("/:contact_id", patch(update_contact))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin])
        }))
        .layer(middleware::from_fn(auth));

    Router::new()
        .route("/", post(submit_contact))
        .merge(admin_routes)
}

pub async fn submit_contact(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateContactDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let contact = app_state
        .db_client
        .create_contact(body.name, body.email, body.subject, body.message)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponseDto {
            status: "success".to_string(),
            message: "Thank you for your message! We'll get back to you soon.".to_string(),
            data: contact,
        }),
    ))
}

pub async fn get_contacts(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let contacts = app_state
        .db_client
        .get_contacts()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = contacts.len() as i64;

    Ok(Json(ContactListResponseDto {
        status: "success".to_string(),
        data: contacts,
        results,
    }))
}

pub async fn update_contact(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(contact_id): Path<Uuid>,
    Json(body): Json<UpdateContactDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let contact = app_state
        .db_client
        .update_contact_status(contact_id, body.status, body.admin_response)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Contact submission not found"))?;

    Ok(Json(ContactResponseDto {
        status: "success".to_string(),
        message: "Contact status updated successfully".to_string(),
        data: contact,
    }))
}
