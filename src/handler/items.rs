use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::itemdb::ItemExt,
    dtos::itemdtos::{
        CreateItemDto, ItemListResponseDto, ItemQueryDto, ItemResponseDto, UpdateItemDto,
    },
    error::HttpError,
    middleware::{auth, JWTAuthMiddeware},
    models::{
        itemmodel::ItemStatus,
        usermodel::UserRole,
    },
    AppState,
};

pub fn items_handler() -> Router {
    // Browse and detail are public; everything that writes requires auth.
    let protected_routes = Router::new()
        .route("/", post(create_item))
        .route("/my-items", get(get_my_items))
        .route("/:item_id", axum::routing::put(update_item).delete(delete_item))
        .layer(middleware::from_fn(auth));

    let public_routes = Router::new()
        .route("/", get(browse_items))
        .route("/:item_id", get(get_item));

    Router::new().merge(protected_routes).merge(public_routes)
}

pub async fn browse_items(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query_params): Query<ItemQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(12);
    let offset = ((page - 1) * limit) as i64;

    let items = app_state
        .db_client
        .browse_items(&query_params, limit as i64, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = app_state
        .db_client
        .count_browse_items(&query_params)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ItemListResponseDto {
        status: "success".to_string(),
        data: items,
        results,
    }))
}

pub async fn get_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let item = app_state
        .db_client
        .get_item(item_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Item not found"))?;

    // Unmoderated listings stay invisible on the public detail route;
    // owners see theirs under /my-items.
    if item.status == ItemStatus::Pending {
        return Err(HttpError::not_found("Item not found"));
    }

    Ok(Json(ItemResponseDto {
        status: "success".to_string(),
        data: item,
    }))
}

pub async fn create_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateItemDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let item = app_state
        .db_client
        .save_item(auth.user.id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("New item listed: {} by {}", item.id, auth.user.email);

    Ok((
        StatusCode::CREATED,
        Json(ItemResponseDto {
            status: "success".to_string(),
            data: item,
        }),
    ))
}

pub async fn get_my_items(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let items = app_state
        .db_client
        .get_user_items(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = items.len() as i64;

    Ok(Json(ItemListResponseDto {
        status: "success".to_string(),
        data: items,
        results,
    }))
}

pub async fn update_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(item_id): Path<Uuid>,
    Json(body): Json<UpdateItemDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let item = app_state
        .db_client
        .get_item(item_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Item not found"))?;

    if item.user_id != auth.user.id {
        return Err(HttpError::forbidden("Not authorized to edit this item"));
    }

    if item.status == ItemStatus::Swapped {
        return Err(HttpError::bad_request("Swapped items cannot be edited"));
    }

    let updated = app_state
        .db_client
        .update_item(item_id, body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ItemResponseDto {
        status: "success".to_string(),
        data: updated,
    }))
}

pub async fn delete_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let item = app_state
        .db_client
        .get_item(item_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Item not found"))?;

    if item.user_id != auth.user.id && auth.user.role != UserRole::Admin {
        return Err(HttpError::forbidden("Not authorized to delete this item"));
    }

    let has_open_swap = app_state
        .db_client
        .has_open_swap(item_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if has_open_swap {
        return Err(HttpError::bad_request(
            "Item has an open swap request and cannot be deleted",
        ));
    }

    app_state
        .db_client
        .delete_item(item_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Item removed successfully"
    })))
}
