use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{itemdb::ItemExt, swapdb::SwapExt},
    dtos::swapdtos::{CreateSwapDto, SwapListResponseDto, SwapQueryDto, SwapResponseDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{
        itemmodel::{Item, ItemStatus},
        swapmodel::{SwapRequest, SwapStatus},
    },
    AppState,
};

pub fn swaps_handler() -> Router {
    Router::new()
        .route("/", get(get_my_swaps).post(create_swap))
        .route("/:swap_id/accept", put(accept_swap))
        .route("/:swap_id/reject", put(reject_swap))
        .route("/:swap_id/cancel", put(cancel_swap))
        .route("/:swap_id/complete", put(complete_swap))
}

async fn load_tradeable_item(
    app_state: &AppState,
    item_id: Uuid,
) -> Result<Item, HttpError> {
    let item = app_state
        .db_client
        .get_item(item_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Item not found"))?;

    if item.status != ItemStatus::Active || !item.is_available {
        return Err(HttpError::bad_request("Item is not available for swapping"));
    }

    Ok(item)
}

pub async fn create_swap(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateSwapDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let requested_item = load_tradeable_item(&app_state, body.requested_item).await?;

    if requested_item.user_id == auth.user.id {
        return Err(HttpError::bad_request("You cannot request your own item"));
    }

    match body.offered_item {
        Some(offered_id) => {
            let offered_item = load_tradeable_item(&app_state, offered_id).await?;
            if offered_item.user_id != auth.user.id {
                return Err(HttpError::bad_request(
                    "You can only offer an item you own",
                ));
            }
        }
        None => {
            // Points redemption: checked again, under lock, at settlement.
            if auth.user.points < requested_item.points_value {
                return Err(HttpError::bad_request(format!(
                    "Insufficient points: required {}, available {}",
                    requested_item.points_value, auth.user.points
                )));
            }
        }
    }

    let already_requested = app_state
        .db_client
        .pending_swap_exists(auth.user.id, requested_item.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if already_requested {
        return Err(HttpError::bad_request(
            "You already have a pending request for this item",
        ));
    }

    let swap = app_state
        .db_client
        .save_swap_request(
            auth.user.id,
            requested_item.user_id,
            requested_item.id,
            body.offered_item,
            body.message,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(
        "Swap request {} created: {} -> {}",
        swap.id,
        swap.requester,
        swap.receiver
    );

    Ok((
        StatusCode::CREATED,
        Json(SwapResponseDto {
            status: "success".to_string(),
            data: swap,
        }),
    ))
}

pub async fn get_my_swaps(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query_params): Query<SwapQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(20);
    let offset = ((page - 1) * limit) as i64;

    let swaps = app_state
        .db_client
        .get_user_swap_requests(auth.user.id, query_params.status, limit as i64, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let results = app_state
        .db_client
        .count_user_swap_requests(auth.user.id, query_params.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(SwapListResponseDto {
        status: "success".to_string(),
        data: swaps,
        results,
    }))
}

async fn load_swap(app_state: &AppState, swap_id: Uuid) -> Result<SwapRequest, HttpError> {
    app_state
        .db_client
        .get_swap_request(swap_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Swap request not found"))
}

pub async fn accept_swap(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(swap_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let swap = load_swap(&app_state, swap_id).await?;

    if swap.receiver != auth.user.id {
        return Err(HttpError::forbidden(
            "Only the receiver can accept a swap request",
        ));
    }

    if swap.status != SwapStatus::Pending {
        return Err(HttpError::bad_request("Swap request is no longer pending"));
    }

    let swap = app_state
        .db_client
        .respond_to_swap(swap_id, SwapStatus::Accepted)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Take both sides off the market while the exchange is in flight.
    app_state
        .db_client
        .set_item_availability(swap.requested_item, false)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(offered_item) = swap.offered_item {
        app_state
            .db_client
            .set_item_availability(offered_item, false)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    Ok(Json(SwapResponseDto {
        status: "success".to_string(),
        data: swap,
    }))
}

pub async fn reject_swap(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(swap_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let swap = load_swap(&app_state, swap_id).await?;

    if swap.receiver != auth.user.id {
        return Err(HttpError::forbidden(
            "Only the receiver can reject a swap request",
        ));
    }

    if swap.status != SwapStatus::Pending {
        return Err(HttpError::bad_request("Swap request is no longer pending"));
    }

    let swap = app_state
        .db_client
        .respond_to_swap(swap_id, SwapStatus::Rejected)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(SwapResponseDto {
        status: "success".to_string(),
        data: swap,
    }))
}

pub async fn cancel_swap(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(swap_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let swap = load_swap(&app_state, swap_id).await?;

    if swap.requester != auth.user.id {
        return Err(HttpError::forbidden(
            "Only the requester can cancel a swap request",
        ));
    }

    if swap.status != SwapStatus::Pending {
        return Err(HttpError::bad_request("Swap request is no longer pending"));
    }

    let swap = app_state
        .db_client
        .cancel_swap(swap_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(SwapResponseDto {
        status: "success".to_string(),
        data: swap,
    }))
}

pub async fn complete_swap(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(swap_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let swap = load_swap(&app_state, swap_id).await?;

    if swap.requester != auth.user.id && swap.receiver != auth.user.id {
        return Err(HttpError::forbidden(
            "Only a participant can complete a swap",
        ));
    }

    if swap.status != SwapStatus::Accepted {
        return Err(HttpError::bad_request(
            "Only an accepted swap can be completed",
        ));
    }

    let requested_item = app_state
        .db_client
        .get_item(swap.requested_item)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Requested item no longer exists"))?;

    // Ledger first: an overdraft aborts the completion before any item
    // changes state.
    app_state
        .points_service
        .settle_swap(&swap, &requested_item)
        .await
        .map_err(HttpError::from)?;

    app_state
        .db_client
        .mark_item_swapped(swap.requested_item)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(offered_item) = swap.offered_item {
        app_state
            .db_client
            .mark_item_swapped(offered_item)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    let swap = app_state
        .db_client
        .complete_swap(swap_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!("Swap {} completed", swap.id);

    Ok(Json(SwapResponseDto {
        status: "success".to_string(),
        data: swap,
    }))
}
