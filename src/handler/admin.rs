use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{delete, get, put},
    Extension, Json, Router,
};
use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{admindb::AdminExt, itemdb::ItemExt, pointsdb::PointsExt, userdb::UserExt},
    dtos::admindtos::{
        AdminItemListDto, AdminItemQueryDto, AdminStatsDto, AdminSwapListDto, AdminSwapQueryDto,
        AdminUserDetailDto, AdminUserListDto, AdminUserQueryDto, AdminUserStatsDto, AnalyticsDto,
        AnalyticsQueryDto, BanUserDto, PaginationDto, RecentActivityDto, RejectItemDto,
    },
    dtos::userdtos::FilterUserDto,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/analytics", get(get_analytics))
        .route("/users", get(get_users))
        .route("/users/:user_id", get(get_user_detail))
        .route("/users/:user_id/ban", put(ban_user))
        .route("/users/:user_id/unban", put(unban_user))
        .route("/items", get(get_items))
        .route("/items/:item_id/approve", put(approve_item))
        .route("/items/:item_id/reject", put(reject_item))
        .route("/items/:item_id", delete(remove_item))
        .route("/swaps", get(get_swaps))
}

/// Maps a period query string to its day count; anything unknown falls back
/// to a week.
pub fn period_days(period: Option<&str>) -> i64 {
    match period {
        Some("30d") => 30,
        Some("90d") => 90,
        _ => 7,
    }
}

pub async fn get_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let db = &app_state.db_client;
    let day_ago = Utc::now() - Duration::hours(24);
    let week_ago = Utc::now() - Duration::days(7);

    let total_users = db
        .count_users()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let total_items = db
        .count_items()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let total_swaps = db
        .count_swaps()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let pending_approvals = db
        .count_pending_items()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let active_users = db
        .count_active_users_since(week_ago)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let total_points = db
        .sum_points()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let new_users = db
        .count_users_since(day_ago)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let new_items = db
        .count_items_since(day_ago)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let new_swaps = db
        .count_swaps_since(day_ago)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": AdminStatsDto {
            total_users,
            total_items,
            total_swaps,
            pending_approvals,
            active_users,
            total_points,
            recent_activity: RecentActivityDto {
                new_users,
                new_items,
                new_swaps,
            },
        }
    })))
}

pub async fn get_analytics(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query_params): Query<AnalyticsQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let days = period_days(query_params.period.as_deref());
    let start = Utc::now() - Duration::days(days);

    let db = &app_state.db_client;

    let user_growth = db
        .user_growth(start)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let item_growth = db
        .item_growth(start)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let swap_growth = db
        .swap_growth(start)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let top_categories = db
        .top_categories(5)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": AnalyticsDto {
            user_growth,
            item_growth,
            swap_growth,
            top_categories,
        }
    })))
}

pub async fn get_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query_params): Query<AdminUserQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);
    let offset = ((page - 1) * limit) as i64;
    let search = query_params.search.as_deref().filter(|s| !s.is_empty());

    let users = app_state
        .db_client
        .search_users(search, query_params.status, limit as i64, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .count_search_users(search, query_params.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": AdminUserListDto {
            users: FilterUserDto::filter_users(&users),
            pagination: PaginationDto::new(page, limit, total),
        }
    })))
}

pub async fn get_user_detail(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let total_items = app_state
        .db_client
        .count_user_items(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total_swaps = app_state
        .db_client
        .count_user_swaps(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let recent_transactions = app_state
        .db_client
        .get_user_transactions(user_id, 10, 0)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": AdminUserDetailDto {
            user: FilterUserDto::filter_user(&user),
            stats: AdminUserStatsDto {
                total_items,
                total_swaps,
                recent_transactions,
            },
        }
    })))
}

pub async fn ban_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<BanUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .ban_user(user_id, auth.user.id, &body.reason)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    tracing::warn!("User {} banned by {}: {}", user.email, auth.user.email, body.reason);

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "User banned successfully",
        "data": FilterUserDto::filter_user(&user)
    })))
}

pub async fn unban_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .unban_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "User unbanned successfully",
        "data": FilterUserDto::filter_user(&user)
    })))
}

pub async fn get_items(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query_params): Query<AdminItemQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);
    let offset = ((page - 1) * limit) as i64;
    let search = query_params.search.as_deref().filter(|s| !s.is_empty());

    let items = app_state
        .db_client
        .search_items(
            search,
            query_params.status,
            query_params.category,
            limit as i64,
            offset,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .count_search_items(search, query_params.status, query_params.category)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": AdminItemListDto {
            items,
            pagination: PaginationDto::new(page, limit, total),
        }
    })))
}

pub async fn approve_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    // Re-approving an already active item rewrites the same state, so a
    // repeated call succeeds without side effects.
    let item = app_state
        .db_client
        .approve_item(item_id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Item not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Item approved successfully",
        "data": item
    })))
}

pub async fn reject_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(item_id): Path<Uuid>,
    Json(body): Json<RejectItemDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let item = app_state
        .db_client
        .reject_item(item_id, auth.user.id, &body.reason)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Item not found"))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Item rejected successfully",
        "data": item
    })))
}

pub async fn remove_item(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let item = app_state
        .db_client
        .get_item(item_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Item not found"))?;

    app_state
        .db_client
        .delete_item(item.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Item removed successfully"
    })))
}

pub async fn get_swaps(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query_params): Query<AdminSwapQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit.unwrap_or(10);
    let offset = ((page - 1) * limit) as i64;

    let swaps = app_state
        .db_client
        .list_swaps(query_params.status, limit as i64, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let total = app_state
        .db_client
        .count_list_swaps(query_params.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": AdminSwapListDto {
            swaps,
            pagination: PaginationDto::new(page, limit, total),
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_periods_fall_back_to_a_week() {
        assert_eq!(period_days(Some("7d")), 7);
        assert_eq!(period_days(Some("30d")), 30);
        assert_eq!(period_days(Some("90d")), 90);
        assert_eq!(period_days(Some("1y")), 7);
        assert_eq!(period_days(None), 7);
    }
}
