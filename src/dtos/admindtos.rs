use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    itemmodel::{ItemCategory, ItemStatus, ItemWithOwner},
    pointsmodel::PointsTransaction,
    swapmodel::{SwapStatus, SwapWithDetails},
    usermodel::UserStatus,
};

use super::userdtos::FilterUserDto;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivityDto {
    pub new_users: i64,
    pub new_items: i64,
    pub new_swaps: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsDto {
    pub total_users: i64,
    pub total_items: i64,
    pub total_swaps: i64,
    pub pending_approvals: i64,
    pub active_users: i64,
    pub total_points: i64,
    pub recent_activity: RecentActivityDto,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQueryDto {
    pub period: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct GrowthPointDto {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryCountDto {
    pub category: ItemCategory,
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub user_growth: Vec<GrowthPointDto>,
    pub item_growth: Vec<GrowthPointDto>,
    pub swap_growth: Vec<GrowthPointDto>,
    pub top_categories: Vec<CategoryCountDto>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminUserQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
    pub search: Option<String>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminItemQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
    pub search: Option<String>,
    pub status: Option<ItemStatus>,
    pub category: Option<ItemCategory>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminSwapQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
    pub status: Option<SwapStatus>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct BanUserDto {
    #[validate(length(min = 1, max = 500, message = "Reason must be between 1-500 characters"))]
    pub reason: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RejectItemDto {
    #[validate(length(min = 1, max = 500, message = "Reason must be between 1-500 characters"))]
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationDto {
    pub page: usize,
    pub limit: usize,
    pub total: i64,
    pub pages: i64,
}

impl PaginationDto {
    pub fn new(page: usize, limit: usize, total: i64) -> Self {
        let limit_i64 = limit as i64;
        let pages = if limit_i64 > 0 {
            (total + limit_i64 - 1) / limit_i64
        } else {
            0
        };
        PaginationDto {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminUserListDto {
    pub users: Vec<FilterUserDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminItemListDto {
    pub items: Vec<ItemWithOwner>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminSwapListDto {
    pub swaps: Vec<SwapWithDetails>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserStatsDto {
    pub total_items: i64,
    pub total_swaps: i64,
    pub recent_transactions: Vec<PointsTransaction>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminUserDetailDto {
    pub user: FilterUserDto,
    pub stats: AdminUserStatsDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_up() {
        let pagination = PaginationDto::new(1, 10, 25);
        assert_eq!(pagination.pages, 3);
        assert_eq!(PaginationDto::new(1, 10, 30).pages, 3);
        assert_eq!(PaginationDto::new(1, 10, 0).pages, 0);
    }

    #[test]
    fn stats_serialize_camel_case() {
        let stats = AdminStatsDto {
            total_users: 1,
            total_items: 2,
            total_swaps: 3,
            pending_approvals: 4,
            active_users: 5,
            total_points: 6,
            recent_activity: RecentActivityDto {
                new_users: 1,
                new_items: 1,
                new_swaps: 1,
            },
        };
        let json = serde_json::to_value(stats).unwrap();
        assert!(json.get("totalUsers").is_some());
        assert!(json.get("pendingApprovals").is_some());
        assert!(json["recentActivity"].get("newUsers").is_some());
    }
}
