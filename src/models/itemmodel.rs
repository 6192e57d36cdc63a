use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "item_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Men,
    Women,
    Kids,
    Accessories,
    Shoes,
    Bags,
}

impl ItemCategory {
    pub fn to_str(&self) -> &str {
        match self {
            ItemCategory::Men => "men",
            ItemCategory::Women => "women",
            ItemCategory::Kids => "kids",
            ItemCategory::Accessories => "accessories",
            ItemCategory::Shoes => "shoes",
            ItemCategory::Bags => "bags",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "item_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    Shirts,
    Pants,
    Dresses,
    Skirts,
    Jackets,
    Coats,
    Sweaters,
    Hoodies,
    TShirts,
    Jeans,
    Shorts,
    Suits,
    Formal,
    Casual,
    Sports,
    Underwear,
    Sleepwear,
    Swimwear,
    Other,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "item_condition", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ItemCondition {
    New,
    LikeNew,
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "item_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Pending,
    Active,
    Rejected,
    Swapped,
    Expired,
}

impl ItemStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Active => "active",
            ItemStatus::Rejected => "rejected",
            ItemStatus::Swapped => "swapped",
            ItemStatus::Expired => "expired",
        }
    }
}

/// Hosted-image descriptor. The upload pipeline itself lives outside this
/// service; clients submit the descriptors the image host returned.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItemImage {
    pub url: String,
    pub public_id: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Item {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub item_type: ItemType,
    pub size: String,
    pub condition: ItemCondition,
    pub brand: Option<String>,
    pub color: String,
    pub material: Option<String>,
    pub points_value: i32,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub images: Json<Vec<ItemImage>>,
    pub status: ItemStatus,
    pub is_available: bool,

    // Moderation fields
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<Uuid>,
    pub rejection_reason: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Item joined with its owner's public identity, for the admin listing.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct ItemWithOwner {
    #[sqlx(flatten)]
    pub item: Item,
    pub owner_name: String,
    pub owner_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_variants_match_wire_format() {
        assert_eq!(
            serde_json::to_value(ItemType::TShirts).unwrap(),
            serde_json::json!("t-shirts")
        );
        assert_eq!(
            serde_json::to_value(ItemCondition::LikeNew).unwrap(),
            serde_json::json!("like-new")
        );
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(ItemStatus::Pending.to_str(), "pending");
        assert_eq!(ItemStatus::Active.to_str(), "active");
        assert_eq!(ItemStatus::Swapped.to_str(), "swapped");
        assert_eq!(ItemCategory::Accessories.to_str(), "accessories");
    }

    #[test]
    fn image_descriptor_defaults_not_primary() {
        let image: ItemImage =
            serde_json::from_str(r#"{"url": "https://img.example/a.jpg", "public_id": "a"}"#)
                .unwrap();
        assert!(!image.is_primary);
    }
}
