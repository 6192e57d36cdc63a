use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::itemmodel::{Item, ItemCategory, ItemCondition, ItemImage, ItemType};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemDto {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1-100 characters"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description must be between 1-2000 characters"
    ))]
    pub description: String,

    pub category: ItemCategory,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    #[validate(length(min = 1, max = 20, message = "Size must be between 1-20 characters"))]
    pub size: String,

    pub condition: ItemCondition,

    #[validate(length(max = 50, message = "Brand cannot exceed 50 characters"))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 30, message = "Color must be between 1-30 characters"))]
    pub color: String,

    #[validate(length(max = 100, message = "Material cannot exceed 100 characters"))]
    pub material: Option<String>,

    #[validate(range(min = 1, max = 1000, message = "Points value must be between 1 and 1000"))]
    #[serde(rename = "pointsValue")]
    pub points_value: i32,

    #[validate(length(max = 100, message = "Location cannot exceed 100 characters"))]
    pub location: Option<String>,

    #[validate(custom = "validate_tags")]
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub images: Vec<ItemImage>,
}

fn validate_tags(tags: &Vec<String>) -> Result<(), ValidationError> {
    if tags.len() > 10 {
        return Err(ValidationError::new("too_many_tags"));
    }
    for tag in tags {
        if tag.is_empty() || tag.len() > 20 {
            let mut error = ValidationError::new("invalid_tag");
            error.message = Some("Each tag must be between 1-20 characters".into());
            return Err(error);
        }
    }
    Ok(())
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateItemDto {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1-100 characters"))]
    pub title: Option<String>,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description must be between 1-2000 characters"
    ))]
    pub description: Option<String>,

    pub category: Option<ItemCategory>,

    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,

    #[validate(length(min = 1, max = 20, message = "Size must be between 1-20 characters"))]
    pub size: Option<String>,

    pub condition: Option<ItemCondition>,

    #[validate(length(max = 50, message = "Brand cannot exceed 50 characters"))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 30, message = "Color must be between 1-30 characters"))]
    pub color: Option<String>,

    #[validate(length(max = 100, message = "Material cannot exceed 100 characters"))]
    pub material: Option<String>,

    #[validate(range(min = 1, max = 1000, message = "Points value must be between 1 and 1000"))]
    #[serde(rename = "pointsValue")]
    pub points_value: Option<i32>,

    #[validate(length(max = 100, message = "Location cannot exceed 100 characters"))]
    pub location: Option<String>,

    #[validate(custom = "validate_tags")]
    pub tags: Option<Vec<String>>,

    pub images: Option<Vec<ItemImage>>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ItemQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
    pub category: Option<ItemCategory>,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub size: Option<String>,
    pub condition: Option<ItemCondition>,
    pub search: Option<String>,
    #[serde(rename = "minPoints")]
    pub min_points: Option<i32>,
    #[serde(rename = "maxPoints")]
    pub max_points: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponseDto {
    pub status: String,
    pub data: Item,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemListResponseDto {
    pub status: String,
    pub data: Vec<Item>,
    pub results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateItemDto {
        CreateItemDto {
            title: "Classic Blue Denim Jacket".to_string(),
            description: "A timeless denim jacket in perfect condition.".to_string(),
            category: ItemCategory::Men,
            item_type: ItemType::Jackets,
            size: "M".to_string(),
            condition: ItemCondition::Excellent,
            brand: Some("Levi's".to_string()),
            color: "Blue".to_string(),
            material: Some("Denim".to_string()),
            points_value: 75,
            location: Some("New York".to_string()),
            tags: vec!["denim".to_string(), "jacket".to_string()],
            images: vec![],
        }
    }

    #[test]
    fn valid_item_passes() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn points_value_bounds_are_enforced() {
        let mut dto = valid_dto();
        dto.points_value = 0;
        assert!(dto.validate().is_err());
        dto.points_value = 1001;
        assert!(dto.validate().is_err());
        dto.points_value = 1000;
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn overlong_tag_is_rejected() {
        let mut dto = valid_dto();
        dto.tags = vec!["a-tag-that-is-way-too-long-to-accept".to_string()];
        assert!(dto.validate().is_err());
    }

    #[test]
    fn type_field_uses_wire_name() {
        let json = serde_json::to_value(valid_dto()).unwrap();
        assert_eq!(json["type"], serde_json::json!("jackets"));
        assert_eq!(json["pointsValue"], serde_json::json!(75));
    }
}
