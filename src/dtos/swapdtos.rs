use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::swapmodel::{SwapRequest, SwapStatus};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateSwapDto {
    #[serde(rename = "requestedItem")]
    pub requested_item: Uuid,

    /// Omitted for a points redemption.
    #[serde(rename = "offeredItem")]
    pub offered_item: Option<Uuid>,

    #[validate(length(max = 500, message = "Message cannot exceed 500 characters"))]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SwapQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
    pub status: Option<SwapStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwapResponseDto {
    pub status: String,
    pub data: SwapRequest,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwapListResponseDto {
    pub status: String,
    pub data: Vec<SwapRequest>,
    pub results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlong_message_is_rejected() {
        let dto = CreateSwapDto {
            requested_item: Uuid::new_v4(),
            offered_item: None,
            message: Some("m".repeat(501)),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn offered_item_is_optional_on_the_wire() {
        let dto: CreateSwapDto = serde_json::from_str(&format!(
            r#"{{"requestedItem": "{}"}}"#,
            Uuid::new_v4()
        ))
        .unwrap();
        assert!(dto.offered_item.is_none());
        assert!(dto.validate().is_ok());
    }
}
