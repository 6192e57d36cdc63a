use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum PointsError {
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Insufficient points: required {required}, available {available}")]
    InsufficientPoints { required: i32, available: i32 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<PointsError> for HttpError {
    fn from(error: PointsError) -> Self {
        match error {
            PointsError::UserNotFound(_) => HttpError::not_found(error.to_string()),
            PointsError::InsufficientPoints { .. } => HttpError::bad_request(error.to_string()),
            PointsError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}

impl PointsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PointsError::UserNotFound(_) => StatusCode::NOT_FOUND,
            PointsError::InsufficientPoints { .. } => StatusCode::BAD_REQUEST,
            PointsError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_http_mapping() {
        let not_found = PointsError::UserNotFound(Uuid::new_v4());
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(HttpError::from(not_found).status, StatusCode::NOT_FOUND);

        let broke = PointsError::InsufficientPoints {
            required: 75,
            available: 20,
        };
        assert_eq!(broke.status_code(), StatusCode::BAD_REQUEST);
        let http: HttpError = broke.into();
        assert_eq!(http.status, StatusCode::BAD_REQUEST);
        assert!(http.message.contains("required 75"));
    }
}
