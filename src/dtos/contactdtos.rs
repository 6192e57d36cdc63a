use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::contactmodel::{Contact, ContactStatus};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateContactDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1-100 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        custom = "validate_contact_email"
    )]
    pub email: String,

    #[validate(length(min = 1, max = 200, message = "Subject must be between 1-200 characters"))]
    pub subject: String,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Message must be between 1-2000 characters"
    ))]
    pub message: String,
}

// Same acceptance rule the intake form has always used.
fn validate_contact_email(email: &str) -> Result<(), ValidationError> {
    let email_regex = regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|_| ValidationError::new("invalid_email_regex"))?;

    if !email_regex.is_match(email) {
        let mut error = ValidationError::new("invalid_email");
        error.message = Some("Please provide a valid email address".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContactDto {
    pub status: ContactStatus,

    #[validate(length(max = 2000, message = "Admin response cannot exceed 2000 characters"))]
    #[serde(rename = "adminResponse")]
    pub admin_response: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponseDto {
    pub status: String,
    pub message: String,
    pub data: Contact,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactListResponseDto {
    pub status: String,
    pub data: Vec<Contact>,
    pub results: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateContactDto {
        CreateContactDto {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Missing parcel".to_string(),
            message: "My swap never arrived.".to_string(),
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert!(valid_dto().validate().is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        for bad in ["plainaddress", "a b@example.com", "a@b", "@example.com"] {
            let mut dto = valid_dto();
            dto.email = bad.to_string();
            assert!(dto.validate().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn missing_fields_are_rejected() {
        let mut dto = valid_dto();
        dto.subject = String::new();
        assert!(dto.validate().is_err());

        let mut dto = valid_dto();
        dto.message = String::new();
        assert!(dto.validate().is_err());
    }
}
