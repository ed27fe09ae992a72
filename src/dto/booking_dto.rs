use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::BookingStatus;
use crate::utils::validation::validate_phone;

// Raw booking form as posted by the site. Every field is optional here so a
// missing value becomes a "Missing required fields" answer instead of a
// deserialization rejection. Unknown keys such as `status` are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookingSubmission {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub vehicle_id: Option<String>,
    pub vehicle_name: Option<String>,
    pub rental_type: Option<String>,
    pub pickup_date: Option<String>,
    pub return_date: Option<String>,
    pub pickup_location: Option<String>,
    pub message: Option<String>,
}

// Raw contact form
#[derive(Debug, Default, Clone, Deserialize)]
pub struct InquirySubmission {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub vehicle_id: Option<String>,
    pub rental_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub message: Option<String>,
}

/// Booking fields after the presence check, ready for format validation
#[derive(Debug, Validate)]
pub struct BookingForm {
    #[validate(length(min = 2, max = 100, message = "must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub pickup_location: Option<String>,

    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub message: Option<String>,
}

/// Inquiry fields after the presence check
#[derive(Debug, Validate)]
pub struct InquiryForm {
    #[validate(length(min = 2, max = 100, message = "must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 10, max = 2000, message = "must be between 10 and 2000 characters"))]
    pub message: String,
}

// Booking accepted
#[derive(Debug, Serialize)]
pub struct BookingAccepted {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

// Inquiry accepted
#[derive(Debug, Serialize)]
pub struct InquiryAccepted {
    pub success: bool,
    pub message: String,
}

// Lifecycle transition requested by the admin
#[derive(Debug, Deserialize)]
pub struct StatusTransitionRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BookingForm {
        BookingForm {
            name: "Ahmed Rahman".to_string(),
            phone: "+880171234567".to_string(),
            email: "ahmed@example.com".to_string(),
            pickup_location: None,
            message: None,
        }
    }

    #[test]
    fn test_valid_booking_form() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_booking_form_field_errors() {
        let mut bad = form();
        bad.name = "A".to_string();
        bad.email = "not-an-email".to_string();
        bad.phone = "12345".to_string();

        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
    }

    #[test]
    fn test_inquiry_message_minimum() {
        let inquiry = InquiryForm {
            name: "Nadia Islam".to_string(),
            phone: "01712345678".to_string(),
            email: "nadia@example.com".to_string(),
            message: "too short".to_string(),
        };
        let errors = inquiry.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("message"));
    }

    #[test]
    fn test_submission_ignores_client_status() {
        let submission: BookingSubmission = serde_json::from_str(
            r#"{"name":"Ahmed Rahman","status":"confirmed","pickup_date":"2026-01-05"}"#,
        )
        .unwrap();
        assert_eq!(submission.name.as_deref(), Some("Ahmed Rahman"));
        assert!(submission.email.is_none());
    }
}
