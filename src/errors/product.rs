use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::types::dto::common::{ErrorResponse, FieldError, ValidationErrorResponse};

/// Product endpoint error types
#[derive(ApiResponse, Debug)]
pub enum ProductError {
    /// Request payload failed validation
    #[oai(status = 400)]
    Validation(Json<ValidationErrorResponse>),

    /// No product with the given id
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ProductError {
    /// Create a Validation error from per-field violations
    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        ProductError::Validation(Json(ValidationErrorResponse {
            error: "validation_failed".to_string(),
            message: "Product validation failed".to_string(),
            status_code: 400,
            field_errors,
        }))
    }

    /// Create a NotFound error
    pub fn not_found(id: &str) -> Self {
        ProductError::NotFound(Json(ErrorResponse {
            error: "product_not_found".to_string(),
            message: format!("Product not found with id: {}", id),
            status_code: 404,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        ProductError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ProductError::Validation(json) => json.0.message.clone(),
            ProductError::NotFound(json) => json.0.message.clone(),
            ProductError::InternalError(json) => json.0.message.clone(),
        }
    }

    /// Get the per-field violations for a Validation error
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ProductError::Validation(json) => &json.0.field_errors,
            _ => &[],
        }
    }
}

impl fmt::Display for ProductError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
