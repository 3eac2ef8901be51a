use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Response model for health check endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Standardized error response model
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Single field rejected by request validation
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,

    /// Why the field was rejected
    pub message: String,
}

/// Error response carrying a per-field validation breakdown
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,

    /// One entry per rejected field
    pub field_errors: Vec<FieldError>,
}
