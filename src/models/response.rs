use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Envelope and error models shared by all API responses
// -------------------------------------------------------------------------------------------------

/// Standard envelope that wraps every response of the customer API
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

/// Error block of a failed API response
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ValidationError>,
}

/// A single field-level validation failure
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Response of GET /health
#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: String,
}
