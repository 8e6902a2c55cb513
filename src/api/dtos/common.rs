use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response body for API errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error label (e.g. "Not found", "Conflict")
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Stable machine-readable code (e.g. "NOT_FOUND")
    pub code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
