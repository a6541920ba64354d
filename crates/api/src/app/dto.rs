use serde::Serialize;

use catalog_products::ValidationErrors;

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Failure body. `errors` only appears when field-level detail is exposed.
#[derive(Debug, Serialize)]
pub struct ErrorResponse<'a> {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<&'a ValidationErrors>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
