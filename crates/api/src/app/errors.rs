use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use catalog_infra::StatusPolicy;
use catalog_products::ValidationErrors;

use crate::app::dto::ErrorResponse;
use crate::app::services::ProductError;

/// The product operation a failure belongs to; picks the fixed client message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch products",
            Operation::Create => "Failed to create product",
            Operation::Update => "Failed to update product",
            Operation::Delete => "Failed to delete product",
        }
    }
}

/// Map an operation failure to a response.
///
/// The error detail never reaches the client; it has already been logged by the
/// service. Only the status (and, under `Precise`, validation field messages)
/// depends on the error kind.
pub fn product_error_to_response(
    op: Operation,
    err: &ProductError,
    policy: StatusPolicy,
) -> Response {
    match policy {
        StatusPolicy::Legacy => json_error(StatusCode::INTERNAL_SERVER_ERROR, op, None),
        StatusPolicy::Precise => match err {
            ProductError::Validation(fields) => {
                json_error(StatusCode::UNPROCESSABLE_ENTITY, op, Some(fields))
            }
            ProductError::NotFound(_) | ProductError::InvalidId(_) => {
                json_error(StatusCode::NOT_FOUND, op, None)
            }
            ProductError::Store(_) => json_error(StatusCode::INTERNAL_SERVER_ERROR, op, None),
        },
    }
}

pub fn json_error(
    status: StatusCode,
    op: Operation,
    errors: Option<&ValidationErrors>,
) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: op.failure_message(),
            errors,
        }),
    )
        .into_response()
}
