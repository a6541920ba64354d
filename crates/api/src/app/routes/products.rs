use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Extension, Path,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use catalog_products::ProductInput;

use crate::app::dto::MessageResponse;
use crate::app::errors::{self, Operation};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            put(update_product).patch(update_product).delete(delete_product),
        )
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products.list().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::product_error_to_response(Operation::List, &e, services.status_policy),
    }
}

// Bodies are taken as raw bytes: a malformed, non-object or oversized body must end
// up as a validation failure, not as the extractor's own rejection.
fn input_from(body: Result<Bytes, BytesRejection>) -> ProductInput {
    body.map(|bytes| ProductInput::from_json_slice(&bytes))
        .unwrap_or_default()
}

// An undecodable path segment is passed on as an empty id, which the service
// reports as an invalid id.
fn raw_id(path: Result<Path<String>, PathRejection>) -> String {
    path.map(|Path(id)| id).unwrap_or_default()
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Bytes, BytesRejection>,
) -> axum::response::Response {
    let input = input_from(body);
    match services.products.store(&input).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::product_error_to_response(Operation::Create, &e, services.status_policy),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> axum::response::Response {
    let id = raw_id(path);
    let input = input_from(body);
    match services.products.update(&id, &input).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::product_error_to_response(Operation::Update, &e, services.status_policy),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    path: Result<Path<String>, PathRejection>,
) -> axum::response::Response {
    let id = raw_id(path);
    match services.products.destroy(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Product deleted successfully",
            }),
        )
            .into_response(),
        Err(e) => errors::product_error_to_response(Operation::Delete, &e, services.status_policy),
    }
}
