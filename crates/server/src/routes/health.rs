use axum::Json;

use common::types::{Health, ServiceInfo};

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

#[utoipa::path(
    get, path = "/", tag = "health",
    responses((status = 200, description = "Service name and version", body = crate::openapi::ServiceInfoDoc))
)]
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo::current())
}
