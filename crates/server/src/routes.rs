use std::sync::Arc;

use axum::{
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use service::{AccountRepository, AccountService};

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::security;

pub mod accounts;
pub mod health;

/// Handles shared by every request, built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub accounts: Arc<AccountService<dyn AccountRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { accounts: Arc::new(AccountService::new(repo)) }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn fallback() -> JsonApiError {
    JsonApiError::new(
        axum::http::StatusCode::NOT_FOUND,
        "Not Found",
        Some(accounts::NOT_FOUND_URL.into()),
    )
}

/// Build the full application router: route table, CORS, security headers and tracing.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/:id",
            get(accounts::get).put(accounts::update).delete(accounts::delete),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(fallback)
        .with_state(state)
        .layer(cors)
        // outermost, so CORS preflights and fallbacks carry the headers too
        .layer(middleware::from_fn(security::security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx 以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
