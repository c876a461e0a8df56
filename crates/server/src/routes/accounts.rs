use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use service::errors::ServiceError;
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::routes::ServerState;

const JSON_MEDIA_TYPE: &str = "application/json";
pub(crate) const NOT_FOUND_URL: &str = "The requested URL was not found on the server.";

/// Reject writes whose `Content-Type` is not exactly `application/json`.
fn check_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    match headers.get(header::CONTENT_TYPE) {
        Some(v) if v.as_bytes() == JSON_MEDIA_TYPE.as_bytes() => Ok(()),
        _ => Err(ApiError::UnsupportedMediaType(format!(
            "Content-Type must be {}",
            JSON_MEDIA_TYPE
        ))),
    }
}

/// Integer account id from the path. Anything that does not parse as an
/// `i32` cannot name an account, so it is a JSON 404 like any unknown route.
pub struct AccountId(pub i32);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AccountId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i32>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(AccountId(id)),
            Err(rejection) => {
                debug!(error = %rejection, "account id did not parse");
                Err(ServiceError::NotFound(NOT_FOUND_URL.into()).into())
            }
        }
    }
}

fn parse_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ServiceError::Validation("No data provided".into()).into());
    }
    serde_json::from_slice(body)
        .map_err(|e| ServiceError::Validation(format!("Invalid JSON body: {}", e)).into())
}

#[utoipa::path(
    post, path = "/accounts", tag = "accounts",
    request_body = crate::openapi::AccountPayloadDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AccountDoc),
        (status = 400, description = "Invalid Account data", body = crate::openapi::ErrorDoc),
        (status = 415, description = "Content-Type must be application/json", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    info!("Request to create an Account");
    check_content_type(&headers)?;
    let payload = parse_body(&body)?;

    let account = state.accounts.create(&payload).await?;
    let id = account
        .id
        .ok_or_else(|| ServiceError::Db("store returned an account without id".into()))?;
    info!(id, "created account");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/accounts/{}", id))],
        Json(account.serialize()),
    ))
}

#[utoipa::path(
    get, path = "/accounts", tag = "accounts",
    responses((status = 200, description = "All accounts", body = [crate::openapi::AccountDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Value>>, ApiError> {
    info!("Request to list Accounts");
    let accounts = state.accounts.list().await?;
    info!(count = accounts.len(), "listed accounts");
    Ok(Json(accounts.iter().map(|a| a.serialize()).collect()))
}

#[utoipa::path(
    get, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i32, Path, description = "Account id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AccountDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    AccountId(id): AccountId,
) -> Result<Json<Value>, ApiError> {
    info!(id, "Request to read an Account");
    let account = state.accounts.get(id).await?;
    Ok(Json(account.serialize()))
}

#[utoipa::path(
    put, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i32, Path, description = "Account id")),
    request_body = crate::openapi::AccountPayloadDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AccountDoc),
        (status = 400, description = "Invalid Account data", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 415, description = "Content-Type must be application/json", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    AccountId(id): AccountId,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    info!(id, "Request to update an Account");
    check_content_type(&headers)?;
    // existence first: an unknown id is a 404 even when the body is bad
    let existing = state.accounts.get(id).await?;
    let payload = parse_body(&body)?;

    let account = state.accounts.update(existing, &payload).await?;
    Ok(Json(account.serialize()))
}

#[utoipa::path(
    delete, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i32, Path, description = "Account id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    AccountId(id): AccountId,
) -> Result<StatusCode, ApiError> {
    info!(id, "Request to delete an Account");
    state.accounts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_content_type(v: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::CONTENT_TYPE, HeaderValue::from_static(v));
        h
    }

    #[test]
    fn only_exact_json_content_type_accepted() {
        assert!(check_content_type(&with_content_type("application/json")).is_ok());
        for v in ["application/json; charset=utf-8", "Application/JSON", "APPLICATION/JSON", "text/json"] {
            let err = check_content_type(&with_content_type(v)).unwrap_err();
            assert!(matches!(err, ApiError::UnsupportedMediaType(_)), "{v}");
        }
    }

    #[test]
    fn other_content_types_rejected() {
        for v in ["text/html", "application/x-www-form-urlencoded", "application/jsonp", ""] {
            let err = check_content_type(&with_content_type(v)).unwrap_err();
            assert!(matches!(err, ApiError::UnsupportedMediaType(_)), "{v}");
        }
        assert!(check_content_type(&HeaderMap::new()).is_err());
    }

    #[test]
    fn blank_or_malformed_body_is_validation_error() {
        for raw in ["", "  \n", "{not json"] {
            let err = parse_body(&Bytes::from(raw)).unwrap_err();
            assert!(matches!(err, ApiError::Service(ServiceError::Validation(_))), "{raw:?}");
        }
        assert_eq!(parse_body(&Bytes::from(r#"{"a":1}"#)).unwrap()["a"], 1);
    }
}
