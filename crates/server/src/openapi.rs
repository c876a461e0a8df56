use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ServiceInfoDoc { pub name: String, pub version: String }

/// Request body for create and update.
#[derive(ToSchema)]
pub struct AccountPayloadDoc {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    /// ISO date (`YYYY-MM-DD`); defaults to today on create.
    pub date_joined: Option<String>,
}

#[derive(ToSchema)]
pub struct AccountDoc {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: String,
}

#[derive(ToSchema)]
pub struct ErrorDoc { pub status: u16, pub error: String, pub message: String }

#[derive(OpenApi)]
#[openapi(
    info(title = "Account REST API Service", version = "1.0"),
    paths(
        crate::routes::health::health,
        crate::routes::health::index,
        crate::routes::accounts::create,
        crate::routes::accounts::list,
        crate::routes::accounts::get,
        crate::routes::accounts::update,
        crate::routes::accounts::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceInfoDoc,
            AccountPayloadDoc,
            AccountDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "accounts")
    )
)]
pub struct ApiDoc;
