use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes::{self, ServerState};
use service::{AccountRepository, InMemoryAccountRepository, SeaOrmAccountRepository};

struct TestApp {
    base_url: String,
}

async fn spawn_app(repo: Arc<dyn AccountRepository>) -> anyhow::Result<TestApp> {
    let app: Router = routes::build_router(ServerState::new(repo), server::startup::build_cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

/// Postgres-backed app, or `None` when no database is configured.
async fn spawn_db_app() -> anyhow::Result<Option<TestApp>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip postgres e2e");
        return Ok(None);
    }
    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await { eprintln!("migrations notice: {}", e); }
    Ok(Some(spawn_app(Arc::new(SeaOrmAccountRepository::new(db))).await?))
}

/// The create → read → update → delete walk shared by both backends.
async fn account_walk(app: &TestApp) -> anyhow::Result<()> {
    let c = reqwest::Client::new();
    let email = format!("jim_{}@example.com", Uuid::new_v4().simple());

    let res = c.post(format!("{}/accounts", app.base_url))
        .json(&json!({"name": "Jim", "email": email, "address": "123 Main St", "phone_number": "555-1212"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let location = res.headers().get("location").and_then(|v| v.to_str().ok()).map(str::to_owned);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_i64().expect("integer id");
    assert_eq!(location, Some(format!("/accounts/{}", id)));
    assert_eq!(created["name"], "Jim");
    assert_eq!(created["email"], email.as_str());

    let res = c.get(format!("{}/accounts/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, created);

    let res = c.put(format!("{}/accounts/{}", app.base_url, id))
        .json(&json!({"name": "Jim", "email": email, "address": "742 Evergreen Terrace"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["address"], "742 Evergreen Terrace");

    let res = c.delete(format!("{}/accounts/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(format!("{}/accounts/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_in_memory_account_walk() -> anyhow::Result<()> {
    let app = spawn_app(Arc::new(InMemoryAccountRepository::new())).await?;
    account_walk(&app).await
}

#[tokio::test]
async fn e2e_public_endpoints() -> anyhow::Result<()> {
    let app = spawn_app(Arc::new(InMemoryAccountRepository::new())).await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?["status"], "OK");

    let res = c.get(format!("{}/accounts/999999", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.post(format!("{}/accounts", app.base_url))
        .header("content-type", "text/html")
        .body("<p>hi</p>")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNSUPPORTED_MEDIA_TYPE);
    Ok(())
}

#[tokio::test]
async fn e2e_postgres_account_walk() -> anyhow::Result<()> {
    let Some(app) = spawn_db_app().await? else { return Ok(()) };
    account_walk(&app).await?;

    let res = reqwest::get(format!("{}/accounts/{}", app.base_url, i32::MAX)).await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
