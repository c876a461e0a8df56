

use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use migration::MigratorTrait;

use crate::db::{connect_with_config, DatabaseConfig};

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Connection for DB-backed tests, or `None` when no database is configured.
pub(crate) async fn test_db() -> anyhow::Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let cfg = DatabaseConfig::from_env();

    // Each #[tokio::test] has its own runtime, so migrate once with a throwaway pool
    MIGRATED
        .get_or_try_init(|| async {
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    Ok(Some(connect_with_config(&cfg).await?))
}
