use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::Account;

use crate::errors::ServiceError;

/// Row-level CRUD over the backing store.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find(&self, id: i32) -> Result<Option<Account>, ServiceError>;
    async fn list(&self) -> Result<Vec<Account>, ServiceError>;
    /// Persist a transient account; the returned copy carries the new id.
    async fn insert(&self, account: Account) -> Result<Account, ServiceError>;
    async fn update(&self, account: Account) -> Result<Account, ServiceError>;
    async fn delete(&self, account: &Account) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn find(&self, id: i32) -> Result<Option<Account>, ServiceError> {
        Ok(Account::find(&self.db, id).await?)
    }

    async fn list(&self) -> Result<Vec<Account>, ServiceError> {
        Ok(Account::all(&self.db).await?)
    }

    async fn insert(&self, mut account: Account) -> Result<Account, ServiceError> {
        account.create(&self.db).await?;
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, ServiceError> {
        account.update(&self.db).await?;
        Ok(account)
    }

    async fn delete(&self, account: &Account) -> Result<(), ServiceError> {
        account.delete(&self.db).await?;
        Ok(())
    }
}
