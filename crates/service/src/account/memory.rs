use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use models::Account;

use crate::account::repository::AccountRepository;
use crate::errors::ServiceError;

#[derive(Default)]
struct Rows {
    next_id: i32,
    by_id: BTreeMap<i32, Account>,
}

/// Process-local repository with the same contract as the SeaORM one.
///
/// Ids start at 1 and are never reused, mirroring a `SERIAL` column.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    inner: Arc<RwLock<Rows>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find(&self, id: i32) -> Result<Option<Account>, ServiceError> {
        Ok(self.inner.read().await.by_id.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, ServiceError> {
        Ok(self.inner.read().await.by_id.values().cloned().collect())
    }

    async fn insert(&self, mut account: Account) -> Result<Account, ServiceError> {
        if let Some(id) = account.id {
            return Err(ServiceError::Db(format!("account {} is already persisted", id)));
        }
        let mut rows = self.inner.write().await;
        rows.next_id += 1;
        let id = rows.next_id;
        account.id = Some(id);
        rows.by_id.insert(id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, ServiceError> {
        let id = account
            .id
            .ok_or_else(|| ServiceError::Db("account has no id; it must be created before update".into()))?;
        let mut rows = self.inner.write().await;
        match rows.by_id.get_mut(&id) {
            Some(slot) => {
                *slot = account.clone();
                Ok(account)
            }
            None => Err(ServiceError::Db(format!("no row updated for account {}", id))),
        }
    }

    async fn delete(&self, account: &Account) -> Result<(), ServiceError> {
        if let Some(id) = account.id {
            self.inner.write().await.by_id.remove(&id);
        }
        Ok(())
    }
}
