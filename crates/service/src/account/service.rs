use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use models::Account;

use crate::account::repository::AccountRepository;
use crate::errors::ServiceError;

/// Account lifecycle rules shared by every transport.
///
/// Existence is always checked with an explicit lookup before a mutation, so
/// an unknown id surfaces as `NotFound` and never as a store failure. `update`
/// takes the account the caller already looked up with `get`.
pub struct AccountService<R: AccountRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: AccountRepository + ?Sized> AccountService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip_all)]
    pub async fn create(&self, payload: &Value) -> Result<Account, ServiceError> {
        if is_empty_payload(payload) {
            return Err(ServiceError::Validation("No data provided".into()));
        }
        let mut account = Account::default();
        account.deserialize(payload)?;
        let created = self.repo.insert(account).await?;
        info!(id = ?created.id, "account created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<Account, ServiceError> {
        self.repo
            .find(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", id))
    }

    pub async fn list(&self) -> Result<Vec<Account>, ServiceError> {
        self.repo.list().await
    }

    #[instrument(skip_all, fields(id = ?account.id))]
    pub async fn update(&self, mut account: Account, payload: &Value) -> Result<Account, ServiceError> {
        if is_empty_payload(payload) {
            return Err(ServiceError::Validation("No data provided".into()));
        }
        account.deserialize(payload)?;
        let updated = self.repo.update(account).await?;
        info!("account updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let account = self.get(id).await?;
        self.repo.delete(&account).await?;
        info!("account deleted");
        Ok(())
    }
}

fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(m) => m.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
