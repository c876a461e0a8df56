use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Payload could not be turned into an account (missing key, wrong type, bad value).
    #[error("Invalid Account: {0}")]
    Data(String),
    #[error("account has no id; it must be created before {0}")]
    Transient(&'static str),
    #[error("account {0} is already persisted")]
    Persisted(i32),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// True for failures caused by client-supplied data.
    pub fn is_data(&self) -> bool {
        matches!(self, ModelError::Data(_))
    }
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self {
        ModelError::Db(e.to_string())
    }
}
