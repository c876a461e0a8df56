//! Service layer providing the account lifecycle on top of `models`.
//! - `AccountRepository` is the backing-store seam (SeaORM or in-memory).
//! - `AccountService` owns the create/read/update/delete rules the HTTP layer relies on.

pub mod errors;
pub mod account;
#[cfg(test)]
pub mod test_support;

pub use account::{
    memory::InMemoryAccountRepository,
    repository::{AccountRepository, SeaOrmAccountRepository},
    service::AccountService,
};
