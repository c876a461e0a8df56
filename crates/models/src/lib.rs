pub mod errors;
pub mod db;
pub mod account;

pub use account::Account;

#[cfg(test)]
mod tests;
