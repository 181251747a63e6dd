use async_trait::async_trait;
use thiserror::Error;

use clientela_core::domain::customer::{Customer, CustomerDraft, CustomerId};

pub mod customer;
pub mod memory;

pub use customer::SqlCustomerRepository;
pub use memory::InMemoryCustomerRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Translates CRUD intents into storage operations for the customer entity.
///
/// `update` and `delete` report the number of affected rows instead of
/// failing, so the caller decides whether a missing id is an error.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Inserts a new row. The id is storage-assigned and returned; the draft
    /// never carries one.
    async fn add(&self, draft: CustomerDraft) -> Result<CustomerId, RepositoryError>;

    /// Single-row lookup. A missing id is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError>;

    /// Full overwrite of name/email/phone for the row matching the id.
    async fn update(&self, customer: &Customer) -> Result<u64, RepositoryError>;

    async fn delete(&self, id: &CustomerId) -> Result<u64, RepositoryError>;
}
