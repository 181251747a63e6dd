use thiserror::Error;
use tracing::{info, warn};

use clientela_core::domain::customer::{Customer, CustomerDraft, CustomerId};
use clientela_core::validation::{CustomerValidator, ValidationError, Validator};
use clientela_db::repositories::{CustomerRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage failure: {0}")]
    Storage(#[from] RepositoryError),
    #[error("customer not found: {id}")]
    NotFound { id: CustomerId },
}

/// CRUD façade over the customer gateway. Enforces the one mandatory call
/// sequence in the system: no entity reaches storage without passing
/// validation first. Stateless; safe to share across callers.
pub struct CustomerService<R> {
    repository: R,
    validator: CustomerValidator,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository, validator: CustomerValidator::new() }
    }

    /// Validates the draft and inserts it. Returns the storage-assigned id.
    pub async fn add(&self, draft: CustomerDraft) -> Result<CustomerId, ServiceError> {
        self.validator.validate(&draft)?;
        let id = self.repository.add(draft).await?;
        info!(customer_id = %id, "customer added");
        Ok(id)
    }

    /// Validates the customer and overwrites the row matching its id. A
    /// missing id is reported as `NotFound` rather than silently succeeding.
    pub async fn update(&self, customer: &Customer) -> Result<(), ServiceError> {
        self.validator.validate(customer)?;
        let affected = self.repository.update(customer).await?;
        if affected == 0 {
            warn!(customer_id = %customer.id, "update targeted a customer that does not exist");
            return Err(ServiceError::NotFound { id: customer.id.clone() });
        }
        info!(customer_id = %customer.id, "customer updated");
        Ok(())
    }

    /// Removes the row matching the id. Deleting an absent customer is a
    /// no-op, not an error: the end state is the same either way.
    pub async fn delete(&self, id: &CustomerId) -> Result<(), ServiceError> {
        let affected = self.repository.delete(id).await?;
        info!(customer_id = %id, affected, "customer delete executed");
        Ok(())
    }

    /// Lookup by id. No match is `Ok(None)`; the caller checks explicitly.
    pub async fn get(&self, id: &CustomerId) -> Result<Option<Customer>, ServiceError> {
        let found = self.repository.find_by_id(id).await?;
        if found.is_none() {
            warn!(customer_id = %id, "customer not found");
        }
        Ok(found)
    }

    pub async fn get_all(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.repository.list_all().await?)
    }
}
