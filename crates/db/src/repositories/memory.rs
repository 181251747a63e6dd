use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use clientela_core::domain::customer::{Customer, CustomerDraft, CustomerId};

use super::{CustomerRepository, RepositoryError};

/// In-memory stand-in for the SQL gateway, used by service tests. Ids are
/// assigned from a monotonically increasing counter, mirroring the
/// auto-increment behavior of the real store; the ordered map keeps
/// `list_all` in insertion order.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<BTreeMap<i64, Customer>>,
    next_id: AtomicI64,
}

#[async_trait::async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn add(&self, draft: CustomerDraft) -> Result<CustomerId, RepositoryError> {
        let numeric_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = CustomerId(numeric_id.to_string());

        let mut customers = self.customers.write().await;
        customers.insert(numeric_id, Customer::from_draft(id.clone(), draft));
        Ok(id)
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let Ok(numeric_id) = id.0.parse::<i64>() else {
            return Ok(None);
        };

        let customers = self.customers.read().await;
        Ok(customers.get(&numeric_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let customers = self.customers.read().await;
        Ok(customers.values().cloned().collect())
    }

    async fn update(&self, customer: &Customer) -> Result<u64, RepositoryError> {
        let Ok(numeric_id) = customer.id.0.parse::<i64>() else {
            return Ok(0);
        };

        let mut customers = self.customers.write().await;
        match customers.get_mut(&numeric_id) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &CustomerId) -> Result<u64, RepositoryError> {
        let Ok(numeric_id) = id.0.parse::<i64>() else {
            return Ok(0);
        };

        let mut customers = self.customers.write().await;
        Ok(customers.remove(&numeric_id).map(|_| 1).unwrap_or(0))
    }
}
