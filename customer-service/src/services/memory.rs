use super::{CustomerService, StoreError};
use crate::models::Customer;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-process [`CustomerService`] keyed by `customerId`.
///
/// Same upsert and not-found behavior as the MongoDB implementation; used to
/// run the HTTP layer without a database.
#[derive(Default)]
pub struct InMemoryCustomerService {
    customers: Mutex<HashMap<String, Customer>>,
}

impl InMemoryCustomerService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let map = customers
            .into_iter()
            .map(|customer| (customer.customer_id.clone(), customer))
            .collect();
        Self {
            customers: Mutex::new(map),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Customer>>, StoreError> {
        self.customers
            .lock()
            .map_err(|e| StoreError::Backend(format!("customer map mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl CustomerService for InMemoryCustomerService {
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    async fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>, StoreError> {
        Ok(self.lock()?.get(customer_id).cloned())
    }

    async fn add_customer(&self, customer: Customer) -> Result<String, StoreError> {
        let id = customer.customer_id.clone();
        self.lock()?.insert(id.clone(), customer);
        Ok(id)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
