//! Customer data access.
//!
//! [`CustomerService`] is the contract the HTTP layer talks to. It knows
//! nothing about HTTP: "not found" is `Ok(None)`, store failures come back as
//! [`StoreError`] untouched.

pub mod database;
pub mod memory;
pub mod metrics;
pub mod mongo;

use crate::models::Customer;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use database::MongoDb;
pub use memory::InMemoryCustomerService;
pub use self::metrics::{get_metrics, init_metrics};
pub use mongo::MongoCustomerService;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),

    #[error("Store did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Store backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Every stored customer, in whatever order the store yields them.
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError>;

    /// The first customer whose `customerId` matches, or `None`.
    async fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>, StoreError>;

    /// Upsert by `customerId`, replacing any existing record in full.
    /// Returns an opaque save identifier.
    async fn add_customer(&self, customer: Customer) -> Result<String, StoreError>;

    /// Liveness probe. Must fail rather than hang when the store is gone.
    async fn ping(&self) -> Result<(), StoreError>;
}
