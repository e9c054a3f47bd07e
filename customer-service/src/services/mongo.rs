use super::{metrics::record_operation, CustomerService, MongoDb, StoreError};
use crate::models::{Customer, CustomerDocument};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson},
    options::ReplaceOptions,
    Collection,
};
use std::time::Duration;

pub const CUSTOMERS_COLLECTION: &str = "customers";

/// [`CustomerService`] over the `customers` collection.
///
/// Documents are keyed by `_id == customerId`, so saving is a replace-upsert
/// on `_id` and the store enforces identity.
#[derive(Clone)]
pub struct MongoCustomerService {
    db: MongoDb,
    documents: Collection<CustomerDocument>,
    ping_timeout: Duration,
}

impl MongoCustomerService {
    pub fn new(db: MongoDb, ping_timeout: Duration) -> Self {
        let documents = db.database().collection(CUSTOMERS_COLLECTION);
        Self {
            db,
            documents,
            ping_timeout,
        }
    }

    // Reads ignore `_id`, so documents written by other tools with an
    // ObjectId key still deserialize.
    fn customers(&self) -> Collection<Customer> {
        self.documents.clone_with_type()
    }

    async fn find_all(&self) -> Result<Vec<Customer>, StoreError> {
        let cursor = self.customers().find(doc! {}, None).await?;
        let customers: Vec<Customer> = cursor.try_collect().await?;
        Ok(customers)
    }

    async fn find_first(&self, customer_id: &str) -> Result<Option<Customer>, StoreError> {
        let customer = self
            .customers()
            .find_one(doc! { "customerId": customer_id }, None)
            .await?;
        Ok(customer)
    }
}

#[async_trait]
impl CustomerService for MongoCustomerService {
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let result = self.find_all().await;
        record_operation("list", &result);

        match &result {
            Ok(customers) => tracing::debug!(count = customers.len(), "Listed customers"),
            Err(e) => tracing::error!(error = %e, "Failed to list customers"),
        }
        result
    }

    async fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>, StoreError> {
        let result = self.find_first(customer_id).await;
        record_operation("get", &result);

        match &result {
            Ok(found) => tracing::debug!(
                customer_id = %customer_id,
                found = found.is_some(),
                "Looked up customer"
            ),
            Err(e) => tracing::error!(
                customer_id = %customer_id,
                error = %e,
                "Failed to fetch customer"
            ),
        }
        result
    }

    async fn add_customer(&self, customer: Customer) -> Result<String, StoreError> {
        let document = CustomerDocument::from(customer);
        let id = document.id.clone();
        let options = ReplaceOptions::builder().upsert(true).build();

        let result = self
            .documents
            .replace_one(doc! { "_id": id.as_str() }, &document, options)
            .await
            .map(|outcome| match outcome.upserted_id {
                Some(Bson::String(upserted)) => upserted,
                Some(other) => other.to_string(),
                None => id.clone(),
            })
            .map_err(StoreError::from);
        record_operation("add", &result);

        match &result {
            Ok(_) => tracing::info!(customer_id = %id, "Saved customer"),
            Err(e) => tracing::error!(customer_id = %id, error = %e, "Failed to save customer"),
        }
        result
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let result = match tokio::time::timeout(self.ping_timeout, self.db.health_check()).await {
            Ok(outcome) => outcome.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.ping_timeout)),
        };
        record_operation("ping", &result);

        if let Err(e) = &result {
            tracing::warn!(error = %e, "MongoDB ping failed");
        }
        result
    }
}
