use async_trait::async_trait;
use customer_service::config::{CustomerConfig, HealthConfig, MongoConfig};
use customer_service::models::Customer;
use customer_service::services::{CustomerService, InMemoryCustomerService, StoreError};
use customer_service::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub fn test_config(db_name: &str) -> CustomerConfig {
    CustomerConfig {
        common: CoreConfig {
            port: 0, // Random port
            ..CoreConfig::default()
        },
        mongodb: MongoConfig {
            uri: Secret::new(
                std::env::var("TEST_MONGODB_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            ),
            database: db_name.to_string(),
        },
        health: HealthConfig::default(),
    }
}

pub fn diamond() -> Customer {
    Customer::new("A11")
        .with_vip_status("Diamond")
        .with_balance(1000)
}

pub fn silver() -> Customer {
    Customer::new("A12")
        .with_vip_status("Silver")
        .with_balance(1000)
}

/// A store that is down: every call fails.
pub struct UnavailableCustomerService;

#[async_trait]
impl CustomerService for UnavailableCustomerService {
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn get_customer(&self, _customer_id: &str) -> Result<Option<Customer>, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn add_customer(&self, _customer: Customer) -> Result<String, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Timeout(std::time::Duration::from_millis(1000)))
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application on a random port over an in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(InMemoryCustomerService::new())).await
    }

    pub async fn spawn_with(customers: Arc<dyn CustomerService>) -> Self {
        let app = Application::build_with_service(test_config("unused"), customers)
            .await
            .expect("Failed to build test application");

        Self::start(app).await
    }

    /// Spawn the application against MongoDB (`TEST_MONGODB_URI`).
    pub async fn spawn_with_mongo(db_name: &str) -> Self {
        let app = Application::build(test_config(db_name))
            .await
            .expect("Failed to build test application");

        Self::start(app).await
    }

    async fn start(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server by polling readiness
        let client = reqwest::Client::new();
        let ready_url = format!("{}/health/readiness", address);
        for _ in 0..50 {
            if client.get(&ready_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_customer(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/customer", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
