mod common;

use common::{diamond, silver, TestApp, UnavailableCustomerService};
use customer_service::models::Customer;
use customer_service::services::InMemoryCustomerService;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test]
async fn post_customer_returns_201_with_empty_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post_customer(&json!({ "customerId": "A11", "vipStatus": "Diamond", "balance": 1000 }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn posted_customer_can_be_fetched() {
    let app = TestApp::spawn().await;
    app.post_customer(&json!({ "customerId": "A11", "vipStatus": "Diamond", "balance": 1000 }))
        .await;

    let response = app.get("/customer/A11").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.headers()["content-type"], "application/json");
    let customer: Customer = response.json().await.expect("Failed to parse JSON");
    assert_eq!(customer, diamond());
}

#[tokio::test]
async fn unknown_customer_is_404() {
    let app = TestApp::spawn().await;

    let response = app.get("/customer/A99").await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn list_returns_all_customers() {
    let app = TestApp::spawn_with(Arc::new(InMemoryCustomerService::with_customers([
        diamond(),
        silver(),
    ])))
    .await;

    let response = app.get("/customers").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.headers()["content-type"], "application/json");
    let customers: Vec<Customer> = response.json().await.expect("Failed to parse JSON");
    let ids: HashSet<String> = customers.into_iter().map(|c| c.customer_id).collect();
    assert_eq!(ids, HashSet::from(["A11".to_string(), "A12".to_string()]));
}

#[tokio::test]
async fn empty_store_lists_empty_array() {
    let app = TestApp::spawn().await;

    let response = app.get("/customers").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn reposting_same_id_replaces_the_record() {
    let app = TestApp::spawn().await;
    app.post_customer(&json!({ "customerId": "A11", "vipStatus": "Diamond", "balance": 1000 }))
        .await;
    app.post_customer(&json!({ "customerId": "A11", "vipStatus": "Bronze" }))
        .await;

    let customers: Vec<Customer> = app.get("/customers").await.json().await.unwrap();

    assert_eq!(customers, vec![Customer::new("A11").with_vip_status("Bronze")]);
}

#[tokio::test]
async fn post_without_customer_id_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_customer(&json!({ "vipStatus": "Gold", "balance": 5 }))
        .await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn post_with_empty_customer_id_is_422() {
    let app = TestApp::spawn().await;

    let response = app.post_customer(&json!({ "customerId": "" })).await;

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn store_failure_is_server_error() {
    let app = TestApp::spawn_with(Arc::new(UnavailableCustomerService)).await;

    let list = app.get("/customers").await;
    assert_eq!(list.status().as_u16(), 500);
    let body: serde_json::Value = list.json().await.unwrap();
    assert_eq!(body["error"], "Database error");

    let get = app.get("/customer/A11").await;
    assert_eq!(get.status().as_u16(), 500);

    let post = app.post_customer(&json!({ "customerId": "A11" })).await;
    assert_eq!(post.status().as_u16(), 500);
}
