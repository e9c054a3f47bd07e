//! Application startup and lifecycle management.

use crate::config::CustomerConfig;
use crate::handlers;
use crate::services::{CustomerService, MongoCustomerService, MongoDb};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{extract_request_id, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerService>,
}

impl AppState {
    pub fn new(customers: Arc<dyn CustomerService>) -> Self {
        Self { customers }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/customers", get(handlers::customers::list_customers))
        .route("/customer", post(handlers::customers::add_customer))
        .route(
            "/customer/:customer_id",
            get(handlers::customers::get_customer),
        )
        .route("/health/liveness", get(handlers::health::liveness))
        .route("/health/readiness", get(handlers::health::readiness))
        .route("/metrics", get(handlers::health::metrics))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = extract_request_id(request.headers()).unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Connect to MongoDB and build the application around it.
    pub async fn build(config: CustomerConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(
            config.mongodb.uri.expose_secret(),
            &config.mongodb.database,
        )
        .await?;

        let customers = MongoCustomerService::new(db, config.health.ping_timeout());

        Self::build_with_service(config, Arc::new(customers)).await
    }

    /// Build the application around an already constructed service.
    pub async fn build_with_service(
        config: CustomerConfig,
        customers: Arc<dyn CustomerService>,
    ) -> Result<Self, AppError> {
        // Port 0 binds a random port
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Customer service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(AppState::new(customers)),
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
