//! HTTP façade over [`CustomerService`](crate::services::CustomerService).

pub mod customers;
pub mod health;

use crate::services::StoreError;
use service_core::error::AppError;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Timeout(_) => AppError::ServiceUnavailable,
            StoreError::Database(e) => AppError::DatabaseError(e.into()),
            StoreError::Backend(msg) => AppError::DatabaseError(anyhow::anyhow!(msg)),
        }
    }
}
