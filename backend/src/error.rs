use thiserror::Error;

use crate::directions::BackendError;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid route request: {0}")]
    Validation(String),
    #[error("No route found")]
    NoRoute,
    #[error("route planning was cancelled")]
    Cancelled,
}

/// Startup failures of the service binary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to build directions client: {0}")]
    Backend(#[from] BackendError),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
