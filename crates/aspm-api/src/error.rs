//! Error types for the ASPM API service.

use thiserror::Error;

/// Errors raised by the process lifecycle.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The termination signal listener could not be installed
    #[error("failed to register termination signal listener: {0}")]
    SignalRegistration(#[source] std::io::Error),

    /// The application entry point returned an error; always fatal
    #[error("application entry point failed: {0:#}")]
    EntryPoint(anyhow::Error),
}

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
