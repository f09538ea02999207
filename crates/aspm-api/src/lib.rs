//! ASPM API service shell.
//!
//! Wires process termination (`SIGTERM`) to a cancellation signal, runs the
//! application task under it, and returns once termination is requested.
//!
//! ```no_run
//! use aspm_api::{AspmApi, Lifecycle, ServiceConfig};
//!
//! # async fn start() -> Result<(), aspm_api::LifecycleError> {
//! Lifecycle::from_sigterm()?
//!     .run(AspmApi::new(ServiceConfig::default()))
//!     .await;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod logging;

pub use app::AspmApi;
pub use config::{LoggingConfig, ServiceConfig};
pub use error::{LifecycleError, ServiceError, ServiceResult};
pub use lifecycle::{
    cancellation, Application, Cancellation, Canceller, Lifecycle, SigTerm, TerminationSource,
};
