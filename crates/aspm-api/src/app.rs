//! The ASPM API application task.

use crate::config::ServiceConfig;
use crate::lifecycle::{Application, Cancellation};
use async_trait::async_trait;
use tracing::info;

/// Service application. Idles until cancelled; request handling is mounted here.
#[derive(Debug, Clone)]
pub struct AspmApi {
    config: ServiceConfig,
}

impl AspmApi {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[async_trait]
impl Application for AspmApi {
    const NAME: &'static str = "aspm-api";

    async fn run(self, cancellation: Cancellation) -> anyhow::Result<()> {
        info!(service = %self.config.name, "service running");
        cancellation.cancelled().await;
        info!(service = %self.config.name, "service stopped");
        Ok(())
    }
}
