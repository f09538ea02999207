//! Tracing subscriber setup.

use crate::config::LoggingConfig;
use crate::error::{ServiceError, ServiceResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` when set, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> ServiceResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| ServiceError::Logging(format!("invalid log level '{}': {}", config.level, e))),
    }
}

/// Install the global subscriber, plain or JSON.
pub fn init(config: &LoggingConfig) -> ServiceResult<()> {
    let env_filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    installed.map_err(|e| ServiceError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_level() {
        let config = LoggingConfig {
            level: "aspm_api=debug,info".into(),
            json: false,
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig::default();
        let _ = init(&config);
        assert!(matches!(init(&config), Err(ServiceError::Logging(_))));
    }
}
