//! Conformance test runner.
//!
//! Runs the selected checks against every registered message and collects the
//! results into a [`ConformanceReport`]. A failing check never stops the run.

use crate::checks;
use crate::registry::{MessageRegistry, RegisteredMessage};
use crate::report::{ConformanceReport, MessageReport};
use crate::types::{CheckId, CheckResult, ConformanceConfig};
use chrono::Utc;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, info_span, warn};

/// Runs message conformance checks.
#[derive(Debug, Clone, Default)]
pub struct ConformanceRunner {
    config: Arc<ConformanceConfig>,
}

impl ConformanceRunner {
    /// Create a runner with default config (all checks, no known namespaces).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConformanceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ConformanceConfig {
        &self.config
    }

    /// Run one check against one registered message.
    pub fn run_check(&self, check: CheckId, entry: &RegisteredMessage) -> CheckResult {
        let result = checks::run_check(check, entry, &self.config);

        for failure in &result.failures {
            warn!(check = %check, key = entry.key(), "{}", failure);
        }
        for note in &result.observations {
            info!(check = %check, key = entry.key(), "{}", note);
        }
        if result.passed {
            debug!(check = %check, key = entry.key(), "check passed");
        }
        result
    }

    /// Run every selected check against one message, in canonical order.
    pub fn run_message(&self, entry: &RegisteredMessage) -> MessageReport {
        let span = info_span!("conformance", key = entry.key());
        let _guard = span.enter();

        let results = self
            .config
            .selected_checks()
            .into_iter()
            .map(|check| self.run_check(check, entry))
            .collect();
        MessageReport::from_results(entry.key(), entry.type_name(), results)
    }

    /// Run every registered message, in registry order.
    pub fn run_all(&self, registry: &MessageRegistry) -> ConformanceReport {
        let started_at = Utc::now();
        let messages = registry
            .iter()
            .map(|entry| self.run_message(entry))
            .collect();
        let report = ConformanceReport::from_messages(messages, started_at, Utc::now());
        info!(summary = %report.summary, "conformance run complete");
        report
    }

    /// Like [`run_all`](Self::run_all), with messages checked in parallel on
    /// the blocking pool. The report keeps registry order.
    pub async fn run_concurrent(
        &self,
        registry: Arc<MessageRegistry>,
    ) -> Result<ConformanceReport, JoinError> {
        let started_at = Utc::now();
        let mut tasks = JoinSet::new();
        for index in 0..registry.len() {
            let runner = self.clone();
            let registry = Arc::clone(&registry);
            tasks.spawn_blocking(move || {
                let report = registry.get(index).map(|entry| runner.run_message(entry));
                (index, report)
            });
        }

        let mut slots: Vec<Option<MessageReport>> = vec![None; registry.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, report) = joined?;
            slots[index] = report;
        }

        let messages = slots.into_iter().flatten().collect();
        let report = ConformanceReport::from_messages(messages, started_at, Utc::now());
        info!(summary = %report.summary, "concurrent conformance run complete");
        Ok(report)
    }

    /// Run everything and panic with the text report if a hard check failed.
    pub fn assert_conformant(&self, registry: &MessageRegistry) -> ConformanceReport {
        let report = self.run_all(registry);
        if !report.all_passed() {
            panic!("message conformance failed\n{}", report);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::MessageDescriptor;
    use prost_types::DescriptorProto;

    #[derive(Clone, PartialEq, prost::Message)]
    struct Token {
        #[prost(string, tag = "1")]
        value: String,
    }

    fn descriptor(name: &str) -> MessageDescriptor {
        MessageDescriptor::new(
            "auth.v1",
            DescriptorProto {
                name: Some(name.into()),
                ..Default::default()
            },
        )
    }

    fn registry() -> MessageRegistry {
        MessageRegistry::builder()
            .described(Token::default(), descriptor("Token"))
            .undescribed::<Token>()
            .build()
    }

    #[test]
    fn test_run_message_covers_selected_checks() {
        let registry = registry();
        let runner = ConformanceRunner::new();
        let report = runner.run_message(registry.get(0).unwrap());
        assert_eq!(report.results.len(), 7);
        assert!(report.all_passed());
    }

    #[test]
    fn test_run_all_continues_past_failures() {
        let registry = registry();
        let report = ConformanceRunner::new().run_all(&registry);
        assert_eq!(report.messages.len(), 2);
        assert!(report.messages[0].all_passed());
        assert!(!report.messages[1].all_passed());
        // capabilities, descriptor, field_descriptors
        assert_eq!(report.messages[1].failed, 3);
    }

    #[test]
    fn test_config_filter() {
        let registry = registry();
        let runner =
            ConformanceRunner::with_config(ConformanceConfig::default().with_checks([CheckId::Clone]));
        let report = runner.run_all(&registry);
        assert_eq!(report.summary.total, 2);
        assert!(report.all_passed());
    }

    #[test]
    #[should_panic(expected = "message conformance failed")]
    fn test_assert_conformant_panics() {
        ConformanceRunner::new().assert_conformant(&registry());
    }

    #[tokio::test]
    async fn test_run_concurrent_keeps_order() {
        let registry = Arc::new(registry());
        let runner = ConformanceRunner::new();
        let sequential = runner.run_all(&registry);
        let concurrent = runner.run_concurrent(Arc::clone(&registry)).await.unwrap();

        let keys = |r: &ConformanceReport| {
            r.messages
                .iter()
                .map(|m| (m.key.clone(), m.passed, m.failed))
                .collect::<Vec<_>>()
        };
        assert_eq!(keys(&sequential), keys(&concurrent));
    }
}
