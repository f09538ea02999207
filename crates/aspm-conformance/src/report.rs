//! Conformance report generation.
//!
//! Results are grouped per registered message type and rendered either as a
//! box-drawing text report or as JSON.

use crate::error::ConformanceError;
use crate::types::{CheckResult, ConformanceSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every check result for one registered message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReport {
    /// Report key, `namespace.TypeName`.
    pub key: String,
    /// Concrete type path.
    pub type_name: String,
    /// Results in canonical check order.
    pub results: Vec<CheckResult>,
    /// Number that passed.
    pub passed: usize,
    /// Number that failed.
    pub failed: usize,
}

impl MessageReport {
    pub fn from_results(
        key: impl Into<String>,
        type_name: impl Into<String>,
        results: Vec<CheckResult>,
    ) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = results.len() - passed;
        Self {
            key: key.into(),
            type_name: type_name.into(),
            results,
            passed,
            failed,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ConformanceError> {
        self.results.iter().flat_map(|r| r.failures.iter())
    }

    pub fn observations(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .flat_map(|r| r.observations.iter().map(String::as_str))
    }
}

impl fmt::Display for MessageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.all_passed() { "+" } else { "!" };
        writeln!(
            f,
            "  [{}] {} ({}/{})",
            icon,
            self.key,
            self.passed,
            self.results.len(),
        )?;
        for r in &self.results {
            writeln!(f, "      {}", r)?;
        }
        Ok(())
    }
}

/// A complete conformance report for a message registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Per-message breakdowns, in registry order.
    pub messages: Vec<MessageReport>,
    /// Summary statistics.
    pub summary: ConformanceSummary,
}

impl ConformanceReport {
    pub fn from_messages(
        messages: Vec<MessageReport>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let results = messages.iter().flat_map(|m| m.results.iter());
        let (mut total, mut passed, mut observations) = (0, 0, 0);
        for r in results {
            total += 1;
            passed += usize::from(r.passed);
            observations += r.observations.len();
        }

        let summary = ConformanceSummary {
            messages: messages.len(),
            total,
            passed,
            failed: total - passed,
            observations,
            started_at,
            completed_at,
        };

        Self { messages, summary }
    }

    /// Whether every hard check passed.
    pub fn all_passed(&self) -> bool {
        self.summary.all_passed()
    }

    /// Get only failed results.
    pub fn failures(&self) -> Vec<&CheckResult> {
        self.results().filter(|r| !r.passed).collect()
    }

    /// Informational notes, paired with the report key they belong to.
    pub fn observations(&self) -> Vec<(&str, &str)> {
        self.messages
            .iter()
            .flat_map(|m| m.observations().map(move |note| (m.key.as_str(), note)))
            .collect()
    }

    pub fn results(&self) -> impl Iterator<Item = &CheckResult> {
        self.messages.iter().flat_map(|m| m.results.iter())
    }

    pub fn message(&self, key: &str) -> Option<&MessageReport> {
        self.messages.iter().find(|m| m.key == key)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+-------------------------------------------------+")?;
        writeln!(f, "|   Proto Message Conformance Report              |")?;
        writeln!(f, "+-------------------------------------------------+")?;
        writeln!(
            f,
            "| Messages: {:3}  Checks: {:4}  Failed: {:4}       |",
            self.summary.messages, self.summary.total, self.summary.failed,
        )?;
        writeln!(f, "+-------------------------------------------------+")?;
        writeln!(f)?;

        for message in &self.messages {
            write!(f, "{}", message)?;
        }

        writeln!(f)?;
        if self.all_passed() {
            writeln!(f, "  ALL {} MESSAGE TYPES CONFORMANT", self.summary.messages)?;
        } else {
            writeln!(f, "  {} CHECK(S) FAILED", self.summary.failed)?;
        }
        Ok(())
    }
}
