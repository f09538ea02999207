//! Core types for protocol message conformance testing.

use crate::error::ConformanceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A capability a registered message must expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Encode/decode/clone/reset primitives.
    GenericMessage,
    /// A schema descriptor.
    SelfDescribing,
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Self::GenericMessage => "generic message",
            Self::SelfDescribing => "self-describing",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How a failing check affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Failures are reported and count against conformance.
    Hard,
    /// Never fails; only annotates the run with observations.
    Advisory,
}

/// Identifies one of the seven message properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    Capabilities,
    RoundTrip,
    Descriptor,
    FieldDescriptors,
    Namespace,
    Clone,
    Reset,
}

impl CheckId {
    /// All checks in canonical order.
    pub fn all() -> &'static [CheckId] {
        &[
            Self::Capabilities,
            Self::RoundTrip,
            Self::Descriptor,
            Self::FieldDescriptors,
            Self::Namespace,
            Self::Clone,
            Self::Reset,
        ]
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Namespace | Self::Reset => Severity::Advisory,
            _ => Severity::Hard,
        }
    }

    /// Short machine-friendly name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capabilities => "capabilities",
            Self::RoundTrip => "round_trip",
            Self::Descriptor => "descriptor",
            Self::FieldDescriptors => "field_descriptors",
            Self::Namespace => "namespace",
            Self::Clone => "clone",
            Self::Reset => "reset",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Capabilities => "Message capabilities",
            Self::RoundTrip => "Encode/decode round-trip",
            Self::Descriptor => "Descriptor validity",
            Self::FieldDescriptors => "Field descriptors",
            Self::Namespace => "Package namespace",
            Self::Clone => "Clone semantics",
            Self::Reset => "Reset to zero state",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of running one check against one registered message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Which check ran.
    pub check: CheckId,
    /// Report key of the message under test.
    pub message: String,
    /// Whether the check holds. Advisory checks always pass.
    pub passed: bool,
    /// Every violation found, in discovery order.
    pub failures: Vec<ConformanceError>,
    /// Informational notes that never affect `passed`.
    pub observations: Vec<String>,
    /// When the check was performed.
    pub checked_at: DateTime<Utc>,
}

impl CheckResult {
    pub(crate) fn new(check: CheckId, message: &str) -> Self {
        Self {
            check,
            message: message.to_owned(),
            passed: true,
            failures: Vec::new(),
            observations: Vec::new(),
            checked_at: Utc::now(),
        }
    }

    pub(crate) fn fail(&mut self, error: ConformanceError) {
        debug_assert_eq!(self.check.severity(), Severity::Hard);
        self.passed = false;
        self.failures.push(error);
    }

    pub(crate) fn observe(&mut self, note: impl Into<String>) {
        self.observations.push(note.into());
    }

    pub fn severity(&self) -> Severity {
        self.check.severity()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match (self.passed, self.observations.is_empty()) {
            (false, _) => "FAIL",
            (true, true) => "PASS",
            (true, false) => "NOTE",
        };
        write!(f, "[{}] {} - {}", status, self.check, self.check.label())?;
        for failure in &self.failures {
            write!(f, "; {}", failure)?;
        }
        for note in &self.observations {
            write!(f, "; {}", note)?;
        }
        Ok(())
    }
}

/// Configuration for a conformance run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConformanceConfig {
    /// Checks to run (empty = all).
    #[serde(default)]
    pub checks: Vec<CheckId>,
    /// Known package prefixes mapped to the type names expected in them.
    /// Only the keys take part in the namespace check.
    #[serde(default)]
    pub expected_namespaces: BTreeMap<String, Vec<String>>,
}

impl ConformanceConfig {
    pub fn with_namespaces<I, P>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = (P, Vec<String>)>,
        P: Into<String>,
    {
        self.expected_namespaces = namespaces
            .into_iter()
            .map(|(prefix, types)| (prefix.into(), types))
            .collect();
        self
    }

    pub fn with_checks(mut self, checks: impl IntoIterator<Item = CheckId>) -> Self {
        self.checks = checks.into_iter().collect();
        self
    }

    /// Checks selected by this config, in canonical order.
    pub fn selected_checks(&self) -> Vec<CheckId> {
        CheckId::all()
            .iter()
            .copied()
            .filter(|check| self.checks.is_empty() || self.checks.contains(check))
            .collect()
    }
}

/// Summary statistics from a conformance run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceSummary {
    /// Registered messages checked.
    pub messages: usize,
    /// Checks executed across all messages.
    pub total: usize,
    /// Number that passed.
    pub passed: usize,
    /// Number that failed.
    pub failed: usize,
    /// Informational observations emitted.
    pub observations: usize,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run completed.
    pub completed_at: DateTime<Utc>,
}

impl ConformanceSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Pass rate as a percentage.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.passed as f64 / self.total as f64) * 100.0
    }
}

impl fmt::Display for ConformanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} messages, {}/{} checks passed ({:.1}%), {} failed, {} observations",
            self.messages,
            self.passed,
            self.total,
            self.pass_rate(),
            self.failed,
            self.observations,
        )
    }
}
