//! Error types for protocol message conformance testing.

use crate::types::Capability;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A conformance violation found by one check on one registered message.
///
/// Violations never escape the check that found them: they are collected into
/// the report and the run moves on to the next check and message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConformanceError {
    #[error("{type_name} does not implement the {capability} capability")]
    MissingCapability {
        type_name: String,
        capability: Capability,
    },

    #[error("failed to encode {type_name}: {reason}")]
    EncodeFailed { type_name: String, reason: String },

    #[error("failed to decode {type_name}: {reason}")]
    DecodeFailed { type_name: String, reason: String },

    #[error("messages are not equal after encode/decode cycle for {type_name}")]
    RoundTripMismatch { type_name: String },

    #[error("{type_name} descriptor is invalid: {defect}")]
    InvalidDescriptor {
        type_name: String,
        defect: DescriptorDefect,
    },

    #[error("{type_name} field #{index} `{field}` is invalid: {}", join_defects(.defects))]
    InvalidField {
        type_name: String,
        field: String,
        index: usize,
        defects: Vec<FieldDefect>,
    },

    #[error("clone returned the same instance for {type_name}")]
    CloneIdentityViolation { type_name: String },

    #[error("cloned message is not equal to original for {type_name}")]
    CloneMismatch { type_name: String },
}

/// Discriminant of [`ConformanceError`], handy for assertions and grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    MissingCapability,
    EncodeFailed,
    DecodeFailed,
    RoundTripMismatch,
    InvalidDescriptor,
    InvalidField,
    CloneIdentityViolation,
    CloneMismatch,
}

impl ConformanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCapability { .. } => ErrorKind::MissingCapability,
            Self::EncodeFailed { .. } => ErrorKind::EncodeFailed,
            Self::DecodeFailed { .. } => ErrorKind::DecodeFailed,
            Self::RoundTripMismatch { .. } => ErrorKind::RoundTripMismatch,
            Self::InvalidDescriptor { .. } => ErrorKind::InvalidDescriptor,
            Self::InvalidField { .. } => ErrorKind::InvalidField,
            Self::CloneIdentityViolation { .. } => ErrorKind::CloneIdentityViolation,
            Self::CloneMismatch { .. } => ErrorKind::CloneMismatch,
        }
    }

    /// Concrete type the violation was reported for.
    pub fn type_name(&self) -> &str {
        match self {
            Self::MissingCapability { type_name, .. }
            | Self::EncodeFailed { type_name, .. }
            | Self::DecodeFailed { type_name, .. }
            | Self::RoundTripMismatch { type_name }
            | Self::InvalidDescriptor { type_name, .. }
            | Self::InvalidField { type_name, .. }
            | Self::CloneIdentityViolation { type_name }
            | Self::CloneMismatch { type_name } => type_name,
        }
    }
}

/// What is wrong with a message descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorDefect {
    /// The type claims a descriptor but none could be resolved.
    Missing,
    EmptyName,
    EmptyFullName,
}

impl fmt::Display for DescriptorDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "descriptor is missing"),
            Self::EmptyName => write!(f, "descriptor has empty name"),
            Self::EmptyFullName => write!(f, "descriptor has empty full name"),
        }
    }
}

/// What is wrong with one field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDefect {
    EmptyName,
    NonPositiveNumber(i32),
    UndefinedKind,
    /// Number already used by an earlier field of the same message.
    DuplicateNumber(i32),
}

impl fmt::Display for FieldDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "empty name"),
            Self::NonPositiveNumber(n) => write!(f, "invalid number: {}", n),
            Self::UndefinedKind => write!(f, "invalid kind"),
            Self::DuplicateNumber(n) => write!(f, "duplicate number: {}", n),
        }
    }
}

fn join_defects(defects: &[FieldDefect]) -> String {
    defects
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_capability_display() {
        let err = ConformanceError::MissingCapability {
            type_name: "pkg.Opaque".into(),
            capability: Capability::SelfDescribing,
        };
        assert_eq!(
            err.to_string(),
            "pkg.Opaque does not implement the self-describing capability"
        );
        assert_eq!(err.kind(), ErrorKind::MissingCapability);
    }

    #[test]
    fn test_invalid_field_display_lists_all_defects() {
        let err = ConformanceError::InvalidField {
            type_name: "pkg.Msg".into(),
            field: "".into(),
            index: 1,
            defects: vec![FieldDefect::EmptyName, FieldDefect::NonPositiveNumber(0)],
        };
        let s = err.to_string();
        assert!(s.contains("field #1"));
        assert!(s.contains("empty name, invalid number: 0"));
    }

    #[test]
    fn test_decode_failed_keeps_reason() {
        let err = ConformanceError::DecodeFailed {
            type_name: "pkg.Msg".into(),
            reason: "buffer underflow".into(),
        };
        assert!(err.to_string().contains("buffer underflow"));
        assert_eq!(err.type_name(), "pkg.Msg");
    }

    #[test]
    fn test_json_tagged_by_kind() {
        let err = ConformanceError::CloneMismatch {
            type_name: "pkg.Msg".into(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "clone_mismatch");
        let back: ConformanceError = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }
}
