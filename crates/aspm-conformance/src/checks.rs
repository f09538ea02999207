//! The seven message properties, one function per check.
//!
//! Every check works on the entry it is given and on copies derived from it;
//! nothing here mutates the registry, so checks are idempotent and may run in
//! any order or concurrently across entries.

use crate::error::{ConformanceError, DescriptorDefect, FieldDefect};
use crate::registry::{DescriptorSlot, RegisteredMessage};
use crate::types::{Capability, CheckId, CheckResult, ConformanceConfig};
use std::collections::HashSet;

/// Dispatch: run one check against one entry.
pub fn run_check(
    check: CheckId,
    entry: &RegisteredMessage,
    config: &ConformanceConfig,
) -> CheckResult {
    match check {
        CheckId::Capabilities => check_capabilities(entry),
        CheckId::RoundTrip => check_round_trip(entry),
        CheckId::Descriptor => check_descriptor(entry),
        CheckId::FieldDescriptors => check_field_descriptors(entry),
        CheckId::Namespace => check_namespace(entry, config),
        CheckId::Clone => check_clone(entry),
        CheckId::Reset => check_reset(entry),
    }
}

fn missing(entry: &RegisteredMessage, capability: Capability) -> ConformanceError {
    ConformanceError::MissingCapability {
        type_name: entry.type_name().to_owned(),
        capability,
    }
}

/// Both the generic message and the self-describing capability are exposed.
pub fn check_capabilities(entry: &RegisteredMessage) -> CheckResult {
    let mut result = CheckResult::new(CheckId::Capabilities, entry.key());
    if entry.codec().is_none() {
        result.fail(missing(entry, Capability::GenericMessage));
    }
    if !entry.descriptor().is_present() {
        result.fail(missing(entry, Capability::SelfDescribing));
    }
    result
}

/// `decode(encode(m)) == m`, decoding into a fresh zero instance.
pub fn check_round_trip(entry: &RegisteredMessage) -> CheckResult {
    let mut result = CheckResult::new(CheckId::RoundTrip, entry.key());
    let Some(message) = entry.codec() else {
        result.fail(missing(entry, Capability::GenericMessage));
        return result;
    };

    let bytes = match message.encode_to_vec() {
        Ok(bytes) => bytes,
        Err(e) => {
            result.fail(ConformanceError::EncodeFailed {
                type_name: entry.type_name().to_owned(),
                reason: e.to_string(),
            });
            return result;
        }
    };

    let decoded = match message.decode_fresh(&bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            result.fail(ConformanceError::DecodeFailed {
                type_name: entry.type_name().to_owned(),
                reason: e.to_string(),
            });
            return result;
        }
    };

    if !message.equals(decoded.as_ref()) {
        result.fail(ConformanceError::RoundTripMismatch {
            type_name: entry.type_name().to_owned(),
        });
    }
    result
}

/// The descriptor is present and carries a name and a full name.
pub fn check_descriptor(entry: &RegisteredMessage) -> CheckResult {
    let mut result = CheckResult::new(CheckId::Descriptor, entry.key());
    let invalid = |defect| ConformanceError::InvalidDescriptor {
        type_name: entry.type_name().to_owned(),
        defect,
    };

    let descriptor = match entry.descriptor() {
        DescriptorSlot::Absent => {
            result.fail(missing(entry, Capability::SelfDescribing));
            return result;
        }
        DescriptorSlot::Unresolved(_) => {
            result.fail(invalid(DescriptorDefect::Missing));
            return result;
        }
        DescriptorSlot::Resolved(descriptor) => descriptor,
    };

    if descriptor.name().is_empty() {
        result.fail(invalid(DescriptorDefect::EmptyName));
    }
    if descriptor.full_name().is_empty() {
        result.fail(invalid(DescriptorDefect::EmptyFullName));
    }
    result
}

/// Every field has a name, a positive and unique number, and a defined kind.
///
/// All offending fields are reported, one error per field.
pub fn check_field_descriptors(entry: &RegisteredMessage) -> CheckResult {
    let mut result = CheckResult::new(CheckId::FieldDescriptors, entry.key());
    let descriptor = match entry.descriptor() {
        DescriptorSlot::Absent => {
            result.fail(missing(entry, Capability::SelfDescribing));
            return result;
        }
        DescriptorSlot::Unresolved(_) => {
            result.fail(ConformanceError::InvalidDescriptor {
                type_name: entry.type_name().to_owned(),
                defect: DescriptorDefect::Missing,
            });
            return result;
        }
        DescriptorSlot::Resolved(descriptor) => descriptor,
    };

    let mut seen = HashSet::new();
    for (index, field) in descriptor.fields().enumerate() {
        let mut defects = Vec::new();
        if field.name().is_empty() {
            defects.push(FieldDefect::EmptyName);
        }
        let number = field.number();
        if number <= 0 {
            defects.push(FieldDefect::NonPositiveNumber(number));
        } else if !seen.insert(number) {
            defects.push(FieldDefect::DuplicateNumber(number));
        }
        if field.kind().is_none() {
            defects.push(FieldDefect::UndefinedKind);
        }

        if !defects.is_empty() {
            result.fail(ConformanceError::InvalidField {
                type_name: entry.type_name().to_owned(),
                field: field.name().to_owned(),
                index,
                defects,
            });
        }
    }
    result
}

/// Advisory: the full name extends one of the expected package prefixes.
pub fn check_namespace(entry: &RegisteredMessage, config: &ConformanceConfig) -> CheckResult {
    let mut result = CheckResult::new(CheckId::Namespace, entry.key());
    let Some(descriptor) = entry.descriptor().resolved() else {
        result.observe(format!(
            "skipped: {} has no resolved descriptor",
            entry.type_name()
        ));
        return result;
    };

    let full_name = descriptor.full_name();
    let known = config
        .expected_namespaces
        .keys()
        .any(|prefix| full_name.len() > prefix.len() && full_name.starts_with(prefix.as_str()));
    if !known {
        result.observe(format!(
            "message {} has package prefix that doesn't match expected packages",
            full_name
        ));
    }
    result
}

/// A clone equals the original and lives in its own storage.
pub fn check_clone(entry: &RegisteredMessage) -> CheckResult {
    let mut result = CheckResult::new(CheckId::Clone, entry.key());
    let Some(original) = entry.codec() else {
        result.fail(missing(entry, Capability::GenericMessage));
        return result;
    };

    let cloned = original.clone_boxed();
    if !original.equals(cloned.as_ref()) {
        result.fail(ConformanceError::CloneMismatch {
            type_name: entry.type_name().to_owned(),
        });
    }
    if let (Some(a), Some(b)) = (original.storage(), cloned.storage()) {
        if std::ptr::eq(a, b) {
            result.fail(ConformanceError::CloneIdentityViolation {
                type_name: entry.type_name().to_owned(),
            });
        }
    }
    result
}

/// Advisory: a reset clone matches a freshly constructed zero instance.
pub fn check_reset(entry: &RegisteredMessage) -> CheckResult {
    let mut result = CheckResult::new(CheckId::Reset, entry.key());
    let Some(original) = entry.codec() else {
        result.observe(format!(
            "skipped: {} does not implement the {} capability",
            entry.type_name(),
            Capability::GenericMessage
        ));
        return result;
    };

    let mut cloned = original.clone_boxed();
    cloned.reset();
    let zero = original.new_zero();
    if !cloned.equals(zero.as_ref()) {
        result.observe(format!(
            "reset message for {} may not match empty instance (this is informational)",
            entry.type_name()
        ));
    }
    result
}
