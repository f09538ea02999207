//! Protobuf message types of the ASPM API.
//!
//! Generated code is checked in under `src/generated/`; `build.rs` only
//! verifies it is present and not older than the `.proto` sources.

#![deny(unsafe_code)]

pub mod descriptor;
pub mod pb;

pub use descriptor::file_descriptor_set;

/// API packages with the message types known to live in them.
pub const EXPECTED_PACKAGES: &[(&str, &[&str])] = &[
    ("applications.v1", &["Application"]),
    ("common.v1", &[]),
    ("components.v1", &[]),
    ("cvss.v1", &[]),
    ("defects.v1", &[]),
    ("exploits.v1", &[]),
    ("projects.v1", &[]),
    ("reports.v1", &[]),
    ("vulnerability.v1", &[]),
    ("workers.v1", &[]),
];

/// One source directory per API package, relative to [`PROTO_ROOT`].
pub const PROTO_PACKAGE_DIRS: &[&str] = &[
    "applications",
    "common",
    "components",
    "cvss",
    "defects",
    "exploits",
    "projects",
    "reports",
    "vulnerability",
    "workers",
];

pub const PROTO_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/proto");

/// [`EXPECTED_PACKAGES`] as owned `(prefix, type names)` pairs.
pub fn expected_namespaces() -> impl Iterator<Item = (String, Vec<String>)> {
    EXPECTED_PACKAGES.iter().map(|(package, types)| {
        (
            (*package).to_owned(),
            types.iter().map(|t| (*t).to_owned()).collect(),
        )
    })
}
