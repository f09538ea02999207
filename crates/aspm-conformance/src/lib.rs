//! Protocol Message Conformance Harness
//!
//! Verifies that every registered protobuf message type honours the contract
//! generic code relies on, and produces a per-message conformance report.
//!
//! # Checks
//!
//! | Check | Severity | Property |
//! |-------|----------|----------|
//! | capabilities | hard | exposes encode/decode primitives and a descriptor |
//! | round_trip | hard | `decode(encode(m)) == m` |
//! | descriptor | hard | descriptor present, name and full name non-empty |
//! | field_descriptors | hard | every field named, positive unique tag, defined kind |
//! | namespace | advisory | full name extends a known package prefix |
//! | clone | hard | clone equal to and storage-distinct from the original |
//! | reset | advisory | reset clone equals a fresh zero instance |
//!
//! # Quick Start
//!
//! ```rust
//! use proto_conformance::{ConformanceRunner, MessageRegistry};
//!
//! #[derive(Clone, PartialEq, prost::Message)]
//! struct Ping {
//!     #[prost(uint64, tag = "1")]
//!     seq: u64,
//! }
//!
//! let registry = MessageRegistry::builder().undescribed::<Ping>().build();
//! let report = ConformanceRunner::new().run_all(&registry);
//! assert!(!report.all_passed()); // no descriptor
//! ```

pub mod checks;
pub mod descriptor;
pub mod error;
pub mod layout;
pub mod message;
pub mod registry;
pub mod report;
pub mod runner;
pub mod types;

// Re-export key types at crate root.
pub use descriptor::{FieldDescriptor, MessageDescriptor, SchemaPool};
pub use error::{ConformanceError, DescriptorDefect, ErrorKind, FieldDefect};
pub use layout::{check_generated_layout, LayoutEntry, LayoutReport};
pub use message::DynMessage;
pub use registry::{report_key, DescriptorSlot, MessageRegistry, RegisteredMessage, RegistryBuilder};
pub use report::{ConformanceReport, MessageReport};
pub use runner::ConformanceRunner;
pub use types::{
    Capability, CheckId, CheckResult, ConformanceConfig, ConformanceSummary, Severity,
};
