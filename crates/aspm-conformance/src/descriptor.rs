//! Schema descriptors for registered messages.
//!
//! Descriptors are plain `prost_types` descriptor protos, the same data protoc
//! writes with `--descriptor_set_out`. A [`SchemaPool`] indexes every message
//! of a `FileDescriptorSet` by its fully-qualified name so registered types can
//! resolve their descriptor through `prost::Name::full_name()`.

use prost::Message as _;
use prost_types::field_descriptor_proto::Type;
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet};
use std::collections::BTreeMap;

/// Descriptor of one message type.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDescriptor {
    full_name: String,
    proto: DescriptorProto,
}

impl MessageDescriptor {
    /// Descriptor of a top-level message declared in `package`.
    pub fn new(package: &str, proto: DescriptorProto) -> Self {
        let full_name = qualify(package, proto.name());
        Self { full_name, proto }
    }

    pub fn name(&self) -> &str {
        self.proto.name()
    }

    /// Scope-qualified name, e.g. `applications.v1.Application`.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Scope part of the full name: the package, or the enclosing message for nested types.
    pub fn package(&self) -> &str {
        self.full_name
            .strip_suffix(self.name())
            .map(|scope| scope.trim_end_matches('.'))
            .unwrap_or_default()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = FieldDescriptor<'_>> + '_ {
        self.proto.field.iter().map(FieldDescriptor)
    }

    pub fn field_count(&self) -> usize {
        self.proto.field.len()
    }

    pub fn as_proto(&self) -> &DescriptorProto {
        &self.proto
    }
}

/// Borrowed view over one field of a [`MessageDescriptor`].
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor<'a>(&'a FieldDescriptorProto);

impl<'a> FieldDescriptor<'a> {
    pub fn name(&self) -> &'a str {
        self.0.name()
    }

    /// Field number; `0` when unset.
    pub fn number(&self) -> i32 {
        self.0.number()
    }

    /// Wire kind; `None` when unset or not one of the defined protobuf types.
    pub fn kind(&self) -> Option<Type> {
        self.0.r#type.and_then(|raw| Type::try_from(raw).ok())
    }
}

/// Joins a scope and a name the way protobuf builds full names.
fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_owned()
    } else {
        format!("{}.{}", scope, name)
    }
}

/// Index of message descriptors keyed by fully-qualified name.
#[derive(Debug, Clone, Default)]
pub struct SchemaPool {
    messages: BTreeMap<String, MessageDescriptor>,
}

impl SchemaPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from an encoded `FileDescriptorSet`.
    pub fn decode(bytes: &[u8]) -> Result<Self, prost::DecodeError> {
        let set = FileDescriptorSet::decode(bytes)?;
        Ok(Self::from_file_descriptor_set(set))
    }

    pub fn from_file_descriptor_set(set: FileDescriptorSet) -> Self {
        let mut pool = Self::new();
        for file in set.file {
            pool.add_file(file);
        }
        pool
    }

    /// Index every message of `file`, nested ones included.
    pub fn add_file(&mut self, file: FileDescriptorProto) {
        let package = file.package().to_owned();
        for message in file.message_type {
            self.add_message(&package, message);
        }
    }

    fn add_message(&mut self, scope: &str, mut proto: DescriptorProto) {
        let nested = std::mem::take(&mut proto.nested_type);
        let descriptor = MessageDescriptor::new(scope, proto);
        for inner in nested {
            self.add_message(descriptor.full_name(), inner);
        }
        self.messages
            .insert(descriptor.full_name().to_owned(), descriptor);
    }

    pub fn get(&self, full_name: &str) -> Option<&MessageDescriptor> {
        self.messages.get(full_name)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Descriptors ordered by full name.
    pub fn iter(&self) -> impl Iterator<Item = &MessageDescriptor> {
        self.messages.values()
    }
}
