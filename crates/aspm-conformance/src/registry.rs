//! Statically declared registry of message instances under test.
//!
//! The registry is assembled once by the surrounding test setup and stays
//! read-only while checks run. Entries keep insertion order.

use crate::descriptor::{MessageDescriptor, SchemaPool};
use crate::message::{DynMessage, ProstCell};
use std::slice;

/// Where a registered message gets its schema descriptor from.
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptorSlot {
    /// The type is not self-describing.
    Absent,
    /// The type is self-describing but no descriptor exists under this name.
    Unresolved(String),
    Resolved(MessageDescriptor),
}

impl DescriptorSlot {
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    pub fn resolved(&self) -> Option<&MessageDescriptor> {
        match self {
            Self::Resolved(descriptor) => Some(descriptor),
            _ => None,
        }
    }
}

/// One registry entry: an instance and whatever capabilities it exposes.
#[derive(Debug)]
pub struct RegisteredMessage {
    key: String,
    type_name: String,
    codec: Option<Box<dyn DynMessage>>,
    descriptor: DescriptorSlot,
}

impl RegisteredMessage {
    pub fn new(
        type_name: impl Into<String>,
        codec: Option<Box<dyn DynMessage>>,
        descriptor: DescriptorSlot,
    ) -> Self {
        let type_name = type_name.into();
        Self {
            key: report_key(&type_name),
            type_name,
            codec,
            descriptor,
        }
    }

    /// Human-readable identifier results are grouped under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Concrete type path, as given at registration.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The generic message capability, if exposed.
    pub fn codec(&self) -> Option<&dyn DynMessage> {
        self.codec.as_deref()
    }

    /// The self-describing capability.
    pub fn descriptor(&self) -> &DescriptorSlot {
        &self.descriptor
    }
}

/// Derives `namespace.TypeName` from a Rust type path.
///
/// Generic arguments are left as they are; only the path before the first
/// `<` is split.
pub fn report_key(type_name: &str) -> String {
    let path_end = type_name.find('<').unwrap_or(type_name.len());
    match type_name[..path_end].rsplit_once("::") {
        Some((namespace, _)) => {
            let ident = &type_name[namespace.len() + 2..];
            format!("{}.{}", namespace, ident)
        }
        None => type_name.to_owned(),
    }
}

/// Insertion-ordered, read-only list of messages to validate.
#[derive(Debug, Default)]
pub struct MessageRegistry {
    entries: Vec<RegisteredMessage>,
}

impl MessageRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RegisteredMessage> {
        self.entries.get(index)
    }

    /// Look up an entry by report key.
    pub fn find(&self, key: &str) -> Option<&RegisteredMessage> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn iter(&self) -> slice::Iter<'_, RegisteredMessage> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a MessageRegistry {
    type Item = &'a RegisteredMessage;
    type IntoIter = slice::Iter<'a, RegisteredMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds a [`MessageRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    pool: SchemaPool,
    entries: Vec<RegisteredMessage>,
}

impl RegistryBuilder {
    /// Descriptor source for [`RegistryBuilder::message`].
    pub fn pool(mut self, pool: SchemaPool) -> Self {
        self.pool = pool;
        self
    }

    /// Register the zero instance of a named prost message. Its descriptor is
    /// looked up in the pool by `T::full_name()`.
    pub fn message<T>(mut self) -> Self
    where
        T: prost::Message + prost::Name + Default + Clone + PartialEq + 'static,
    {
        let full_name = T::full_name();
        let descriptor = match self.pool.get(&full_name) {
            Some(descriptor) => DescriptorSlot::Resolved(descriptor.clone()),
            None => DescriptorSlot::Unresolved(full_name),
        };
        self.entries.push(RegisteredMessage::new(
            std::any::type_name::<T>(),
            Some(Box::new(ProstCell(T::default()))),
            descriptor,
        ));
        self
    }

    /// Register an instance (zero or populated) with an explicit descriptor.
    pub fn described<T>(mut self, instance: T, descriptor: MessageDescriptor) -> Self
    where
        T: prost::Message + Default + Clone + PartialEq + 'static,
    {
        self.entries.push(RegisteredMessage::new(
            std::any::type_name::<T>(),
            Some(Box::new(ProstCell(instance))),
            DescriptorSlot::Resolved(descriptor),
        ));
        self
    }

    /// Register the zero instance of a message that exposes no descriptor.
    pub fn undescribed<T>(mut self) -> Self
    where
        T: prost::Message + Default + Clone + PartialEq + 'static,
    {
        self.entries.push(RegisteredMessage::new(
            std::any::type_name::<T>(),
            Some(Box::new(ProstCell(T::default()))),
            DescriptorSlot::Absent,
        ));
        self
    }

    /// Register a schema that has no encodable instance behind it.
    pub fn schema_only(mut self, type_name: impl Into<String>, descriptor: MessageDescriptor) -> Self {
        self.entries.push(RegisteredMessage::new(
            type_name,
            None,
            DescriptorSlot::Resolved(descriptor),
        ));
        self
    }

    /// Register a prepared entry, e.g. one backed by a hand-written [`DynMessage`].
    pub fn entry(mut self, entry: RegisteredMessage) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> MessageRegistry {
        MessageRegistry {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::DescriptorProto;

    #[derive(Clone, PartialEq, prost::Message)]
    struct Ping {
        #[prost(uint32, tag = "1")]
        seq: u32,
    }

    impl prost::Name for Ping {
        const NAME: &'static str = "Ping";
        const PACKAGE: &'static str = "health.v1";
    }

    fn ping_descriptor() -> MessageDescriptor {
        MessageDescriptor::new(
            "health.v1",
            DescriptorProto {
                name: Some("Ping".into()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_report_key_splits_last_segment() {
        assert_eq!(
            report_key("aspm_proto::pb::common::v1::Uuid"),
            "aspm_proto::pb::common::v1.Uuid"
        );
        assert_eq!(report_key("Plain"), "Plain");
    }

    #[test]
    fn test_report_key_ignores_generic_arguments() {
        assert_eq!(
            report_key("my_crate::Wrapper<other::Inner>"),
            "my_crate.Wrapper<other::Inner>"
        );
    }

    #[test]
    fn test_message_resolves_from_pool() {
        let mut pool = SchemaPool::new();
        pool.add_file(prost_types::FileDescriptorProto {
            package: Some("health.v1".into()),
            message_type: vec![ping_descriptor().as_proto().clone()],
            ..Default::default()
        });

        let registry = MessageRegistry::builder().pool(pool).message::<Ping>().build();
        let entry = registry.get(0).unwrap();
        assert!(entry.codec().is_some());
        assert_eq!(
            entry.descriptor().resolved().map(|d| d.full_name()),
            Some("health.v1.Ping")
        );
    }

    #[test]
    fn test_message_without_pool_is_unresolved() {
        let registry = MessageRegistry::builder().message::<Ping>().build();
        assert_eq!(
            registry.get(0).unwrap().descriptor(),
            &DescriptorSlot::Unresolved("health.v1.Ping".into())
        );
    }

    #[test]
    fn test_registry_keeps_insertion_order() {
        let registry = MessageRegistry::builder()
            .undescribed::<Ping>()
            .schema_only("health.v1.Pong", ping_descriptor())
            .described(Ping { seq: 3 }, ping_descriptor())
            .build();

        assert_eq!(registry.len(), 3);
        let kinds: Vec<_> = registry
            .iter()
            .map(|e| (e.codec().is_some(), e.descriptor().is_present()))
            .collect();
        assert_eq!(kinds, vec![(true, false), (false, true), (true, true)]);
    }

    #[test]
    fn test_find_by_key() {
        let registry = MessageRegistry::builder().undescribed::<Ping>().build();
        let key = registry.get(0).unwrap().key().to_owned();
        assert!(key.ends_with(".Ping"));
        assert!(registry.find(&key).is_some());
        assert!(registry.find("nope.Ping").is_none());
    }
}
