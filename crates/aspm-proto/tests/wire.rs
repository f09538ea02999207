//! The descriptor set must describe the generated types as they actually
//! encode: every described field, set on its own, writes the described tag
//! with the wire type its kind implies.

use aspm_proto::file_descriptor_set;
use aspm_proto::pb::applications::v1::Application;
use aspm_proto::pb::common::v1::Uuid;
use prost::encoding::{decode_key, WireType};
use prost::Message;
use prost_types::field_descriptor_proto::Type;
use proto_conformance::{MessageDescriptor, SchemaPool};

fn descriptor(full_name: &str) -> MessageDescriptor {
    SchemaPool::from_file_descriptor_set(file_descriptor_set())
        .get(full_name)
        .cloned()
        .unwrap_or_else(|| panic!("{full_name} missing from descriptor set"))
}

fn wire_type(kind: Type) -> WireType {
    match kind {
        Type::Int32
        | Type::Int64
        | Type::Uint32
        | Type::Uint64
        | Type::Sint32
        | Type::Sint64
        | Type::Bool
        | Type::Enum => WireType::Varint,
        Type::Fixed64 | Type::Sfixed64 | Type::Double => WireType::SixtyFourBit,
        Type::Fixed32 | Type::Sfixed32 | Type::Float => WireType::ThirtyTwoBit,
        Type::String | Type::Bytes | Type::Message => WireType::LengthDelimited,
        Type::Group => WireType::StartGroup,
    }
}

/// Encode `only(field)` for every described field and compare the leading key
/// with the descriptor. Returns the summed encoded length of the single-field
/// messages.
fn assert_fields_match<M, F>(full_name: &str, only: F) -> usize
where
    M: Message,
    F: Fn(&str) -> M,
{
    let descriptor = descriptor(full_name);
    assert!(descriptor.field_count() > 0, "{full_name} has no fields");

    let mut total = 0;
    for field in descriptor.fields() {
        let bytes = only(field.name()).encode_to_vec();
        total += bytes.len();

        let mut buf = bytes.as_slice();
        let (tag, wire) = decode_key(&mut buf)
            .unwrap_or_else(|e| panic!("{full_name}.{}: {e}", field.name()));
        let kind = field
            .kind()
            .unwrap_or_else(|| panic!("{full_name}.{} has no kind", field.name()));

        assert_eq!(
            i64::from(tag),
            i64::from(field.number()),
            "{full_name}.{} tag",
            field.name()
        );
        assert_eq!(wire, wire_type(kind), "{full_name}.{} wire type", field.name());
    }
    total
}

fn full_application() -> Application {
    Application {
        id: Some(Uuid {
            value: "0b5e6f3c-9d1a-4c2e-8f7b-2a4d6e8c0f13".into(),
        }),
        name: "payments-gateway".into(),
        description: "card processing edge".into(),
        created_at_unix_ms: 1_700_000_000_000,
    }
}

fn application_only(field: &str) -> Application {
    let full = full_application();
    let mut app = Application::default();
    match field {
        "id" => app.id = full.id,
        "name" => app.name = full.name,
        "description" => app.description = full.description,
        "created_at_unix_ms" => app.created_at_unix_ms = full.created_at_unix_ms,
        other => panic!("Application has no field {other}"),
    }
    app
}

fn full_uuid() -> Uuid {
    Uuid {
        value: "0b5e6f3c-9d1a-4c2e-8f7b-2a4d6e8c0f13".into(),
    }
}

fn uuid_only(field: &str) -> Uuid {
    match field {
        "value" => full_uuid(),
        other => panic!("UUID has no field {other}"),
    }
}

#[test]
fn test_application_descriptor_matches_encoding() {
    let total = assert_fields_match("applications.v1.Application", application_only);
    // nothing encoded that the descriptor does not describe
    assert_eq!(total, full_application().encoded_len());
}

#[test]
fn test_uuid_descriptor_matches_encoding() {
    let total = assert_fields_match("common.v1.UUID", uuid_only);
    assert_eq!(total, full_uuid().encoded_len());
}

#[test]
fn test_nested_message_field_points_at_uuid() {
    let descriptor = descriptor("applications.v1.Application");
    let id = descriptor
        .as_proto()
        .field
        .iter()
        .find(|f| f.name() == "id")
        .expect("id field");
    assert_eq!(id.type_name(), ".common.v1.UUID");
    assert!(descriptor_exists(&id.type_name()[1..]));
}

fn descriptor_exists(full_name: &str) -> bool {
    SchemaPool::from_file_descriptor_set(file_descriptor_set())
        .get(full_name)
        .is_some()
}
