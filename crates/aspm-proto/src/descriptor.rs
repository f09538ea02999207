//! Descriptor set for the checked-in proto files.
//!
//! Mirrors what `protoc --descriptor_set_out` emits for `proto/`; keep it in
//! step with the `.proto` sources when they change.

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet};

fn field(name: &str, number: i32, kind: Type, json_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_owned()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(kind as i32),
        json_name: Some(json_name.to_owned()),
        ..Default::default()
    }
}

fn message_field(name: &str, number: i32, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_owned()),
        ..field(name, number, Type::Message, name)
    }
}

fn uuid_file() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("common/v1/uuid.proto".to_owned()),
        package: Some("common.v1".to_owned()),
        message_type: vec![DescriptorProto {
            name: Some("UUID".to_owned()),
            field: vec![field("value", 1, Type::String, "value")],
            ..Default::default()
        }],
        syntax: Some("proto3".to_owned()),
        ..Default::default()
    }
}

fn application_file() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("applications/v1/application.proto".to_owned()),
        package: Some("applications.v1".to_owned()),
        dependency: vec!["common/v1/uuid.proto".to_owned()],
        message_type: vec![DescriptorProto {
            name: Some("Application".to_owned()),
            field: vec![
                message_field("id", 1, ".common.v1.UUID"),
                field("name", 2, Type::String, "name"),
                field("description", 3, Type::String, "description"),
                field("created_at_unix_ms", 4, Type::Int64, "createdAtUnixMs"),
            ],
            ..Default::default()
        }],
        syntax: Some("proto3".to_owned()),
        ..Default::default()
    }
}

/// Descriptors of every checked-in proto file, dependencies first.
pub fn file_descriptor_set() -> FileDescriptorSet {
    FileDescriptorSet {
        file: vec![uuid_file(), application_file()],
    }
}
