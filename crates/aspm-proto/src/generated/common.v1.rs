// @generated
// Generated from: proto/common/v1/uuid.proto
// Manual check-in for offline builds.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Uuid {
    #[prost(string, tag = "1")]
    pub value: ::prost::alloc::string::String,
}
impl ::prost::Name for Uuid {
    const NAME: &'static str = "UUID";
    const PACKAGE: &'static str = "common.v1";
    fn full_name() -> ::prost::alloc::string::String {
        "common.v1.UUID".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/common.v1.UUID".into()
    }
}
