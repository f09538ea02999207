// @generated
// Generated from: proto/applications/v1/application.proto
// Manual check-in for offline builds.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Application {
    #[prost(message, optional, tag = "1")]
    pub id: ::core::option::Option<super::super::common::v1::Uuid>,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub description: ::prost::alloc::string::String,
    #[prost(int64, tag = "4")]
    pub created_at_unix_ms: i64,
}
impl ::prost::Name for Application {
    const NAME: &'static str = "Application";
    const PACKAGE: &'static str = "applications.v1";
    fn full_name() -> ::prost::alloc::string::String {
        "applications.v1.Application".into()
    }
    fn type_url() -> ::prost::alloc::string::String {
        "/applications.v1.Application".into()
    }
}
