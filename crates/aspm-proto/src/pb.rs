//! prost-generated message types, one module per proto package.

pub mod common {
    pub mod v1 {
        include!("generated/common.v1.rs");
    }
}

pub mod applications {
    pub mod v1 {
        include!("generated/applications.v1.rs");
    }
}
