//! Contains primitives types and traits common to various IBC components.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

mod types;
pub use types::*;

#[cfg(feature = "serde")]
pub mod serializers;

/// Re-exports necessary google proto types and `Protobuf` trait from the
/// `ibc-proto-rs` crate.
pub mod proto {
    pub use ibc_proto::google::protobuf::Any;
    pub use ibc_proto::Protobuf;
}
