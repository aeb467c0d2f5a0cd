//! The light client of the mock hosts, registered under both `07-axon` and
//! `07-ckb4ibc`.

use std::sync::Arc;

use ibc::core::client::context::{ClientRegistry, ClientVerifier};
use ibc::core::client::types::error::ClientError;

/// Wraps a mock protobuf type in `Any` under `$type_url`, rejecting any
/// other URL on the way back.
macro_rules! any_under_type_url {
    ($ty:ty, $raw:ty, $type_url:expr) => {
        impl ::ibc::primitives::proto::Protobuf<::ibc::primitives::proto::Any> for $ty {}

        impl TryFrom<::ibc::primitives::proto::Any> for $ty {
            type Error = ::ibc::primitives::DecodingError;

            fn try_from(any: ::ibc::primitives::proto::Any) -> Result<Self, Self::Error> {
                if any.type_url != $type_url {
                    return Err(::ibc::primitives::DecodingError::MismatchedTypeUrls {
                        expected: $type_url.to_string(),
                        actual: any.type_url,
                    });
                }
                <Self as ::ibc::primitives::proto::Protobuf<$raw>>::decode_vec(&any.value)
                    .map_err(::ibc::primitives::DecodingError::proto)
            }
        }

        impl From<$ty> for ::ibc::primitives::proto::Any {
            fn from(value: $ty) -> Self {
                Self {
                    type_url: $type_url.to_string(),
                    value: <$ty as ::ibc::primitives::proto::Protobuf<$raw>>::encode_vec(value),
                }
            }
        }
    };
}

pub mod client_state;
pub mod header;
pub mod misbehaviour;
pub mod verifier;

use client_state::{axon_client_type, ckb4ibc_client_type};
use verifier::MockVerifier;

/// A registry serving both client types with one shared [`MockVerifier`].
pub fn mock_client_registry() -> Result<ClientRegistry, ClientError> {
    let verifier: Arc<dyn ClientVerifier> = Arc::new(MockVerifier);

    ClientRegistry::new()
        .with(axon_client_type(), verifier.clone())?
        .with(ckb4ibc_client_type(), verifier)
}
