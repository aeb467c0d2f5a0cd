//! Defines the `ClientType` format, the key under which a verifier is
//! registered.

use core::str::FromStr;

use super::ClientId;
use crate::error::IdentifierError;
use crate::validate::validate_client_type;

/// Type of the client, selecting the verifier that checks its headers and
/// proofs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct ClientType(String);

impl ClientType {
    pub fn new(client_type: &str) -> Result<Self, IdentifierError> {
        let client_type = client_type.trim();
        validate_client_type(client_type).map(|()| Self(client_type.into()))
    }

    /// Infallible since the client type was validated on construction.
    ///
    /// ```
    /// # use ibc_core_host_types::identifiers::ClientType;
    /// let client_type = ClientType::new("07-ckb4ibc").unwrap();
    /// assert_eq!(client_type.build_client_id(14).as_str(), "07-ckb4ibc-14");
    /// ```
    pub fn build_client_id(&self, counter: u64) -> ClientId {
        ClientId::format(self.as_str(), counter)
    }

    /// Yields this identifier as a borrowed `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClientType {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
