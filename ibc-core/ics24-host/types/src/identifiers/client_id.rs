use core::str::FromStr;

use derive_more::Into;

use crate::error::IdentifierError;
use crate::validate::{validate_client_identifier, validate_client_type};

/// Identifier of a client, formed as `{client_type}-{counter}`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Into, derive_more::Display)]
pub struct ClientId(String);

impl ClientId {
    /// Builds a new client identifier from a client type and the host's
    /// client counter.
    ///
    /// ```
    /// # use ibc_core_host_types::identifiers::ClientId;
    /// let client_id = ClientId::new("07-axon", 1).unwrap();
    /// assert_eq!(client_id.as_str(), "07-axon-1");
    /// ```
    pub fn new(client_type: &str, counter: u64) -> Result<Self, IdentifierError> {
        let client_type = client_type.trim();
        validate_client_type(client_type)?;
        Ok(Self::format(client_type, counter))
    }

    /// The caller guarantees `client_type` is valid.
    pub(super) fn format(client_type: &str, counter: u64) -> Self {
        Self(format!("{client_type}-{counter}"))
    }

    /// Get this identifier as a borrowed `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get this identifier as a borrowed byte slice
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for ClientId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_client_identifier(s).map(|_| Self(s.to_string()))
    }
}

impl PartialEq<str> for ClientId {
    fn eq(&self, other: &str) -> bool {
        self.as_str().eq(other)
    }
}
