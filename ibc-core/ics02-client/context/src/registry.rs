//! Binds client types to their verification backends.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use ibc_core_client_types::error::ClientError;
use ibc_core_host_types::identifiers::ClientType;

use crate::verifier::ClientVerifier;

/// Lookup table from a [`ClientType`] to the verifier handling it.
///
/// A verifier may be bound under several client types, e.g. one backend
/// serving both `07-axon` and `07-ckb4ibc`, but a type is bound at most once.
#[derive(Clone, Default)]
pub struct ClientRegistry {
    verifiers: BTreeMap<ClientType, Arc<dyn ClientVerifier>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `verifier` to `client_type`.
    pub fn register(
        &mut self,
        client_type: ClientType,
        verifier: Arc<dyn ClientVerifier>,
    ) -> Result<(), ClientError> {
        if self.verifiers.contains_key(&client_type) {
            return Err(ClientError::DuplicateType { client_type });
        }

        tracing::debug!(%client_type, "registered client verifier");
        self.verifiers.insert(client_type, verifier);

        Ok(())
    }

    /// Builder-style variant of [`Self::register`].
    pub fn with(
        mut self,
        client_type: ClientType,
        verifier: Arc<dyn ClientVerifier>,
    ) -> Result<Self, ClientError> {
        self.register(client_type, verifier)?;
        Ok(self)
    }

    pub fn verifier(&self, client_type: &ClientType) -> Result<&dyn ClientVerifier, ClientError> {
        self.verifiers
            .get(client_type)
            .map(|verifier| verifier.as_ref())
            .ok_or_else(|| ClientError::UnknownType {
                client_type: client_type.clone(),
            })
    }

    pub fn contains(&self, client_type: &ClientType) -> bool {
        self.verifiers.contains_key(client_type)
    }

    pub fn client_types(&self) -> impl Iterator<Item = &ClientType> {
        self.verifiers.keys()
    }
}

impl Debug for ClientRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.verifiers.keys()).finish()
    }
}
