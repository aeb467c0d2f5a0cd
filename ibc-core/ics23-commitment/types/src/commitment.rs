//! Roots, proofs and key prefixes as exchanged between chains.

use core::fmt;

use ibc_proto::ibc::core::commitment::v1::MerklePrefix as RawMerklePrefix;
use subtle_encoding::{Encoding, Hex};

use crate::error::CommitmentError;

/// Formats opaque bytes as upper-case hex.
struct HexBytes<'a>(&'a [u8]);

impl fmt::Debug for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = Hex::upper_case()
            .encode_to_string(self.0)
            .map_err(|_| fmt::Error)?;
        f.write_str(&hex)
    }
}

/// The digest a chain's store commits to at one height. Client verifiers
/// check proofs against it.
#[derive(Clone, PartialEq, Eq, Hash, Default, derive_more::From)]
pub struct CommitmentRoot {
    bytes: Vec<u8>,
}

impl CommitmentRoot {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        bytes.to_vec().into()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for CommitmentRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CommitmentRoot")
            .field(&HexBytes(&self.bytes))
            .finish()
    }
}

/// Membership or non-membership of a key in a counterparty store. Only the
/// client verifier looks inside.
#[derive(Clone, PartialEq, Eq, derive_more::AsRef, derive_more::Into)]
#[as_ref(forward)]
pub struct CommitmentProofBytes {
    bytes: Vec<u8>,
}

impl CommitmentProofBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Vec<u8>> for CommitmentProofBytes {
    type Error = CommitmentError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        match bytes.is_empty() {
            true => Err(CommitmentError::EmptyCommitmentProof),
            false => Ok(Self { bytes }),
        }
    }
}

impl fmt::Debug for CommitmentProofBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CommitmentProof")
            .field(&HexBytes(&self.bytes))
            .finish()
    }
}

/// Where a chain keeps its IBC keys inside its store, e.g. `ibc`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CommitmentPrefix {
    bytes: Vec<u8>,
}

impl CommitmentPrefix {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The full key of `path` as the counterparty asks for it: `prefix/path`.
    pub fn apply(&self, path: &[u8]) -> Vec<u8> {
        [self.bytes.as_slice(), b"/", path].concat()
    }
}

impl TryFrom<Vec<u8>> for CommitmentPrefix {
    type Error = CommitmentError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        match bytes.is_empty() {
            true => Err(CommitmentError::EmptyCommitmentPrefix),
            false => Ok(Self { bytes }),
        }
    }
}

impl TryFrom<RawMerklePrefix> for CommitmentPrefix {
    type Error = CommitmentError;

    fn try_from(raw: RawMerklePrefix) -> Result<Self, Self::Error> {
        Self::try_from(raw.key_prefix)
    }
}

impl From<CommitmentPrefix> for RawMerklePrefix {
    fn from(prefix: CommitmentPrefix) -> Self {
        Self {
            key_prefix: prefix.bytes,
        }
    }
}

/// Prefixes are text in practice; anything else prints as hex.
impl fmt::Debug for CommitmentPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match core::str::from_utf8(&self.bytes) {
            Ok(text) => f.write_str(text),
            Err(_) => fmt::Debug::fmt(&HexBytes(&self.bytes), f),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CommitmentPrefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&format_args!("{self:?}"))
    }
}
