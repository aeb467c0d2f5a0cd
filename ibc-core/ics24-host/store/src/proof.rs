//! Commitment scheme of the store.
//!
//! Every entry is reduced to a leaf `sha256(key) ‖ sha256(value)`. The root
//! of a state is the SHA-256 of its leaves in key order. A [`StateProof`]
//! carries every leaf of one committed state, so a verifier holding only the
//! root can check that a key maps to a value, or that it is absent.

use sha2::{Digest, Sha256};

/// Leaves of one committed state, in key order.
#[derive(Clone, PartialEq, prost::Message)]
pub struct StateProof {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub leaves: Vec<Vec<u8>>,
}

impl StateProof {
    /// Root hash the leaves commit to.
    pub fn root(&self) -> Vec<u8> {
        root_from_leaves(self.leaves.iter())
    }

    /// Whether `key` maps to `value` in the state with root `root`.
    pub fn verify_membership(&self, root: &[u8], key: &[u8], value: &[u8]) -> bool {
        let leaf = leaf_hash(key, value);
        self.root() == root && self.leaves.iter().any(|l| *l == leaf)
    }

    /// Whether `key` is absent from the state with root `root`.
    pub fn verify_non_membership(&self, root: &[u8], key: &[u8]) -> bool {
        let key_hash = Sha256::digest(key);
        self.root() == root
            && !self
                .leaves
                .iter()
                .any(|l| l.get(..32) == Some(key_hash.as_slice()))
    }
}

pub fn leaf_hash(key: &[u8], value: &[u8]) -> Vec<u8> {
    let mut leaf = Sha256::digest(key).to_vec();
    leaf.extend_from_slice(&Sha256::digest(value));
    leaf
}

pub fn root_from_leaves<'a>(leaves: impl Iterator<Item = &'a Vec<u8>>) -> Vec<u8> {
    let mut hasher = Sha256::new();
    for leaf in leaves {
        hasher.update(leaf);
    }
    hasher.finalize().to_vec()
}
