//! Defines the commitment error type

use displaydoc::Display;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    /// empty commitment prefix
    EmptyCommitmentPrefix,
    /// empty commitment proof
    EmptyCommitmentProof,
    /// empty commitment root
    EmptyCommitmentRoot,
    /// decoding commitment proof bytes failed: `{0}`
    DecodingFailure(String),
}

#[cfg(feature = "std")]
impl std::error::Error for CommitmentError {}
