//! Foundational error types that are applicable across the IBC handler crates.

use displaydoc::Display;

/// Errors that originate from host implementations.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum HostError {
    /// invalid data: `{description}`
    InvalidData { description: String },
    /// missing data: `{description}`
    MissingData { description: String },
    /// failed to store data: `{description}`
    FailedToStoreData { description: String },
    /// failed to retrieve data from store: `{description}`
    FailedToRetrieveFromStore { description: String },
    /// other error: `{description}`
    Other { description: String },
}

impl HostError {
    pub fn missing_data(description: impl ToString) -> Self {
        Self::MissingData {
            description: description.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingData { .. } => ErrorKind::NotFound,
            Self::InvalidData { .. } => ErrorKind::Malformed,
            Self::FailedToStoreData { .. }
            | Self::FailedToRetrieveFromStore { .. }
            | Self::Other { .. } => ErrorKind::InvalidState,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HostError {}

/// Errors that arise when parsing identifiers.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// identifier `{id}` has invalid length; must be between [`{min}`,`{max}`]
    InvalidLength { id: String, min: u64, max: u64 },
    /// identifier `{id}` must only contain alphanumeric characters or `.`, `_`, `+`, `-`, `#`, `[`, `]`, `<`, `>`
    InvalidCharacter { id: String },
    /// identifier prefix `{prefix}` is invalid
    InvalidPrefix { prefix: String },
    /// failed to parse `{value}` as a sequence: `{reason}`
    InvalidStringAsSequence { value: String, reason: String },
    /// identifier cannot be empty
    Empty,
}

#[cfg(feature = "std")]
impl std::error::Error for IdentifierError {}

/// Coarse classification of every failure a handler may report.
///
/// Callers that only care about the class of a failure (e.g. a relayer
/// deciding whether resubmitting with a fresher proof can help) match on
/// this instead of the per-module error enums.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// unknown client, connection, channel or sequence
    NotFound,
    /// operation attempted on an object in a disallowed state
    InvalidState,
    /// proof or header check failed
    VerificationFailed,
    /// timeout elapsed or client no longer active
    Expired,
    /// duplicate binding, replay or mismatch with existing state
    Conflict,
    /// application callback vetoed the operation
    ApplicationRejected,
    /// message or data could not be decoded or is invalid on its own
    Malformed,
}
