//! Heights of counterparty chains.

use ibc_proto::ibc::core::client::v1::Height as RawHeight;
use ibc_proto::Protobuf;

use crate::error::ClientError;

/// The height of a counterparty chain as reported by its verifier.
///
/// Ordered by revision number, then by height within the revision. Height
/// zero does not exist: on the wire it means "unset".
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Height {
    revision_number: u64,
    revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Result<Self, ClientError> {
        match revision_height {
            0 => Err(ClientError::InvalidHeight),
            _ => Ok(Self {
                revision_number,
                revision_height,
            }),
        }
    }

    /// The first height of a revision.
    pub fn min(revision_number: u64) -> Self {
        Self {
            revision_number,
            revision_height: 1,
        }
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    pub fn revision_height(&self) -> u64 {
        self.revision_height
    }

    /// `delta` blocks later in the same revision.
    pub fn add(&self, delta: u64) -> Height {
        Height {
            revision_height: self.revision_height.saturating_add(delta),
            ..*self
        }
    }

    pub fn increment(&self) -> Height {
        self.add(1)
    }
}

impl Protobuf<RawHeight> for Height {}

impl TryFrom<RawHeight> for Height {
    type Error = ClientError;

    fn try_from(raw: RawHeight) -> Result<Self, Self::Error> {
        Self::new(raw.revision_number, raw.revision_height)
    }
}

impl From<Height> for RawHeight {
    fn from(height: Height) -> Self {
        Self {
            revision_number: height.revision_number,
            revision_height: height.revision_height,
        }
    }
}

/// `revision-height`, e.g. `0-42`.
impl core::fmt::Display for Height {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}
