use core::str::FromStr;

use derive_more::{Display, From, Into};

use crate::error::IdentifierError;

/// The sequence number of a packet enforces ordering among packets from the
/// same channel end.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct Sequence(u64);

impl Sequence {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Saturates at `u64::MAX` rather than wrapping around.
    pub fn increment(&self) -> Sequence {
        Sequence(self.0.saturating_add(1))
    }

    /// Big-endian encoding, as stored under the sequence paths.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }
}

impl FromStr for Sequence {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|e| IdentifierError::InvalidStringAsSequence {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}
