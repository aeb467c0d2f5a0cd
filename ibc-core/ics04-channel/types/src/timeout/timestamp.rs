use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_primitives::Timestamp;

use crate::error::PacketError;

/// Indicates a timestamp on the destination chain after which the packet will
/// no longer be processed, and will instead count as having timed-out.
///
/// Timestamps travel as u64 Unix nanoseconds; zero means the timestamp is not
/// set, which the explicit `Never` variant stands for.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default)]
pub enum TimeoutTimestamp {
    #[default]
    Never,
    At(Timestamp),
}

impl TimeoutTimestamp {
    pub fn from_nanoseconds(nanoseconds: u64) -> Result<Self, PacketError> {
        Self::try_from(nanoseconds)
    }

    /// Returns the timestamp in nanoseconds, 0 standing for no timeout.
    pub fn nanoseconds(&self) -> u64 {
        match self {
            Self::At(timestamp) => timestamp.nanoseconds(),
            Self::Never => 0,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }

    pub fn no_timeout() -> Self {
        Self::Never
    }

    /// Check if a timestamp is *at or past* the timeout timestamp, and thus
    /// is deemed expired.
    pub fn has_expired(&self, timestamp: &Timestamp) -> bool {
        match self {
            Self::At(timeout_timestamp) => timestamp >= timeout_timestamp,
            Self::Never => false,
        }
    }
}

impl TryFrom<u64> for TimeoutTimestamp {
    type Error = PacketError;

    fn try_from(timestamp: u64) -> Result<Self, Self::Error> {
        if timestamp == 0 {
            return Ok(TimeoutTimestamp::Never);
        }

        Ok(TimeoutTimestamp::At(Timestamp::from_nanoseconds(timestamp)?))
    }
}

impl From<Timestamp> for TimeoutTimestamp {
    fn from(timestamp: Timestamp) -> Self {
        Self::At(timestamp)
    }
}

impl Display for TimeoutTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            TimeoutTimestamp::At(timeout_timestamp) => write!(f, "{timeout_timestamp}"),
            TimeoutTimestamp::Never => write!(f, "no timeout timestamp"),
        }
    }
}

#[cfg(feature = "serde")]
mod serialize {
    use serde::{Deserialize, Serialize};

    use super::TimeoutTimestamp;

    impl Serialize for TimeoutTimestamp {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            self.nanoseconds().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for TimeoutTimestamp {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let timestamp = u64::deserialize(deserializer)?;
            TimeoutTimestamp::try_from(timestamp).map_err(serde::de::Error::custom)
        }
    }
}
