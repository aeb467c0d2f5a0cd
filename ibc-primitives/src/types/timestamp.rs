//! Block times as seen by IBC: UTC instants with nanosecond precision.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::num::ParseIntError;
use core::ops::{Add, Sub};
use core::str::FromStr;
use core::time::Duration;

use displaydoc::Display;
use time::OffsetDateTime;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Nanoseconds since the unix epoch, the unit timestamps travel in on the
/// wire. Instants before the epoch or past `u64::MAX` nanoseconds (year
/// 2554) are not representable.
#[derive(PartialEq, Eq, Copy, Clone, Debug, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    nanos: u64,
}

impl Timestamp {
    pub fn from_nanoseconds(nanoseconds: u64) -> Result<Self, TimestampError> {
        Ok(Self { nanos: nanoseconds })
    }

    pub fn from_unix_timestamp(secs: u64, nanos: u32) -> Result<Self, TimestampError> {
        if u64::from(nanos) >= NANOS_PER_SEC {
            return Err(TimestampError::DateOutOfRange);
        }
        secs.checked_mul(NANOS_PER_SEC)
            .and_then(|whole| whole.checked_add(u64::from(nanos)))
            .map(|nanos| Self { nanos })
            .ok_or(TimestampError::DateOutOfRange)
    }

    /// The wall clock, for hosts that run in real time.
    pub fn now() -> Self {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        Self {
            nanos: u64::try_from(nanos).unwrap_or_default(),
        }
    }

    /// Time elapsed since `earlier`, or `None` if `earlier` is in fact later.
    pub fn duration_since(&self, earlier: &Self) -> Option<Duration> {
        self.nanos
            .checked_sub(earlier.nanos)
            .map(Duration::from_nanos)
    }

    pub fn nanoseconds(self) -> u64 {
        self.nanos
    }

    fn shifted(self, by: Duration, forward: bool) -> Result<Self, TimestampError> {
        let by = u64::try_from(by.as_nanos()).map_err(|_| TimestampError::TimestampOverflow)?;
        let nanos = if forward {
            self.nanos.checked_add(by)
        } else {
            self.nanos.checked_sub(by)
        };
        nanos
            .map(|nanos| Self { nanos })
            .ok_or(TimestampError::TimestampOverflow)
    }
}

impl TryFrom<u64> for Timestamp {
    type Error = TimestampError;

    fn try_from(nanoseconds: u64) -> Result<Self, Self::Error> {
        Self::from_nanoseconds(nanoseconds)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_nanoseconds(s.parse()?)
    }
}

/// RFC 3339 in UTC, e.g. `2023-01-01 0:00:00.0 +00:00:00`.
impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.nanos)) {
            Ok(time) => write!(f, "{time}"),
            Err(_) => write!(f, "{}ns", self.nanos),
        }
    }
}

impl Add<Duration> for Timestamp {
    type Output = Result<Self, TimestampError>;

    fn add(self, rhs: Duration) -> Self::Output {
        self.shifted(rhs, true)
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Result<Self, TimestampError>;

    fn sub(self, rhs: Duration) -> Self::Output {
        self.shifted(rhs, false)
    }
}

#[derive(Debug, Display, derive_more::From)]
pub enum TimestampError {
    /// timestamp is not a nanosecond count: `{0}`
    ParseInt(ParseIntError),
    /// date out of range
    DateOutOfRange,
    /// timestamp overflow when modifying with duration
    TimestampOverflow,
}

#[cfg(feature = "std")]
impl std::error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::ParseInt(e) => Some(e),
            _ => None,
        }
    }
}
