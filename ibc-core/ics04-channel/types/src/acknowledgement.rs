//! Acknowledgements a receiving module writes for each packet.

use core::fmt::{Display, Error as FmtError, Formatter};

use derive_more::Into;

use crate::error::PacketError;

/// Opaque acknowledgement bytes; only the sending module interprets them.
/// Never empty, since an empty acknowledgement means "not written yet".
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Into)]
pub struct Acknowledgement(Vec<u8>);

impl Acknowledgement {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl AsRef<[u8]> for Acknowledgement {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl TryFrom<Vec<u8>> for Acknowledgement {
    type Error = PacketError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            Err(PacketError::EmptyAcknowledgement)
        } else {
            Ok(Self(bytes))
        }
    }
}

/// The JSON acknowledgement most applications write: either a result or
/// an error message, never empty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AcknowledgementStatus {
    #[cfg_attr(feature = "serde", serde(rename = "result"))]
    Success(StatusValue),
    #[cfg_attr(feature = "serde", serde(rename = "error"))]
    Error(StatusValue),
}

/// A non-empty acknowledgement payload.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub struct StatusValue(String);

impl StatusValue {
    pub fn new(value: impl ToString) -> Result<Self, PacketError> {
        match value.to_string() {
            value if value.is_empty() => Err(PacketError::EmptyAcknowledgementStatus),
            value => Ok(Self(value)),
        }
    }
}

impl AcknowledgementStatus {
    pub fn success(value: StatusValue) -> Self {
        Self::Success(value)
    }

    pub fn error(value: StatusValue) -> Self {
        Self::Error(value)
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    fn json_key(&self) -> &'static str {
        match self {
            Self::Success(_) => "result",
            Self::Error(_) => "error",
        }
    }

    fn value(&self) -> &StatusValue {
        match self {
            Self::Success(value) | Self::Error(value) => value,
        }
    }
}

impl Display for AcknowledgementStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        Display::fmt(self.value(), f)
    }
}

impl From<AcknowledgementStatus> for Vec<u8> {
    fn from(status: AcknowledgementStatus) -> Self {
        format!(r#"{{"{}":"{}"}}"#, status.json_key(), status.value()).into_bytes()
    }
}

impl From<AcknowledgementStatus> for Acknowledgement {
    fn from(status: AcknowledgementStatus) -> Self {
        Self(status.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_encodes_as_json_object() {
        let ack: Acknowledgement =
            AcknowledgementStatus::success(StatusValue::new("AQ==").unwrap()).into();
        assert_eq!(ack.as_bytes(), br#"{"result":"AQ=="}"#);

        let ack: Acknowledgement =
            AcknowledgementStatus::error(StatusValue::new("denied").unwrap()).into();
        assert_eq!(ack.as_bytes(), br#"{"error":"denied"}"#);
    }

    #[test]
    fn empty_values_are_rejected() {
        assert!(StatusValue::new("").is_err());
        assert!(Acknowledgement::try_from(vec![]).is_err());
    }
}
