//! Foundational error types that are applicable across multiple IBC crates.

use displaydoc::Display;

/// Causes of decoding failures
#[derive(Debug, Display, PartialEq, Eq)]
pub enum DecodingError {
    /// invalid identifier error: `{0}`
    InvalidIdentifier(String),
    /// invalid field: `{0}`
    InvalidField(String),
    /// invalid JSON data: `{description}`
    InvalidJson { description: String },
    /// missing field: `{0}`
    MissingField(String),
    /// mismatched type URLs: expected `{expected}`, actual `{actual}`
    MismatchedTypeUrls { expected: String, actual: String },
    /// unknown type URL: `{0}`
    UnknownTypeUrl(String),
    /// failed to decode proto value: `{description}`
    FailedToDecodeProto { description: String },
}

impl DecodingError {
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField(field.to_string())
    }

    /// Helper for the `Protobuf::decode_vec` family, whose error types only
    /// promise `Display`.
    pub fn proto(e: impl core::fmt::Display) -> Self {
        Self::FailedToDecodeProto {
            description: e.to_string(),
        }
    }
}

impl From<prost::DecodeError> for DecodingError {
    fn from(e: prost::DecodeError) -> Self {
        Self::proto(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodingError {}
