use displaydoc::Display;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// failed to encode the value stored at `{path}`
    FailedToEncode { path: String },
    /// failed to decode the value stored at `{path}`
    FailedToDecode { path: String },
    /// no state was committed at height `{height}`
    UnknownHeight { height: u64 },
}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}
