use displaydoc::Display;
use ibc::core::handler::types::error::ContextError;
use ibc::core::host::types::error::ErrorKind;

/// Errors of the query functions.
#[derive(Debug, Display)]
pub enum QueryError {
    /// host state lookup failed: `{0}`
    Context(ContextError),
    /// missing proof: `{0}`
    MissingProof(String),
}

impl QueryError {
    pub fn missing_proof<T: ToString>(description: T) -> Self {
        Self::MissingProof(description.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Context(e) => e.kind(),
            Self::MissingProof(_) => ErrorKind::NotFound,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context(e) => Some(e),
            Self::MissingProof(_) => None,
        }
    }
}

impl From<ContextError> for QueryError {
    fn from(e: ContextError) -> Self {
        Self::Context(e)
    }
}
