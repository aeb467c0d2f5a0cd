use displaydoc::Display;
use ibc_core_host_types::error::{ErrorKind, HostError};
use ibc_core_host_types::identifiers::PortId;

use crate::module::ModuleId;

/// Error type for the router module.
#[derive(Debug, Display)]
pub enum RouterError {
    /// host error: `{0}`
    Host(HostError),
    /// port `{port_id}` is already bound to module `{module_id}`
    PortInUse { port_id: PortId, module_id: ModuleId },
    /// module `{module_id}` is already registered
    DuplicateModule { module_id: ModuleId },
    /// no module is bound to port `{port_id}`
    UnknownPort { port_id: PortId },
    /// missing module
    MissingModule,
}

impl RouterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Host(e) => e.kind(),
            Self::PortInUse { .. } | Self::DuplicateModule { .. } => ErrorKind::Conflict,
            Self::UnknownPort { .. } | Self::MissingModule => ErrorKind::NotFound,
        }
    }
}

impl From<HostError> for RouterError {
    fn from(e: HostError) -> Self {
        Self::Host(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Host(e) => Some(e),
            _ => None,
        }
    }
}
