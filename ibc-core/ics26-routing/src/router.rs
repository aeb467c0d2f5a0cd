//! Defines the `Router`, which binds modules to ports

use std::collections::BTreeMap;

use ibc_core_host_types::identifiers::PortId;
use ibc_core_router_types::error::RouterError;
use ibc_core_router_types::module::ModuleId;
use tracing::debug;

use crate::module::Module;

/// Router as defined in ICS-26, which binds modules to ports.
pub trait Router {
    /// Returns a reference to a `Module` registered against the specified `ModuleId`
    fn get_route(&self, module_id: &ModuleId) -> Option<&dyn Module>;

    /// Returns a mutable reference to a `Module` registered against the specified `ModuleId`
    fn get_route_mut(&mut self, module_id: &ModuleId) -> Option<&mut dyn Module>;

    /// Return the module_id associated with a given port_id
    fn lookup_module(&self, port_id: &PortId) -> Option<ModuleId>;
}

/// A [`Router`] keeping modules and port bindings in ordered maps.
///
/// Each port is bound to at most one module, while a module may own several
/// ports. Bindings are permanent.
#[derive(Debug, Default)]
pub struct PortRouter {
    modules: BTreeMap<ModuleId, Box<dyn Module>>,
    ports: BTreeMap<PortId, ModuleId>,
}

impl PortRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` under `module_id`.
    pub fn add_route(
        &mut self,
        module_id: ModuleId,
        module: impl Module + 'static,
    ) -> Result<(), RouterError> {
        if self.modules.contains_key(&module_id) {
            return Err(RouterError::DuplicateModule { module_id });
        }
        debug!(module = %module_id, "registered ibc module");
        self.modules.insert(module_id, Box::new(module));
        Ok(())
    }

    /// Binds `port_id` to the registered module `module_id`.
    pub fn bind_port(&mut self, port_id: PortId, module_id: ModuleId) -> Result<(), RouterError> {
        if let Some(owner) = self.ports.get(&port_id) {
            return Err(RouterError::PortInUse {
                port_id,
                module_id: owner.clone(),
            });
        }
        if !self.modules.contains_key(&module_id) {
            return Err(RouterError::MissingModule);
        }
        debug!(port = %port_id, module = %module_id, "bound port");
        self.ports.insert(port_id, module_id);
        Ok(())
    }

    /// Ports currently bound to `module_id`.
    pub fn owned_ports(&self, module_id: &ModuleId) -> Vec<PortId> {
        self.ports
            .iter()
            .filter(|(_, owner)| *owner == module_id)
            .map(|(port_id, _)| port_id.clone())
            .collect()
    }
}

impl Router for PortRouter {
    fn get_route(&self, module_id: &ModuleId) -> Option<&dyn Module> {
        self.modules.get(module_id).map(|module| module.as_ref())
    }

    fn get_route_mut(&mut self, module_id: &ModuleId) -> Option<&mut dyn Module> {
        match self.modules.get_mut(module_id) {
            Some(module) => Some(module.as_mut()),
            None => None,
        }
    }

    fn lookup_module(&self, port_id: &PortId) -> Option<ModuleId> {
        self.ports.get(port_id).cloned()
    }
}
