// src/core/registry.rs

use std::sync::Arc;

use crate::command::CommandType;
use crate::core::descriptor::{self, DescriptorError};
use crate::models::CommandDescriptor;

/// El universo de tipos de comando conocidos por la aplicación.
/// El descubrimiento de subcomandos solo ve los tipos registrados aquí.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    commands: Vec<Arc<CommandDescriptor>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra `C`. Registrar dos veces el mismo tipo no tiene efecto.
    pub fn register<C: CommandType>(&mut self) -> Result<&mut Self, DescriptorError> {
        let descriptor = descriptor::descriptor::<C>()?;
        if !self.commands.iter().any(|d| d.type_id == descriptor.type_id) {
            log::debug!("Comando registrado: '{}' ({})", descriptor.name, descriptor.type_name);
            self.commands.push(descriptor);
        }
        Ok(self)
    }

    pub fn commands(&self) -> &[Arc<CommandDescriptor>] {
        &self.commands
    }

    /// Subcomandos invocables de `parent`, ordenados por nombre.
    ///
    /// Un tipo es subcomando de `parent` si su padre es `parent`, o si llega a
    /// él atravesando solo intermedios abstractos.
    pub fn subcommands(&self, parent: &CommandDescriptor) -> Vec<Arc<CommandDescriptor>> {
        let mut found: Vec<Arc<CommandDescriptor>> = self
            .commands
            .iter()
            .filter(|d| !d.is_abstract && descends_through_abstract(d, parent))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// Busca el subcomando cuyo nombre coincide con el token, sin distinguir mayúsculas.
    pub fn find_subcommand(
        &self,
        parent: &CommandDescriptor,
        token: &str,
    ) -> Option<Arc<CommandDescriptor>> {
        let wanted = token.to_lowercase();
        self.subcommands(parent)
            .into_iter()
            .find(|d| d.name.to_lowercase() == wanted)
    }
}

fn descends_through_abstract(candidate: &CommandDescriptor, parent: &CommandDescriptor) -> bool {
    for ancestor in candidate.ancestors() {
        if ancestor.type_id == parent.type_id {
            return true;
        }
        if !ancestor.is_abstract {
            return false;
        }
    }
    false
}
