// src/core/resolver.rs

use std::sync::Arc;
use thiserror::Error;

use crate::core::binder::BindError;
use crate::core::descriptor::DescriptorError;
use crate::core::registry::Registry;
use crate::core::template;
use crate::models::CommandDescriptor;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error("Command '{0}' cannot be executed directly.")]
    AbstractCommand(String),
}

/// Estados de la resolución de un comando.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Root,
    ResolvingChild,
    Bound,
    ShowHelp,
    ShowVersion,
    Error,
}

/// Siguiente paso decidido a partir del comando actual y del flujo restante.
#[derive(Debug)]
pub enum Transition<'t> {
    /// El primer token nombra un subcomando: se instancia y se resuelve con el resto.
    Child {
        descriptor: Arc<CommandDescriptor>,
        rest: &'t [String],
    },
    /// Flujo vacío y sin argumentos obligatorios: se ejecuta sin enlazar.
    Execute,
    /// Hay tokens para el enlazador.
    Bind,
    ShowHelp,
    ShowVersion,
}

impl Transition<'_> {
    pub fn state(&self) -> State {
        match self {
            Transition::Child { .. } => State::ResolvingChild,
            Transition::Execute | Transition::Bind => State::Bound,
            Transition::ShowHelp => State::ShowHelp,
            Transition::ShowVersion => State::ShowVersion,
        }
    }
}

/// Decide la transición para `descriptor` con los tokens `tokens`.
///
/// Orden: flujo vacío, subcomando, ayuda, versión (solo raíz), enlace.
pub fn next_transition<'t>(
    registry: &Registry,
    descriptor: &CommandDescriptor,
    tokens: &'t [String],
) -> Result<Transition<'t>, ResolveError> {
    let Some(first) = tokens.first() else {
        if let Some(missing) = descriptor.required_arguments().next() {
            return Err(BindError::RequiredArgumentMissing(missing.name.clone()).into());
        }
        return Ok(Transition::Execute);
    };

    if let Some(child) = registry.find_subcommand(descriptor, first) {
        return Ok(Transition::Child {
            descriptor: child,
            rest: &tokens[1..],
        });
    }

    if template::matches_any(&descriptor.help_template, tokens) {
        return Ok(Transition::ShowHelp);
    }

    if descriptor.is_root() && template::matches_any(&descriptor.version_template, tokens) {
        return Ok(Transition::ShowVersion);
    }

    Ok(Transition::Bind)
}
