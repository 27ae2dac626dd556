// src/core/binder.rs

use thiserror::Error;

use crate::command::Command;
use crate::core::coercer::CoerceError;
use crate::models::{CommandDescriptor, OptionSlot, Setter};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    #[error("No arguments exist for this command.")]
    NoArgumentsExist,
    #[error("Argument '{0}' is required.")]
    RequiredArgumentMissing(String),
    #[error("'{token}' is not a valid value for '{slot}'. Expected one of: {expected}.")]
    InvalidEnumValue {
        slot: String,
        token: String,
        expected: String,
    },
    #[error("'{token}' is not a valid value for '{slot}': expected {expected} ({reason}).")]
    InvalidScalarValue {
        slot: String,
        token: String,
        expected: &'static str,
        reason: String,
    },
    #[error("The value for '{slot}' is not a valid document: {reason}.")]
    InvalidStructuredValue { slot: String, reason: String },
    #[error("Unexpected token '{0}'.")]
    UnexpectedToken(String),
    #[error("{0}")]
    ValidationFailed(String),
    #[error("The binding target for '{slot}' is not a `{expected}`.")]
    TargetMismatch { slot: String, expected: &'static str },
}

fn coerce_failure(slot: &str, token: &str, error: CoerceError) -> BindError {
    match error {
        CoerceError::InvalidEnum { expected } => BindError::InvalidEnumValue {
            slot: slot.to_string(),
            token: token.to_string(),
            expected: expected.join(", "),
        },
        CoerceError::InvalidScalar { expected, reason } => BindError::InvalidScalarValue {
            slot: slot.to_string(),
            token: token.to_string(),
            expected,
            reason,
        },
        CoerceError::InvalidStructured { reason } => BindError::InvalidStructuredValue {
            slot: slot.to_string(),
            reason,
        },
        CoerceError::TargetMismatch(expected) => BindError::TargetMismatch {
            slot: slot.to_string(),
            expected,
        },
    }
}

fn write(
    setter: &Setter,
    slot: &str,
    instance: &mut dyn Command,
    token: &str,
) -> Result<(), BindError> {
    log::debug!("Enlazando '{}' <- '{}'", slot, token);
    setter(instance.as_any_mut(), token).map_err(|e| coerce_failure(slot, token, e))
}

/// Enlaza el flujo de tokens sobre `instance` y valida el resultado.
///
/// Falla rápido: ante un error la instancia queda escrita a medias y el
/// llamador debe descartarla sin ejecutarla.
pub fn bind(
    descriptor: &CommandDescriptor,
    instance: &mut dyn Command,
    tokens: &[String],
) -> Result<(), BindError> {
    if tokens.is_empty() {
        return Ok(());
    }

    let remaining = bind_arguments(descriptor, instance, tokens)?;
    bind_options(descriptor, instance, remaining)?;
    validate(descriptor, instance)
}

/// Fase posicional: rellena los argumentos en orden hasta el primer token que
/// parezca una opción. Devuelve el resto del flujo, desde ese token inclusive.
pub fn bind_arguments<'t>(
    descriptor: &CommandDescriptor,
    instance: &mut dyn Command,
    tokens: &'t [String],
) -> Result<&'t [String], BindError> {
    let arguments = &descriptor.arguments;

    if arguments.is_empty() {
        return match tokens.first() {
            Some(first) if !descriptor.is_option(first) => Err(BindError::NoArgumentsExist),
            _ => Ok(tokens),
        };
    }

    let mut consumed = 0;
    for token in tokens {
        if descriptor.is_option(token) {
            break;
        }
        let slot = arguments
            .get(consumed)
            .ok_or_else(|| BindError::UnexpectedToken(token.clone()))?;
        write(&slot.setter, &slot.name, instance, token)?;
        consumed += 1;
    }

    // Cualquier argumento obligatorio que no se alcanzó falta, en orden de posición.
    if let Some(missing) = arguments[consumed..].iter().find(|a| a.required) {
        return Err(BindError::RequiredArgumentMissing(missing.name.clone()));
    }

    Ok(&tokens[consumed..])
}

/// Fase de opciones: cada plantilla abre su opción y sustituye a la abierta;
/// los flags se activan al momento y no dejan nada abierto. Los tokens sueltos
/// son valores de la opción abierta; una opción sin valor conserva el suyo.
pub fn bind_options(
    descriptor: &CommandDescriptor,
    instance: &mut dyn Command,
    tokens: &[String],
) -> Result<(), BindError> {
    let mut open: Option<&OptionSlot> = None;

    for token in tokens {
        if let Some(option) = descriptor.find_option(token) {
            if option.is_flag() {
                write(&option.setter, &option.template, instance, "true")?;
                open = None;
            } else {
                open = Some(option);
            }
            continue;
        }

        if descriptor.is_builtin_option(token) {
            open = None;
            continue;
        }

        match open {
            Some(option) => write(&option.setter, &option.template, instance, token)?,
            None => return Err(BindError::UnexpectedToken(token.clone())),
        }
    }

    Ok(())
}

/// Restricciones de los slots (argumentos y después opciones) y del comando.
pub fn validate(descriptor: &CommandDescriptor, instance: &mut dyn Command) -> Result<(), BindError> {
    let validators = descriptor
        .arguments
        .iter()
        .flat_map(|a| a.validators.iter())
        .chain(descriptor.options.iter().flat_map(|o| o.validators.iter()));

    for check in validators {
        check(instance.as_any_mut()).map_err(BindError::ValidationFailed)?;
    }

    instance.validate().map_err(BindError::ValidationFailed)
}
