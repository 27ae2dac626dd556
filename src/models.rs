// src/models.rs

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::command::Command;
use crate::core::coercer::{CoerceError, ValueKind};
use crate::core::template;

// --- ACCESORES DE ESCRITURA ---
// Se capturan al construir el descriptor y trabajan sobre la instancia borrada (`dyn Any`).

/// Escribe un token, ya convertido, en el campo de la instancia.
pub type Setter = Arc<dyn Fn(&mut dyn Any, &str) -> Result<(), CoerceError> + Send + Sync>;

/// Comprueba una restricción del campo después del enlace.
pub type Validator = Arc<dyn Fn(&mut dyn Any) -> Result<(), String> + Send + Sync>;

pub(crate) fn setter<F>(f: F) -> Setter
where
    F: Fn(&mut dyn Any, &str) -> Result<(), CoerceError> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub(crate) fn validator<F>(f: F) -> Validator
where
    F: Fn(&mut dyn Any) -> Result<(), String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Reenvía un setter declarado en `P` a través de la proyección `C -> P`.
fn project_setter<C: Any, P: Any>(inner: &Setter, projection: fn(&mut C) -> &mut P) -> Setter {
    let inner = Arc::clone(inner);
    setter(move |target, token| {
        let outer = target
            .downcast_mut::<C>()
            .ok_or(CoerceError::TargetMismatch(std::any::type_name::<C>()))?;
        let base: &mut dyn Any = projection(outer);
        inner(base, token)
    })
}

fn project_validator<C: Any, P: Any>(
    inner: &Validator,
    projection: fn(&mut C) -> &mut P,
) -> Validator {
    let inner = Arc::clone(inner);
    validator(move |target| {
        let outer = target.downcast_mut::<C>().ok_or_else(|| {
            format!("The binding target is not a `{}`.", std::any::type_name::<C>())
        })?;
        let base: &mut dyn Any = projection(outer);
        inner(base)
    })
}

// --- SLOTS ---

/// Argumento posicional declarado por un comando.
#[derive(Clone)]
pub struct ArgumentSlot {
    pub position: usize,
    /// Identificador del campo; origen del nombre por defecto y de los mensajes de validación.
    pub ident: String,
    pub name: String,
    pub description: String,
    pub required: bool,
    pub kind: ValueKind,
    pub type_name: &'static str,
    pub(crate) setter: Setter,
    pub(crate) validators: Vec<Validator>,
}

impl ArgumentSlot {
    pub(crate) fn project<C: Any, P: Any>(&self, projection: fn(&mut C) -> &mut P) -> Self {
        Self {
            setter: project_setter(&self.setter, projection),
            validators: self
                .validators
                .iter()
                .map(|v| project_validator(v, projection))
                .collect(),
            ..self.clone()
        }
    }
}

impl fmt::Debug for ArgumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSlot")
            .field("position", &self.position)
            .field("name", &self.name)
            .field("required", &self.required)
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Opción con nombre (`-s|--server`) declarada por un comando.
#[derive(Clone)]
pub struct OptionSlot {
    pub ident: String,
    pub template: String,
    pub description: String,
    pub kind: ValueKind,
    pub type_name: &'static str,
    pub(crate) setter: Setter,
    pub(crate) validators: Vec<Validator>,
}

impl OptionSlot {
    pub fn is_flag(&self) -> bool {
        self.kind == ValueKind::Flag
    }

    pub fn matches(&self, token: &str) -> bool {
        template::matches(&self.template, token)
    }

    pub(crate) fn project<C: Any, P: Any>(&self, projection: fn(&mut C) -> &mut P) -> Self {
        Self {
            setter: project_setter(&self.setter, projection),
            validators: self
                .validators
                .iter()
                .map(|v| project_validator(v, projection))
                .collect(),
            ..self.clone()
        }
    }
}

impl fmt::Debug for OptionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSlot")
            .field("template", &self.template)
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

// --- DESCRIPTOR ---

/// Descripción inmutable de un tipo de comando. Se construye una vez por tipo
/// (ver [`crate::core::descriptor::descriptor`]) y se comparte con `Arc`.
pub struct CommandDescriptor {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub name: String,
    pub description: String,
    pub is_abstract: bool,
    pub parent: Option<Arc<CommandDescriptor>>,
    /// Ordenados por posición.
    pub arguments: Vec<ArgumentSlot>,
    /// Ordenadas por plantilla.
    pub options: Vec<OptionSlot>,
    pub help_template: String,
    pub version_template: String,
    pub(crate) factory: Option<fn() -> Box<dyn Command>>,
}

impl CommandDescriptor {
    /// El comando raíz es el que no tiene padre; solo él atiende a la opción de versión.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn required_arguments(&self) -> impl Iterator<Item = &ArgumentSlot> {
        self.arguments.iter().filter(|a| a.required)
    }

    pub fn find_option(&self, token: &str) -> Option<&OptionSlot> {
        self.options.iter().find(|o| o.matches(token))
    }

    /// Opciones implícitas visibles para este comando.
    pub fn is_builtin_option(&self, token: &str) -> bool {
        template::matches(&self.help_template, token)
            || (self.is_root() && template::matches(&self.version_template, token))
    }

    /// Indica si el token activa una opción declarada, heredada o implícita.
    pub fn is_option(&self, token: &str) -> bool {
        !token.is_empty() && (self.find_option(token).is_some() || self.is_builtin_option(token))
    }

    /// Ancestros, del más cercano al más lejano.
    pub fn ancestors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        std::iter::successors(self.parent.as_deref(), |d| d.parent.as_deref())
    }

    /// Ancestros con nombre (ni abstractos ni raíz), del más lejano al más cercano.
    pub fn parent_commands(&self) -> Vec<CommandInfo> {
        let mut parents: Vec<CommandInfo> = self
            .ancestors()
            .filter(|d| !d.is_abstract && !d.is_root())
            .map(CommandDescriptor::info)
            .collect();
        parents.reverse();
        parents
    }

    pub fn info(&self) -> CommandInfo {
        CommandInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            type_name: self.type_name,
        }
    }

    /// Crea una instancia nueva del comando, salvo que sea abstracto.
    pub fn instantiate(&self) -> Option<Box<dyn Command>> {
        self.factory.map(|create| create())
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("is_abstract", &self.is_abstract)
            .field("parent", &self.parent.as_ref().map(|p| &p.name))
            .field("arguments", &self.arguments)
            .field("options", &self.options)
            .field("help_template", &self.help_template)
            .field("version_template", &self.version_template)
            .finish()
    }
}

/// Vista pública y ligera de un comando (nombre y descripción).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    pub type_name: &'static str,
}
