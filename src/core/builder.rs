// src/core/builder.rs

use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::command::{Command, CommandType};
use crate::constants::{DEFAULT_HELP_TEMPLATE, DEFAULT_VERSION_TEMPLATE};
use crate::core::coercer::{CoerceError, FromToken};
use crate::core::descriptor::{self, DescriptorError};
use crate::core::template;
use crate::models::{
    self, ArgumentSlot, CommandDescriptor, OptionSlot, Setter, Validator,
};

type ParentResolver = fn() -> Result<Arc<CommandDescriptor>, DescriptorError>;
type Inheritance = Box<dyn Fn(&CommandDescriptor) -> (Vec<ArgumentSlot>, Vec<OptionSlot>)>;

struct ParentLink {
    resolve: ParentResolver,
    inherit: Option<Inheritance>,
}

fn instantiate<C: CommandType>() -> Box<dyn Command> {
    Box::new(C::default())
}

/// Nombre por defecto: último segmento del nombre del tipo (`app::SubCommand` -> `SubCommand`).
fn default_name<C>() -> String {
    let full = type_name::<C>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

fn typed_setter<C: Any, T: FromToken>(accessor: fn(&mut C) -> &mut T) -> Setter {
    models::setter(move |target, token| {
        let command = target
            .downcast_mut::<C>()
            .ok_or(CoerceError::TargetMismatch(type_name::<C>()))?;
        *accessor(command) = T::from_token(token)?;
        Ok(())
    })
}

fn range_validator<C: Any, T>(
    ident: String,
    accessor: fn(&mut C) -> &mut T,
    min: T,
    max: T,
) -> Validator
where
    T: PartialOrd + Display + Send + Sync + 'static,
{
    models::validator(move |target| {
        let command = target
            .downcast_mut::<C>()
            .ok_or_else(|| format!("The binding target is not a `{}`.", type_name::<C>()))?;
        let value = accessor(command);
        if *value < min || *value > max {
            return Err(format!("The field {ident} must be between {min} and {max}."));
        }
        Ok(())
    })
}

fn check_validator<C: Any, T: 'static>(
    accessor: fn(&mut C) -> &mut T,
    check: fn(&T) -> Result<(), String>,
) -> Validator {
    models::validator(move |target| {
        let command = target
            .downcast_mut::<C>()
            .ok_or_else(|| format!("The binding target is not a `{}`.", type_name::<C>()))?;
        check(accessor(command))
    })
}

/// Configuración de un argumento posicional antes de añadirlo al comando.
pub struct ArgumentBuilder<C, T> {
    position: usize,
    ident: String,
    name: Option<String>,
    description: String,
    required: bool,
    accessor: fn(&mut C) -> &mut T,
    validators: Vec<Validator>,
}

impl<C: Any, T: FromToken> ArgumentBuilder<C, T> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restringe el valor al intervalo cerrado `[min, max]`.
    pub fn range(mut self, min: T, max: T) -> Self
    where
        T: PartialOrd + Display + Send + Sync,
    {
        let validator = range_validator(self.ident.clone(), self.accessor, min, max);
        self.validators.push(validator);
        self
    }

    pub fn check(mut self, check: fn(&T) -> Result<(), String>) -> Self {
        self.validators.push(check_validator(self.accessor, check));
        self
    }

    fn build(self) -> ArgumentSlot {
        ArgumentSlot {
            position: self.position,
            name: self.name.unwrap_or_else(|| self.ident.clone()),
            ident: self.ident,
            description: self.description,
            required: self.required,
            kind: T::KIND,
            type_name: type_name::<T>(),
            setter: typed_setter(self.accessor),
            validators: self.validators,
        }
    }
}

/// Configuración de una opción antes de añadirla al comando.
pub struct OptionBuilder<C, T> {
    ident: String,
    template: Option<String>,
    description: String,
    accessor: fn(&mut C) -> &mut T,
    validators: Vec<Validator>,
}

impl<C: Any, T: FromToken> OptionBuilder<C, T> {
    /// Alias separados por `|`, por ejemplo `-s|--size`.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn range(mut self, min: T, max: T) -> Self
    where
        T: PartialOrd + Display + Send + Sync,
    {
        let validator = range_validator(self.ident.clone(), self.accessor, min, max);
        self.validators.push(validator);
        self
    }

    pub fn check(mut self, check: fn(&T) -> Result<(), String>) -> Self {
        self.validators.push(check_validator(self.accessor, check));
        self
    }

    fn build(self) -> OptionSlot {
        OptionSlot {
            template: self.template.unwrap_or_else(|| format!("-{}", self.ident)),
            ident: self.ident,
            description: self.description,
            kind: T::KIND,
            type_name: type_name::<T>(),
            setter: typed_setter(self.accessor),
            validators: self.validators,
        }
    }
}

/// Tabla declarativa de un tipo de comando.
///
/// ```ignore
/// CommandBuilder::<PizzaCommand>::new()
///     .named("pizza")
///     .parent::<MainCommand>()
///     .argument_with(1, "pizza_type", |c| &mut c.pizza_type, |a| a.name("type").required())
///     .option_with("size", |c| &mut c.size, |o| o.template("-s|--size"))
/// ```
pub struct CommandBuilder<C> {
    name: Option<String>,
    description: String,
    is_abstract: bool,
    parent: Option<ParentLink>,
    arguments: Vec<ArgumentSlot>,
    options: Vec<OptionSlot>,
    help_template: Option<String>,
    version_template: Option<String>,
    marker: PhantomData<fn() -> C>,
}

impl<C: CommandType> Default for CommandBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CommandType> CommandBuilder<C> {
    pub fn new() -> Self {
        Self {
            name: None,
            description: String::new(),
            is_abstract: false,
            parent: None,
            arguments: Vec::new(),
            options: Vec::new(),
            help_template: None,
            version_template: None,
            marker: PhantomData,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Intermedio abstracto: nunca se invoca, solo aporta slots y agrupa subcomandos.
    pub fn abstract_command(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Cuelga el comando de `P` en el árbol de subcomandos.
    pub fn parent<P: CommandType>(mut self) -> Self {
        self.parent = Some(ParentLink {
            resolve: descriptor::descriptor::<P>,
            inherit: None,
        });
        self
    }

    /// Como [`parent`](Self::parent), y además hereda los argumentos y opciones de `P`,
    /// que se escriben a través de `projection`.
    pub fn inherit<P: CommandType>(mut self, projection: fn(&mut C) -> &mut P) -> Self {
        let inherit: Inheritance = Box::new(move |base: &CommandDescriptor| {
            let arguments = base.arguments.iter().map(|a| a.project(projection)).collect();
            let options = base.options.iter().map(|o| o.project(projection)).collect();
            (arguments, options)
        });
        self.parent = Some(ParentLink {
            resolve: descriptor::descriptor::<P>,
            inherit: Some(inherit),
        });
        self
    }

    pub fn help_template(mut self, template: impl Into<String>) -> Self {
        self.help_template = Some(template.into());
        self
    }

    pub fn version_template(mut self, template: impl Into<String>) -> Self {
        self.version_template = Some(template.into());
        self
    }

    pub fn argument<T: FromToken>(
        self,
        position: usize,
        ident: &str,
        accessor: fn(&mut C) -> &mut T,
    ) -> Self {
        self.argument_with(position, ident, accessor, |a| a)
    }

    pub fn argument_with<T: FromToken>(
        mut self,
        position: usize,
        ident: &str,
        accessor: fn(&mut C) -> &mut T,
        configure: impl FnOnce(ArgumentBuilder<C, T>) -> ArgumentBuilder<C, T>,
    ) -> Self {
        let builder = ArgumentBuilder {
            position,
            ident: ident.to_string(),
            name: None,
            description: String::new(),
            required: false,
            accessor,
            validators: Vec::new(),
        };
        self.arguments.push(configure(builder).build());
        self
    }

    pub fn option<T: FromToken>(self, ident: &str, accessor: fn(&mut C) -> &mut T) -> Self {
        self.option_with(ident, accessor, |o| o)
    }

    pub fn option_with<T: FromToken>(
        mut self,
        ident: &str,
        accessor: fn(&mut C) -> &mut T,
        configure: impl FnOnce(OptionBuilder<C, T>) -> OptionBuilder<C, T>,
    ) -> Self {
        let builder = OptionBuilder {
            ident: ident.to_string(),
            template: None,
            description: String::new(),
            accessor,
            validators: Vec::new(),
        };
        self.options.push(configure(builder).build());
        self
    }

    /// Resuelve el padre y valida la tabla. Lo llama la caché de descriptores.
    pub(crate) fn finish(self) -> Result<CommandDescriptor, DescriptorError> {
        let name = self.name.unwrap_or_else(default_name::<C>);

        let (parent, inherited_arguments, inherited_options) = match self.parent {
            Some(link) => {
                let parent = (link.resolve)()?;
                let (arguments, options) = match &link.inherit {
                    Some(inherit) => inherit(parent.as_ref()),
                    None => (Vec::new(), Vec::new()),
                };
                (Some(parent), arguments, options)
            }
            None => (None, Vec::new(), Vec::new()),
        };

        let help_template = self
            .help_template
            .or_else(|| parent.as_ref().map(|p| p.help_template.clone()))
            .unwrap_or_else(|| DEFAULT_HELP_TEMPLATE.to_string());
        let version_template = self
            .version_template
            .or_else(|| parent.as_ref().map(|p| p.version_template.clone()))
            .unwrap_or_else(|| DEFAULT_VERSION_TEMPLATE.to_string());

        let mut arguments = inherited_arguments;
        arguments.extend(self.arguments);
        let arguments = order_arguments(&name, arguments)?;

        let options = merge_options(&name, inherited_options, self.options)?;
        check_templates(&name, &options, &help_template, &version_template, parent.is_none())?;

        Ok(CommandDescriptor {
            type_id: TypeId::of::<C>(),
            type_name: type_name::<C>(),
            name,
            description: self.description,
            is_abstract: self.is_abstract,
            parent,
            arguments,
            options,
            help_template,
            version_template,
            factory: (!self.is_abstract).then_some(instantiate::<C> as fn() -> Box<dyn Command>),
        })
    }
}

/// Ordena por posición y exige posiciones únicas y contiguas desde 0 o 1.
fn order_arguments(
    command: &str,
    mut arguments: Vec<ArgumentSlot>,
) -> Result<Vec<ArgumentSlot>, DescriptorError> {
    arguments.sort_by_key(|a| a.position);

    for pair in arguments.windows(2) {
        if pair[0].position == pair[1].position {
            return Err(DescriptorError::DuplicatePosition {
                command: command.to_string(),
                position: pair[0].position,
            });
        }
        if pair[1].position != pair[0].position + 1 {
            return Err(DescriptorError::PositionGap {
                command: command.to_string(),
                expected: pair[0].position + 1,
                found: pair[1].position,
            });
        }
    }

    if let Some(first) = arguments.first()
        && first.position > 1
    {
        return Err(DescriptorError::PositionGap {
            command: command.to_string(),
            expected: 1,
            found: first.position,
        });
    }

    Ok(arguments)
}

/// Une las opciones heredadas con las propias; la declaración más cercana gana.
fn merge_options(
    command: &str,
    inherited: Vec<OptionSlot>,
    own: Vec<OptionSlot>,
) -> Result<Vec<OptionSlot>, DescriptorError> {
    for (i, option) in own.iter().enumerate() {
        if template::aliases(&option.template).any(str::is_empty) {
            return Err(DescriptorError::EmptyTemplate {
                command: command.to_string(),
                template: option.template.clone(),
            });
        }
        if let Some(other) = own[..i]
            .iter()
            .find(|o| template::overlaps(&o.template, &option.template))
        {
            return Err(DescriptorError::DuplicateTemplate {
                command: command.to_string(),
                first: other.template.clone(),
                second: option.template.clone(),
            });
        }
    }

    let mut merged: BTreeMap<String, OptionSlot> = inherited
        .into_iter()
        .filter(|base| {
            let shadowed = own.iter().any(|o| template::overlaps(&o.template, &base.template));
            if shadowed {
                log::debug!(
                    "La opción heredada '{}' queda sustituida en '{}'",
                    base.template,
                    command
                );
            }
            !shadowed
        })
        .map(|o| (o.template.clone(), o))
        .collect();
    merged.extend(own.into_iter().map(|o| (o.template.clone(), o)));

    Ok(merged.into_values().collect())
}

/// Las opciones no pueden pisar la ayuda ni, en el raíz, la versión.
fn check_templates(
    command: &str,
    options: &[OptionSlot],
    help_template: &str,
    version_template: &str,
    is_root: bool,
) -> Result<(), DescriptorError> {
    let mut builtins = vec![help_template];
    if is_root {
        if template::overlaps(help_template, version_template) {
            return Err(DescriptorError::DuplicateTemplate {
                command: command.to_string(),
                first: help_template.to_string(),
                second: version_template.to_string(),
            });
        }
        builtins.push(version_template);
    }

    for option in options {
        if let Some(builtin) = builtins
            .iter()
            .find(|b| template::overlaps(b, &option.template))
        {
            return Err(DescriptorError::DuplicateTemplate {
                command: command.to_string(),
                first: builtin.to_string(),
                second: option.template.clone(),
            });
        }
    }
    Ok(())
}
