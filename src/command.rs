// src/command.rs

use std::any::Any;

use crate::core::builder::CommandBuilder;
use crate::core::help::{self, HelpText};
use crate::core::registry::Registry;
use crate::models::{ArgumentSlot, CommandDescriptor, CommandInfo, OptionSlot};
use crate::system::app_info::AppInfoProvider;
use crate::system::output::OutputProvider;

/// Acceso dinámico a la instancia concreta, para los accesores de escritura.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Un comando ejecutable. Sus campos se rellenan a partir de los argumentos
/// antes de llamar a `execute`.
pub trait Command: AsAny {
    /// Punto de entrada tras el enlace y la validación. Devuelve el código de salida.
    /// Por defecto muestra el uso del comando y falla.
    fn execute(&mut self, ctx: &Context<'_>) -> i32 {
        ctx.show_usage();
        crate::constants::FAILURE_STATUS
    }

    /// Restricciones entre campos, evaluadas después del enlace.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Un tipo de comando con su tabla declarativa de argumentos y opciones.
/// `Default` hace de fábrica de instancias nuevas.
pub trait CommandType: Command + Default + Sized {
    fn describe() -> CommandBuilder<Self>;
}

/// Lo que un comando ve de la aplicación mientras se ejecuta.
pub struct Context<'a> {
    pub(crate) descriptor: &'a CommandDescriptor,
    pub(crate) registry: &'a Registry,
    pub(crate) output: &'a dyn OutputProvider,
    pub(crate) app_info: &'a dyn AppInfoProvider,
}

impl<'a> Context<'a> {
    pub fn output(&self) -> &'a dyn OutputProvider {
        self.output
    }

    pub fn app_info(&self) -> &'a dyn AppInfoProvider {
        self.app_info
    }

    pub fn descriptor(&self) -> &'a CommandDescriptor {
        self.descriptor
    }

    pub fn info(&self) -> CommandInfo {
        self.descriptor.info()
    }

    pub fn parent_commands(&self) -> Vec<CommandInfo> {
        self.descriptor.parent_commands()
    }

    pub fn subcommands(&self) -> Vec<CommandInfo> {
        self.registry
            .subcommands(self.descriptor)
            .iter()
            .map(|d| d.info())
            .collect()
    }

    pub fn arguments(&self) -> &'a [ArgumentSlot] {
        &self.descriptor.arguments
    }

    pub fn required_arguments(&self) -> impl Iterator<Item = &'a ArgumentSlot> {
        self.descriptor.required_arguments()
    }

    pub fn options(&self) -> &'a [OptionSlot] {
        &self.descriptor.options
    }

    pub fn help(&self) -> HelpText {
        help::render(self.descriptor, self.registry, self.app_info)
    }

    /// Nombre, versión larga y uso.
    pub fn show_help(&self) {
        self.output.show_information(&self.help().full);
    }

    /// Lo que imprimen `-h` y la ejecución por defecto.
    pub fn show_usage(&self) {
        self.output.show_information(&self.help().usage);
    }

    /// Versión corta, la que imprime `-v`.
    pub fn show_version(&self) {
        self.output.show_information(&self.help().version);
    }
}
