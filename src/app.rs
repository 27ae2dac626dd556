// src/app.rs

use crate::command::{Command, CommandType, Context};
use crate::constants::{FAILURE_STATUS, SUCCESS_STATUS};
use crate::core::binder;
use crate::core::descriptor::descriptor;
use crate::core::registry::Registry;
use crate::core::resolver::{self, ResolveError, State, Transition};
use crate::models::CommandDescriptor;
use crate::system::app_info::{AppInfo, AppInfoProvider};
use crate::system::output::{ConsoleOutput, OutputProvider};

/// Cómo terminó una resolución correcta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Se ejecutó un comando y devolvió este código.
    Executed(i32),
    HelpShown,
    VersionShown,
}

impl Outcome {
    pub fn status(&self) -> i32 {
        match self {
            Outcome::Executed(status) => *status,
            Outcome::HelpShown | Outcome::VersionShown => SUCCESS_STATUS,
        }
    }
}

/// Punto de entrada: registro de comandos, salida y datos de la aplicación.
pub struct App {
    registry: Registry,
    output: Box<dyn OutputProvider>,
    app_info: Box<dyn AppInfoProvider>,
}

impl App {
    /// Usa la consola y un `AppInfo` con la versión de `cmdbase`, no la de la
    /// aplicación: `env!` se evalúa en este crate. Las aplicaciones deben pasar
    /// `with_app_info(app_info!())` para mostrar su propia versión.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            output: Box::new(ConsoleOutput),
            app_info: Box::new(AppInfo::new(env!("CARGO_PKG_VERSION"))),
        }
    }

    pub fn with_output(mut self, output: impl OutputProvider + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    pub fn with_app_info(mut self, app_info: impl AppInfoProvider + 'static) -> Self {
        self.app_info = Box::new(app_info);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resuelve y ejecuta. Cualquier error se muestra por el canal de errores
    /// y se traduce en un código de fallo; nunca se propaga.
    pub fn execute<C: CommandType>(&self, root: &mut C, args: &[String]) -> i32 {
        match self.resolve(root, args) {
            Ok(outcome) => outcome.status(),
            Err(error) => {
                if matches!(error, ResolveError::Descriptor(_)) {
                    log::warn!("Configuración de comandos inválida: {}", error);
                } else {
                    log::debug!("Estado {:?}: {}", State::Error, error);
                }
                self.output.show_error(&error.to_string());
                FAILURE_STATUS
            }
        }
    }

    /// Igual que [`App::execute`], pero devuelve el error al llamador.
    pub fn resolve<C: CommandType>(&self, root: &mut C, args: &[String]) -> Result<Outcome, ResolveError> {
        let descriptor = descriptor::<C>()?;
        log::debug!("Estado {:?}: '{}'", State::Root, descriptor.type_name);
        self.dispatch(&descriptor, root, args)
    }

    fn dispatch(
        &self,
        descriptor: &CommandDescriptor,
        instance: &mut dyn Command,
        tokens: &[String],
    ) -> Result<Outcome, ResolveError> {
        let transition = resolver::next_transition(&self.registry, descriptor, tokens)?;
        log::debug!(
            "'{}' con {:?} -> {:?}",
            descriptor.name,
            tokens,
            transition.state()
        );

        match transition {
            Transition::Child { descriptor: child, rest } => {
                let mut sub = child
                    .instantiate()
                    .ok_or_else(|| ResolveError::AbstractCommand(child.name.clone()))?;
                self.dispatch(&child, sub.as_mut(), rest)
            }
            Transition::ShowHelp => {
                self.context(descriptor).show_usage();
                Ok(Outcome::HelpShown)
            }
            Transition::ShowVersion => {
                self.context(descriptor).show_version();
                Ok(Outcome::VersionShown)
            }
            Transition::Bind => {
                ensure_concrete(descriptor)?;
                binder::bind(descriptor, instance, tokens)?;
                Ok(self.run(descriptor, instance))
            }
            Transition::Execute => {
                ensure_concrete(descriptor)?;
                Ok(self.run(descriptor, instance))
            }
        }
    }

    fn run(&self, descriptor: &CommandDescriptor, instance: &mut dyn Command) -> Outcome {
        log::info!("Ejecutando '{}'", descriptor.name);
        let status = instance.execute(&self.context(descriptor));
        log::debug!("'{}' terminó con código {}", descriptor.name, status);
        Outcome::Executed(status)
    }

    fn context<'a>(&'a self, descriptor: &'a CommandDescriptor) -> Context<'a> {
        Context {
            descriptor,
            registry: &self.registry,
            output: self.output.as_ref(),
            app_info: self.app_info.as_ref(),
        }
    }
}

fn ensure_concrete(descriptor: &CommandDescriptor) -> Result<(), ResolveError> {
    if descriptor.is_abstract {
        return Err(ResolveError::AbstractCommand(descriptor.name.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::CommandBuilder;
    use crate::core::binder::BindError;
    use crate::system::output::BufferedOutput;

    #[derive(Default)]
    struct Kitchen;
    impl Command for Kitchen {}
    impl CommandType for Kitchen {
        fn describe() -> CommandBuilder<Self> {
            CommandBuilder::<Self>::new().named("kitchen")
        }
    }

    #[derive(Default)]
    struct Station;
    impl Command for Station {}
    impl CommandType for Station {
        fn describe() -> CommandBuilder<Self> {
            CommandBuilder::<Self>::new()
                .abstract_command()
                .parent::<Kitchen>()
        }
    }

    #[derive(Default)]
    struct Bake {
        minutes: u32,
    }
    impl Command for Bake {
        fn execute(&mut self, ctx: &Context<'_>) -> i32 {
            ctx.output().show_information(&format!("baking {}", self.minutes));
            self.minutes as i32
        }
    }
    impl CommandType for Bake {
        fn describe() -> CommandBuilder<Self> {
            CommandBuilder::<Self>::new()
                .named("bake")
                .description("Bake something")
                .parent::<Station>()
                .argument_with(0, "minutes", |c| &mut c.minutes, |a| a.required())
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn app() -> (App, BufferedOutput) {
        let mut registry = Registry::new();
        registry.register::<Bake>().unwrap();
        registry.register::<Station>().unwrap();
        let output = BufferedOutput::new();
        let app = App::new(registry)
            .with_output(output.clone())
            .with_app_info(AppInfo::new("2.0.0").with_app_name("oven"));
        (app, output)
    }

    #[test]
    fn subcommands_behind_abstract_parents_are_dispatched() {
        let (app, output) = app();
        let status = app.execute(&mut Kitchen, &tokens(&["Bake", "12"]));
        assert_eq!(status, 12);
        assert_eq!(output.information(), vec!["baking 12"]);
    }

    #[test]
    fn root_without_tokens_shows_usage_and_fails() {
        let (app, output) = app();
        assert_eq!(app.execute(&mut Kitchen, &[]), FAILURE_STATUS);
        let usage = &output.information()[0];
        assert!(usage.starts_with("\nUsage: oven [command] [options]"));
        assert!(usage.contains("\n\nCommands:\n  bake  Bake something"));
    }

    #[test]
    fn version_and_help_succeed() {
        let (app, output) = app();
        assert_eq!(
            app.resolve(&mut Kitchen, &tokens(&["-v"])),
            Ok(Outcome::VersionShown)
        );
        assert_eq!(
            app.resolve(&mut Kitchen, &tokens(&["bake", "--help"])),
            Ok(Outcome::HelpShown)
        );
        let messages = output.information();
        assert_eq!(messages[0], "2.0.0");
        assert!(messages[1].starts_with("\nUsage: oven bake [arguments] [options]"));
    }

    #[test]
    fn help_prints_the_usage_and_version_the_short_version() {
        let (app, output) = app();
        let app = app.with_app_info(
            AppInfo::new("1.0.0")
                .with_app_name("oven")
                .with_long_version("1.0.0 (build 42)"),
        );
        app.execute(&mut Kitchen, &tokens(&["--version"]));
        app.execute(&mut Kitchen, &tokens(&["-h"]));
        let messages = output.information();
        assert_eq!(messages[0], "1.0.0");
        assert!(messages[1].starts_with("\nUsage: oven [command] [options]"));
        assert!(!messages[1].contains("build 42"));
    }

    #[test]
    fn the_default_app_info_carries_the_library_version() {
        let output = BufferedOutput::new();
        let app = App::new(Registry::new()).with_output(output.clone());
        assert_eq!(app.resolve(&mut Kitchen, &tokens(&["-v"])), Ok(Outcome::VersionShown));
        assert_eq!(output.information(), vec![env!("CARGO_PKG_VERSION")]);
    }

    #[test]
    fn errors_are_reported_once_with_a_failure_status() {
        let (app, output) = app();
        assert_eq!(app.execute(&mut Kitchen, &tokens(&["bake"])), FAILURE_STATUS);
        assert_eq!(output.errors(), vec!["Argument 'minutes' is required."]);
        assert!(output.information().is_empty());

        assert!(matches!(
            app.resolve(&mut Kitchen, &tokens(&["bake", "soon"])),
            Err(ResolveError::Bind(BindError::InvalidScalarValue { ref slot, .. })) if slot == "minutes"
        ));
    }

    #[test]
    fn abstract_commands_cannot_be_dispatched() {
        let (app, _) = app();
        assert_eq!(
            app.resolve(&mut Station, &tokens(&["now"])),
            Err(ResolveError::AbstractCommand("Station".to_string()))
        );
    }
}
