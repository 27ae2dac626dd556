// src/lib.rs

//! Enlace declarativo de argumentos de línea de comandos.
//!
//! Cada comando es un tipo con `Default` que describe sus argumentos
//! posicionales y sus opciones con [`CommandBuilder`]. [`App`] resuelve la
//! cadena de subcomandos, convierte los tokens, los escribe en los campos,
//! valida y ejecuta.
//!
//! ```no_run
//! use cmdbase::{App, Command, CommandBuilder, CommandType, Context, Registry};
//!
//! #[derive(Default)]
//! struct Main;
//! impl Command for Main {}
//! impl CommandType for Main {
//!     fn describe() -> CommandBuilder<Self> {
//!         CommandBuilder::<Self>::new()
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Greet {
//!     name: String,
//!     loud: bool,
//! }
//! impl Command for Greet {
//!     fn execute(&mut self, ctx: &Context<'_>) -> i32 {
//!         let text = format!("Hello, {}", self.name);
//!         ctx.output().show_information(&if self.loud { text.to_uppercase() } else { text });
//!         0
//!     }
//! }
//! impl CommandType for Greet {
//!     fn describe() -> CommandBuilder<Self> {
//!         CommandBuilder::<Self>::new()
//!             .named("greet")
//!             .parent::<Main>()
//!             .argument_with(0, "name", |c| &mut c.name, |a| a.required())
//!             .option_with("loud", |c| &mut c.loud, |o| o.template("-l|--loud"))
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.register::<Greet>().expect("valid command table");
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! std::process::exit(App::new(registry).execute(&mut Main, &args));
//! ```

pub mod app;
pub mod command;
pub mod config;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;

pub use app::{App, Outcome};
pub use command::{AsAny, Command, CommandType, Context};
pub use config::{AppManifest, ManifestError, load_manifest};
pub use crate::core::binder::BindError;
pub use crate::core::builder::{ArgumentBuilder, CommandBuilder, OptionBuilder};
pub use crate::core::coercer::{CoerceError, FromToken, ValueKind};
pub use crate::core::descriptor::{DescriptorError, descriptor};
pub use crate::core::help::HelpText;
pub use crate::core::registry::Registry;
pub use crate::core::resolver::ResolveError;
pub use models::{ArgumentSlot, CommandDescriptor, CommandInfo, OptionSlot};
pub use system::app_info::{AppInfo, AppInfoProvider};
pub use system::output::{BufferedOutput, ConsoleOutput, MessageKind, OutputProvider};
