// tests/common/mod.rs
#![allow(dead_code)]

use serde::Deserialize;

use cmdbase::{
    App, AppInfo, BufferedOutput, Command, CommandBuilder, CommandType, Context, Registry,
    bind_structured,
};

pub const SUBCOMMAND_STATUS: i32 = 42;
pub const DEEP_STATUS: i32 = 9;

pub fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|t| t.to_string()).collect()
}

/// Todos los comandos de prueba salvo `EmptyMainCommand`, que es un raíz aparte.
pub fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .register::<SubCommand>()
        .and_then(|r| r.register::<RequiredArgumentsCommand>())
        .and_then(|r| r.register::<BaseFunctionalityCommand>())
        .and_then(|r| r.register::<NestedFunctionalityCommand>())
        .and_then(|r| r.register::<DeepCommand>())
        .unwrap();
    registry
}

pub fn app_info() -> AppInfo {
    AppInfo::new("1.0.0.0").with_app_name("TestConsoleApp")
}

pub fn app() -> (App, BufferedOutput) {
    let output = BufferedOutput::new();
    let app = App::new(registry())
        .with_output(output.clone())
        .with_app_info(app_info());
    (app, output)
}

// --- COMANDOS ---

#[derive(Default)]
pub struct MainCommand;

impl Command for MainCommand {}

impl CommandType for MainCommand {
    fn describe() -> CommandBuilder<Self> {
        CommandBuilder::<Self>::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomObject {
    pub string_property: String,
    pub integer_property: i32,
}

bind_structured!(CustomObject);

#[derive(Default)]
pub struct SubCommand {
    pub simple: String,
    pub custom: CustomObject,
    pub multi_template_option: Option<String>,
    pub long_option: i64,
}

impl Command for SubCommand {
    fn execute(&mut self, _ctx: &Context<'_>) -> i32 {
        SUBCOMMAND_STATUS
    }
}

impl CommandType for SubCommand {
    fn describe() -> CommandBuilder<Self> {
        CommandBuilder::<Self>::new()
            .named("subcommand")
            .parent::<MainCommand>()
            .argument_with(0, "simple", |c| &mut c.simple, |a| {
                a.name("simple-argument").description("A simple argument")
            })
            .argument_with(1, "custom", |c| &mut c.custom, |a| {
                a.name("custom-argument").description("A custom type argument")
            })
            .option_with("multi_template_option", |c| &mut c.multi_template_option, |o| {
                o.template("-s|--long").description("A multi template option")
            })
            .option_with("long_option", |c| &mut c.long_option, |o| {
                o.template("--long-type-option")
            })
    }
}

#[derive(Default)]
pub struct RequiredArgumentsCommand {
    pub required_integer: i32,
    pub required_string: String,
}

impl Command for RequiredArgumentsCommand {}

impl CommandType for RequiredArgumentsCommand {
    fn describe() -> CommandBuilder<Self> {
        CommandBuilder::<Self>::new()
            .named("required")
            .description("A command with an required argument")
            .parent::<MainCommand>()
            .argument_with(1, "RequiredInteger", |c| &mut c.required_integer, |a| {
                a.name("required-integer-argument")
                    .description("A required integer type argument")
                    .required()
                    .range(0, 10)
            })
            .argument_with(2, "RequiredString", |c| &mut c.required_string, |a| {
                a.name("required-string-argument")
                    .description("A required string type argument")
                    .required()
            })
    }
}

pub struct BaseFunctionalityCommand {
    pub inheritance_score: i32,
}

impl Default for BaseFunctionalityCommand {
    fn default() -> Self {
        Self {
            inheritance_score: 1,
        }
    }
}

impl Command for BaseFunctionalityCommand {}

impl CommandType for BaseFunctionalityCommand {
    fn describe() -> CommandBuilder<Self> {
        CommandBuilder::<Self>::new()
            .abstract_command()
            .parent::<MainCommand>()
            .option_with("inheritance_score", |c| &mut c.inheritance_score, |o| {
                o.template("--score").description("Overrides the inherited score")
            })
    }
}

#[derive(Default)]
pub struct NestedFunctionalityCommand {
    pub base: BaseFunctionalityCommand,
}

impl Command for NestedFunctionalityCommand {
    fn execute(&mut self, _ctx: &Context<'_>) -> i32 {
        self.base.inheritance_score + 2
    }
}

impl CommandType for NestedFunctionalityCommand {
    fn describe() -> CommandBuilder<Self> {
        CommandBuilder::<Self>::new()
            .named("inherited-command")
            .description("A command used to test the nesting functionality")
            .inherit::<BaseFunctionalityCommand>(|c| &mut c.base)
    }
}

#[derive(Default)]
pub struct EmptyMainCommand {
    pub argument: i32,
}

impl Command for EmptyMainCommand {
    fn execute(&mut self, _ctx: &Context<'_>) -> i32 {
        self.argument
    }
}

impl CommandType for EmptyMainCommand {
    fn describe() -> CommandBuilder<Self> {
        CommandBuilder::<Self>::new().argument(0, "argument", |c| &mut c.argument)
    }
}

#[derive(Default)]
pub struct DeepCommand;

impl Command for DeepCommand {
    fn execute(&mut self, _ctx: &Context<'_>) -> i32 {
        DEEP_STATUS
    }
}

impl CommandType for DeepCommand {
    fn describe() -> CommandBuilder<Self> {
        CommandBuilder::<Self>::new()
            .named("deep")
            .description("A deeply nested command")
            .parent::<RequiredArgumentsCommand>()
    }
}
