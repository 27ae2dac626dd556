// src/bin/pizza.rs

use anyhow::{Context as _, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::{env, fmt, process};

use cmdbase::{
    App, AppManifest, Command, CommandBuilder, CommandType, Context, Registry, bind_enum,
};

const MANIFEST: &str = include_str!("pizza.toml");

/// Comando raíz: sin argumentos muestra el uso.
#[derive(Default)]
struct MainCommand;

impl Command for MainCommand {}

impl CommandType for MainCommand {
    fn describe() -> CommandBuilder<Self> {
        CommandBuilder::<Self>::new().description("Order food and drinks")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "verbatim")]
enum PizzaSize {
    #[default]
    Small,
    Medium,
    Big,
}

impl fmt::Display for PizzaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PizzaSize::Small => "Small",
            PizzaSize::Medium => "Medium",
            PizzaSize::Big => "Big",
        };
        f.write_str(name)
    }
}

bind_enum!(PizzaSize);

#[derive(Default)]
struct PizzaCommand {
    pizza_type: String,
    amount: i32,
    size: PizzaSize,
}

impl Command for PizzaCommand {
    fn execute(&mut self, ctx: &Context<'_>) -> i32 {
        ctx.output().show_information(&format!(
            "You've ordered {} {} {} pizzas",
            self.amount, self.size, self.pizza_type
        ));
        0
    }
}

impl CommandType for PizzaCommand {
    fn describe() -> CommandBuilder<Self> {
        CommandBuilder::<Self>::new()
            .named("pizza")
            .description("A command to order pizza's")
            .parent::<MainCommand>()
            .argument_with(1, "pizza_type", |c| &mut c.pizza_type, |a| {
                a.name("type")
                    .description("The type of pizza you want to order")
                    .required()
            })
            .argument_with(2, "amount", |c| &mut c.amount, |a| {
                a.description("the amount of pizza's").range(0, i32::MAX)
            })
            .option_with("size", |c| &mut c.size, |o| {
                o.template("-s|--size").description("The size of the pizza")
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Drink {
    #[serde(rename = "Type", alias = "type")]
    kind: String,
    #[serde(rename = "Size", alias = "size")]
    size: u32,
}

#[derive(Default)]
struct DrinkCommand {
    drinks: Vec<Drink>,
}

impl Command for DrinkCommand {
    fn execute(&mut self, ctx: &Context<'_>) -> i32 {
        let lines: Vec<String> = self
            .drinks
            .iter()
            .map(|d| format!("{}ml {}", d.size, d.kind))
            .collect();
        ctx.output().show_information("You've ordered:");
        ctx.output().show_information(&lines.join("\n"));
        0
    }
}

impl CommandType for DrinkCommand {
    fn describe() -> CommandBuilder<Self> {
        CommandBuilder::<Self>::new()
            .named("drink")
            .description("A command to order drinks")
            .parent::<MainCommand>()
            .argument_with(1, "drinks", |c| &mut c.drinks, |a| {
                a.description("The drinks you want to order")
            })
    }
}

/// El punto de entrada del ejemplo. Para ver los logs: `RUST_LOG=debug pizza ...`
fn main() {
    env_logger::init();

    match run() {
        Ok(status) => process::exit(status),
        Err(e) => {
            eprintln!("\nError: {:?}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let manifest =
        AppManifest::from_toml_str(MANIFEST).context("El manifiesto embebido no es válido")?;

    let mut registry = Registry::new();
    registry
        .register::<PizzaCommand>()?
        .register::<DrinkCommand>()?;

    let app = App::new(registry).with_app_info(cmdbase::app_info!().apply_manifest(&manifest));
    let args: Vec<String> = env::args().skip(1).collect();
    log::debug!("Argumentos: {:?}", args);

    Ok(app.execute(&mut MainCommand, &args))
}
