// src/core/help.rs

use crate::constants::{
    HELP_OPTION_DESCRIPTION, REQUIRED_MARKER, TABLE_INDENT, TABLE_PADDING,
    VERSION_OPTION_DESCRIPTION,
};
use crate::core::registry::Registry;
use crate::models::{ArgumentSlot, CommandDescriptor};
use crate::system::app_info::AppInfoProvider;

/// Textos de ayuda de un comando.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpText {
    /// Nombre, versión larga y uso completo.
    pub full: String,
    /// Línea `Usage:` seguida de las tablas de comandos, argumentos y opciones.
    pub usage: String,
    /// Versión corta de la aplicación.
    pub version: String,
}

/// Proyecta el descriptor (y el árbol de subcomandos del registro) en texto.
pub fn render(
    descriptor: &CommandDescriptor,
    registry: &Registry,
    app_info: &dyn AppInfoProvider,
) -> HelpText {
    let app_name = app_info.app_name();
    let usage = usage(descriptor, registry, &app_name);

    HelpText {
        full: format!("{}\n{}\n{}\n", app_name, app_info.long_version(), usage),
        usage,
        version: app_info.short_version(),
    }
}

fn usage(descriptor: &CommandDescriptor, registry: &Registry, app_name: &str) -> String {
    let subcommands = registry.subcommands(descriptor);
    let has_arguments = !descriptor.arguments.is_empty();

    let mut text = format!("\nUsage: {app_name}");
    for parent in descriptor.parent_commands() {
        text.push(' ');
        text.push_str(&parent.name);
    }
    if !descriptor.is_root() {
        text.push(' ');
        text.push_str(&descriptor.name);
    }
    if !subcommands.is_empty() {
        text.push_str(" [command]");
    }
    if has_arguments {
        text.push_str(" [arguments]");
    }
    text.push_str(" [options]");

    if !subcommands.is_empty() {
        let rows: Vec<(String, String)> = subcommands
            .iter()
            .map(|d| (d.name.clone(), d.description.clone()))
            .collect();
        text.push_str(&section("Commands", &rows));
    }

    if has_arguments {
        let rows: Vec<(String, String)> = descriptor
            .arguments
            .iter()
            .map(|a| (a.name.clone(), argument_description(a)))
            .collect();
        text.push_str(&section("Arguments", &rows));
    }

    text.push_str(&section("Options", &option_rows(descriptor)));
    text
}

fn argument_description(argument: &ArgumentSlot) -> String {
    if argument.required {
        format!("{} {}", argument.description, REQUIRED_MARKER)
    } else {
        argument.description.clone()
    }
}

/// Ayuda primero, versión después (solo en el raíz) y el resto por plantilla.
fn option_rows(descriptor: &CommandDescriptor) -> Vec<(String, String)> {
    let mut rows = vec![(
        descriptor.help_template.clone(),
        HELP_OPTION_DESCRIPTION.to_string(),
    )];
    if descriptor.is_root() {
        rows.push((
            descriptor.version_template.clone(),
            VERSION_OPTION_DESCRIPTION.to_string(),
        ));
    }
    rows.extend(
        descriptor
            .options
            .iter()
            .map(|o| (o.template.clone(), o.description.clone())),
    );
    rows
}

fn section(title: &str, rows: &[(String, String)]) -> String {
    format!("\n\n{}:\n{}", title, table(rows))
}

/// Alinea las descripciones a la clave más larga más un relleno fijo.
pub fn table(rows: &[(String, String)]) -> String {
    let longest = rows
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let lines: Vec<String> = rows
        .iter()
        .map(|(key, value)| {
            let padding = longest - key.chars().count() + TABLE_PADDING;
            format!("{}{}{}{}", TABLE_INDENT, key, " ".repeat(padding), value)
        })
        .collect();

    lines.join("\n").trim_end().to_string()
}
