// tests/help_builder.rs

mod common;

use cmdbase::core::help;
use cmdbase::{CommandType, HelpText, descriptor};
use common::{
    DeepCommand, MainCommand, NestedFunctionalityCommand, RequiredArgumentsCommand, SubCommand,
    app_info, registry,
};

fn help_for<C: CommandType>() -> HelpText {
    let descriptor = descriptor::<C>().unwrap();
    help::render(&descriptor, &registry(), &app_info())
}

#[test]
fn the_version_comes_from_the_app_info() {
    assert_eq!(help_for::<SubCommand>().version, "1.0.0.0");
}

#[test]
fn the_usage_line_names_the_command_path() {
    let help = help_for::<SubCommand>();
    assert!(help.usage.contains("Usage: TestConsoleApp subcommand [arguments] [options]"));

    let help = help_for::<DeepCommand>();
    assert!(help.usage.starts_with("\nUsage: TestConsoleApp required deep [options]"));
}

#[test]
fn every_subcommand_is_listed_by_name() {
    let help = help_for::<MainCommand>();

    assert!(help.usage.contains(
        "\n\nCommands:\n  inherited-command  A command used to test the nesting functionality\n  required           A command with an required argument\n  subcommand\n\nOptions:"
    ));
    assert!(!help.usage.contains("BaseFunctionalityCommand"));
    assert!(!help.usage.contains("deep"));
}

#[test]
fn every_argument_is_listed() {
    let help = help_for::<SubCommand>();

    assert!(help.usage.contains("simple-argument"));
    assert!(help.usage.contains("custom-argument"));
}

#[test]
fn every_option_is_listed() {
    let help = help_for::<SubCommand>();

    assert!(help.usage.contains("-s|--long"));
    assert!(help.usage.contains("--long-type-option"));
}

#[test]
fn the_root_lists_help_before_version() {
    let help = help_for::<MainCommand>();

    assert!(help.usage.ends_with(
        "\n\nOptions:\n  -h|--help     Show help information\n  -v|--version  Show version information"
    ));
}

#[test]
fn inherited_options_are_listed_on_the_subcommand() {
    let help = help_for::<NestedFunctionalityCommand>();

    assert!(help.usage.contains("  --score    Overrides the inherited score"));
    assert!(!help.usage.contains("--version"));
}

#[test]
fn the_full_help_wraps_the_usage_with_name_and_version() {
    let help = help_for::<RequiredArgumentsCommand>();

    let usage = [
        "\nUsage: TestConsoleApp required [command] [arguments] [options]",
        "",
        "Commands:",
        "  deep  A deeply nested command",
        "",
        "Arguments:",
        "  required-integer-argument  A required integer type argument [required]",
        "  required-string-argument   A required string type argument [required]",
        "",
        "Options:",
        "  -h|--help  Show help information",
    ]
    .join("\n");

    assert_eq!(help.usage, usage);
    assert_eq!(help.full, format!("TestConsoleApp\n1.0.0.0\n{}\n", usage));
}
