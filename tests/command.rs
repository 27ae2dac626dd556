// tests/command.rs

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cmdbase::{App, AppInfoProvider, BufferedOutput, Outcome, ResolveError};
use common::{
    DEEP_STATUS, EmptyMainCommand, MainCommand, SUBCOMMAND_STATUS, app, registry, tokens,
};

#[test]
fn a_root_command_can_take_its_own_arguments() {
    let (app, _) = app();

    let status = app.execute(&mut EmptyMainCommand::default(), &tokens(&["2"]));

    assert_eq!(status, 2);
}

#[test]
fn subcommand_names_ignore_casing() {
    let (app, _) = app();

    assert_eq!(
        app.execute(&mut MainCommand, &tokens(&["SUBCOMMAND"])),
        SUBCOMMAND_STATUS
    );
}

#[test]
fn subcommands_behind_an_abstract_base_inherit_its_state() {
    let (app, _) = app();

    assert_eq!(app.execute(&mut MainCommand, &tokens(&["inherited-command"])), 3);
    assert_eq!(
        app.execute(&mut MainCommand, &tokens(&["inherited-command", "--score", "5"])),
        7
    );
}

#[test]
fn subcommands_nest_below_other_subcommands() {
    let (app, _) = app();

    assert_eq!(
        app.resolve(&mut MainCommand, &tokens(&["required", "deep"])),
        Ok(Outcome::Executed(DEEP_STATUS))
    );
}

#[test]
fn the_help_option_prints_once_and_succeeds() {
    let (app, output) = app();

    let status = app.execute(&mut MainCommand, &tokens(&["-h"]));

    assert_eq!(status, 0);
    assert_eq!(output.information().len(), 1);
    assert!(output.errors().is_empty());
}

#[test]
fn help_wins_over_missing_arguments() {
    let (app, output) = app();

    let status = app.execute(&mut MainCommand, &tokens(&["required", "--help"]));

    assert_eq!(status, 0);
    assert!(output.information()[0].contains("Usage: TestConsoleApp required"));
}

#[derive(Clone, Default)]
struct CountingAppInfo {
    long_version_reads: Arc<AtomicUsize>,
}

impl AppInfoProvider for CountingAppInfo {
    fn short_version(&self) -> String {
        "1.0.0.0".to_string()
    }

    fn long_version(&self) -> String {
        self.long_version_reads.fetch_add(1, Ordering::SeqCst);
        "1.0.0.0-test".to_string()
    }

    fn app_name(&self) -> String {
        "TestConsoleApp".to_string()
    }
}

#[test]
fn the_version_option_prints_the_short_version() {
    let app_info = CountingAppInfo::default();
    let output = BufferedOutput::new();
    let app = App::new(registry())
        .with_output(output.clone())
        .with_app_info(app_info.clone());

    let status = app.execute(&mut MainCommand, &tokens(&["-v"]));

    assert_eq!(status, 0);
    assert_eq!(app_info.long_version_reads.load(Ordering::SeqCst), 1);
    assert_eq!(output.information(), vec!["1.0.0.0"]);
}

#[test]
fn the_version_option_belongs_to_the_root_only() {
    let (app, output) = app();

    let status = app.execute(
        &mut MainCommand,
        &tokens(&[
            "subcommand",
            "value",
            r#"{"StringProperty":"a","IntegerProperty":1}"#,
            "-v",
        ]),
    );

    assert_eq!(status, 1);
    assert_eq!(output.errors(), vec!["Unexpected token '-v'."]);
}

#[test]
fn a_root_without_overrides_shows_its_usage_and_fails() {
    let (app, output) = app();

    assert_eq!(app.resolve(&mut MainCommand, &[]), Ok(Outcome::Executed(1)));
    assert!(output.information()[0].starts_with("\nUsage: TestConsoleApp [command] [options]"));
}

#[test]
fn abstract_commands_are_not_offered_as_subcommands() {
    let (app, _) = app();

    assert_eq!(
        app.resolve(&mut MainCommand, &tokens(&["BaseFunctionalityCommand"])),
        Err(ResolveError::Bind(cmdbase::BindError::NoArgumentsExist))
    );
}
