//! Dispatch pipeline integration tests
//!
//! Exercise the full resolve-execute path the REPL loop drives: parse a
//! line, resolve the command through a ready registry, execute against
//! the shared context, and check the rendered output.

use tally::command::{Outcome, SessionContext};
use tally::config::UserConfig;
use tally::repl::parse_input;
use tally::{build_session, registry::CommandRegistry};

fn session() -> (SessionContext, CommandRegistry) {
    let config = UserConfig {
        plugins: tally::config::PluginConfig {
            // Point at a directory that does not exist so only
            // built-ins are registered.
            dir: std::path::PathBuf::from("/nonexistent/plugins"),
        },
        ..UserConfig::default()
    };
    build_session(&config)
}

fn run_line(
    context: &SessionContext,
    registry: &CommandRegistry,
    line: &str,
) -> Result<Outcome, String> {
    let (name, args) = parse_input(line).expect("non-blank line");
    let command = registry
        .resolve(&name, context)
        .ok_or_else(|| format!("unknown command: {}", name))?;
    command.execute(&args).map_err(|err| err.to_string())
}

fn text(outcome: Outcome) -> String {
    match outcome {
        Outcome::Text(text) => text,
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_add_line_end_to_end() {
    let (context, registry) = session();

    let out = text(run_line(&context, &registry, "  add   10   20  ").unwrap());
    assert_eq!(out, "30");

    let records = context.history().borrow().list();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].operation, "add");
    assert_eq!(records[0].expression, "10 + 20");
    assert_eq!(records[0].result, "30");
}

#[test]
fn test_mixed_case_command_name() {
    let (context, registry) = session();
    let out = text(run_line(&context, &registry, "DiViDe 6 3").unwrap());
    assert_eq!(out, "2");
}

#[test]
fn test_error_keeps_history_clean() {
    let (context, registry) = session();

    let err = run_line(&context, &registry, "divide 6 0").unwrap_err();
    assert!(err.contains("division by zero"));
    assert!(context.history().borrow().is_empty());
}

#[test]
fn test_unknown_command_is_not_an_execute_error() {
    let (context, registry) = session();
    assert!(registry.resolve("frobnicate", &context).is_none());
}

#[test]
fn test_history_clear_delete_flow() {
    let (context, registry) = session();

    run_line(&context, &registry, "add 1 2").unwrap();
    run_line(&context, &registry, "multiply 3 4").unwrap();

    let listing = text(run_line(&context, &registry, "history").unwrap());
    assert_eq!(listing, "0: 1 + 2 = 3\n1: 3 * 4 = 12");

    text(run_line(&context, &registry, "delete 0").unwrap());
    let listing = text(run_line(&context, &registry, "history").unwrap());
    assert_eq!(listing, "0: 3 * 4 = 12");

    text(run_line(&context, &registry, "clear").unwrap());
    assert_eq!(
        text(run_line(&context, &registry, "history").unwrap()),
        "History is empty"
    );
}

#[test]
fn test_exit_and_quit_signal_termination() {
    let (context, registry) = session();

    for name in ["exit", "quit", "EXIT"] {
        let outcome = run_line(&context, &registry, name).unwrap();
        assert!(matches!(outcome, Outcome::Exit), "{} should exit", name);
    }
}

#[test]
fn test_help_lists_every_builtin() {
    let (context, registry) = session();
    let out = text(run_line(&context, &registry, "help").unwrap());

    for name in ["add", "subtract", "multiply", "divide", "history", "delete", "export_csv"] {
        assert!(out.contains(name), "help output missing {}", name);
    }
    // Aliases collapse to one line.
    assert_eq!(out.matches("Exit the calculator").count(), 1);
}

#[test]
fn test_help_for_single_command() {
    let (context, registry) = session();
    let out = text(run_line(&context, &registry, "help delete").unwrap());
    assert!(out.starts_with("delete <index>"));
}
