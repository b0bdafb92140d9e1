//! History persistence integration tests
//!
//! Session startup with a configured history file, auto-save across
//! mutating commands, and the CSV import/export commands.

use std::fs;
use std::path::PathBuf;

use tally::build_session;
use tally::command::Outcome;
use tally::config::{HistoryConfig, PluginConfig, UserConfig};
use tally::history::HistoryLog;
use tally::repl::parse_input;

fn config_with_history(file: PathBuf) -> UserConfig {
    UserConfig {
        history: HistoryConfig { file: Some(file) },
        plugins: PluginConfig {
            dir: PathBuf::from("/nonexistent/plugins"),
        },
        ..UserConfig::default()
    }
}

fn run(
    context: &tally::command::SessionContext,
    registry: &tally::registry::CommandRegistry,
    line: &str,
) -> Outcome {
    let (name, args) = parse_input(line).unwrap();
    registry
        .resolve(&name, context)
        .unwrap()
        .execute(&args)
        .unwrap()
}

#[test]
fn test_session_restores_persisted_history() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("history.csv");
    fs::write(
        &file,
        "operation,expression,result\nadd,5 + 3,8\nsubtract,9 - 1,8\n",
    )
    .unwrap();

    let (context, _registry) = build_session(&config_with_history(file));
    let records = context.history().borrow().list();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].expression, "5 + 3");
    assert_eq!(records[1].operation, "subtract");
}

#[test]
fn test_mutations_auto_save_to_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("history.csv");

    let (context, registry) = build_session(&config_with_history(file.clone()));
    run(&context, &registry, "add 2 2");

    let mut on_disk = HistoryLog::new();
    assert_eq!(on_disk.load_from(&file).unwrap(), 1);

    run(&context, &registry, "clear");
    assert_eq!(on_disk.load_from(&file).unwrap(), 0);
}

#[test]
fn test_corrupt_history_file_leaves_session_empty() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("history.csv");
    fs::write(&file, "not,a,history\nfile,at,all\n").unwrap();

    // Startup must not fail; the bad file is logged and skipped.
    let (context, _registry) = build_session(&config_with_history(file));
    assert!(context.history().borrow().is_empty());
}

#[test]
fn test_export_import_commands_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("exported.csv");

    let (context, registry) = build_session(&config_with_history(dir.path().join("h.csv")));
    run(&context, &registry, "add 1 2");
    run(&context, &registry, "divide 1 4");

    run(&context, &registry, &format!("export_csv {}", file.display()));
    run(&context, &registry, "clear");
    run(&context, &registry, &format!("import_csv {}", file.display()));

    let records = context.history().borrow().list();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].result, "0.25");
}

#[test]
fn test_import_rejects_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("partial.csv");
    fs::write(&file, "operation,result\nadd,8\n").unwrap();

    let (context, registry) = build_session(&config_with_history(dir.path().join("h.csv")));
    run(&context, &registry, "add 1 1");

    let (name, args) = parse_input(&format!("import_csv {}", file.display())).unwrap();
    let err = registry
        .resolve(&name, &context)
        .unwrap()
        .execute(&args)
        .unwrap_err();

    assert!(err.to_string().contains("expression"));
    assert_eq!(context.history().borrow().len(), 1, "prior state retained");
}
