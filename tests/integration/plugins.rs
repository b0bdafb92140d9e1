//! Plugin discovery integration tests
//!
//! Manifest-declared plugins merged into a full session: collision
//! overrides, deterministic ordering, and graceful skipping.

use std::fs;
use std::path::{Path, PathBuf};

use tally::build_session;
use tally::command::Outcome;
use tally::config::{PluginConfig, UserConfig};
use tally::repl::parse_input;

fn write_plugin(
    root: &Path,
    dir_name: &str,
    manifest: &str,
) {
    let dir = root.join(dir_name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("plugin.toml"), manifest).unwrap();
}

fn config_for(root: &Path) -> UserConfig {
    UserConfig {
        plugins: PluginConfig {
            dir: PathBuf::from(root),
        },
        ..UserConfig::default()
    }
}

fn run(
    context: &tally::command::SessionContext,
    registry: &tally::registry::CommandRegistry,
    line: &str,
) -> String {
    let (name, args) = parse_input(line).unwrap();
    match registry
        .resolve(&name, context)
        .unwrap()
        .execute(&args)
        .unwrap()
    {
        Outcome::Text(text) => text,
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_plugin_command_available_in_session() {
    let root = tempfile::tempdir().unwrap();
    write_plugin(
        root.path(),
        "square_plugin",
        r#"
        name = "square"

        [[commands]]
        name = "square"
        help = "Square a number"
        kind = "power"
        exponent = 2.0
        "#,
    );

    let (context, registry) = build_session(&config_for(root.path()));
    assert_eq!(run(&context, &registry, "square 4"), "4 ^ 2 = 16");
    assert!(registry.list_names().contains(&"square".to_string()));
}

#[test]
fn test_plugin_overrides_builtin_deterministically() {
    let root = tempfile::tempdir().unwrap();
    write_plugin(
        root.path(),
        "override_plugin",
        r#"
        name = "override"

        [[commands]]
        name = "add"
        help = "Replacement add"
        kind = "greeting"
        template = "add is overridden"
        "#,
    );

    // Same plugin set, repeated loads: the plugin must win every time.
    for _ in 0..3 {
        let (context, registry) = build_session(&config_for(root.path()));
        assert_eq!(run(&context, &registry, "add"), "add is overridden");
    }
}

#[test]
fn test_later_plugin_wins_name_collision() {
    let root = tempfile::tempdir().unwrap();
    for (dir, template) in [("a_plugin", "from a"), ("b_plugin", "from b")] {
        write_plugin(
            root.path(),
            dir,
            &format!(
                r#"
                name = "{dir}"

                [[commands]]
                name = "who"
                help = "Identify the providing plugin"
                kind = "greeting"
                template = "{template}"
                "#
            ),
        );
    }

    let (context, registry) = build_session(&config_for(root.path()));
    assert_eq!(run(&context, &registry, "who"), "from b");
}

#[test]
fn test_broken_plugin_does_not_abort_session() {
    let root = tempfile::tempdir().unwrap();
    write_plugin(root.path(), "broken_plugin", "kind = [unclosed");
    write_plugin(
        root.path(),
        "greet_plugin",
        r#"
        name = "greet"

        [[commands]]
        name = "greet"
        help = "Greet the user"
        kind = "greeting"
        "#,
    );

    let (context, registry) = build_session(&config_for(root.path()));
    assert_eq!(run(&context, &registry, "greet Ada"), "Hello, Ada!");
    // Built-ins are intact as well.
    assert_eq!(run(&context, &registry, "add 1 1"), "2");
}

#[test]
fn test_plugin_commands_show_in_help() {
    let root = tempfile::tempdir().unwrap();
    write_plugin(
        root.path(),
        "square_plugin",
        r#"
        name = "square"

        [[commands]]
        name = "square"
        help = "Square a number"
        kind = "power"
        exponent = 2.0
        "#,
    );

    let (context, registry) = build_session(&config_for(root.path()));
    let help = run(&context, &registry, "help");
    assert!(help.contains("Plugins:"));
    assert!(help.contains("square <number> - Square a number"));
}
