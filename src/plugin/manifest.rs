//! Plugin manifest schema
//!
//! Plugins declare commands through a narrow, explicitly-typed contract:
//! a name, a help line, and a `kind` drawn from a closed capability set.
//! No code is loaded; anything outside this shape fails deserialization
//! and the plugin is skipped.

use serde::Deserialize;

/// Top-level `plugin.toml` contents.
#[derive(Debug, Deserialize)]
pub struct PluginManifest {
    /// Plugin name, used in logs only.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub commands: Vec<CommandDef>,
}

/// One declared command.
#[derive(Debug, Deserialize)]
pub struct CommandDef {
    pub name: String,
    pub help: String,
    #[serde(flatten)]
    pub kind: CommandKind,
}

/// Closed set of behaviors a plugin command may have.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandKind {
    /// Raise a single numeric argument to a fixed exponent.
    Power { exponent: f64 },
    /// Render a text template, substituting `{name}` with the first
    /// argument (or a default).
    Greeting {
        #[serde(default = "default_template")]
        template: String,
    },
}

fn default_template() -> String {
    "Hello, {name}!".to_string()
}
