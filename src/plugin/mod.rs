//! Plugin discovery
//!
//! Enumerates subdirectories of the plugin root whose names end in
//! `_plugin`, reads each one's `plugin.toml` manifest, and turns every
//! declared command into a registry spec. A source that fails to load is
//! skipped with a warning; discovery never aborts as a whole.
//! Directories are visited in sorted order, so collision resolution in
//! the registry is deterministic across repeated loads.

pub mod commands;
pub mod manifest;

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::registry::{Category, CommandSpec};

use commands::{GreetingCommand, PowerCommand};
use manifest::{CommandDef, CommandKind, PluginManifest};

/// Manifest file name expected inside each plugin directory.
pub const MANIFEST_FILE: &str = "plugin.toml";

/// Required suffix for plugin directory names.
pub const PLUGIN_DIR_SUFFIX: &str = "_plugin";

/// Why a single plugin source was skipped.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("missing plugin.toml")]
    MissingManifest,

    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("plugin declares no commands")]
    NoCommands,
}

/// Outcome of scanning one plugin root.
#[derive(Default)]
pub struct DiscoveryReport {
    /// Commands to merge into the registry, in registration order.
    pub commands: Vec<(String, Rc<CommandSpec>)>,
    /// Names of plugins that loaded successfully.
    pub loaded: Vec<String>,
    /// Sources skipped with the reason.
    pub skipped: Vec<(PathBuf, PluginError)>,
}

/// Scan `root` for plugin directories and load their manifests.
pub fn discover(root: &Path) -> DiscoveryReport {
    let mut report = DiscoveryReport::default();

    if !root.is_dir() {
        debug!("plugin root {} does not exist, skipping discovery", root.display());
        return report;
    }

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("failed to read plugin root {}: {}", root.display(), err);
            return report;
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(PLUGIN_DIR_SUFFIX))
        })
        .collect();
    dirs.sort();

    for dir in dirs {
        match load_manifest(&dir) {
            Ok(manifest) => {
                info!(
                    "loaded plugin {:?} with {} commands",
                    manifest.name,
                    manifest.commands.len()
                );
                report.loaded.push(manifest.name.clone());
                for def in manifest.commands {
                    let name = def.name.to_lowercase();
                    report.commands.push((name, spec_for(def)));
                }
            }
            Err(err) => {
                warn!("skipping plugin {}: {}", dir.display(), err);
                report.skipped.push((dir, err));
            }
        }
    }

    report
}

fn load_manifest(dir: &Path) -> Result<PluginManifest, PluginError> {
    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Err(PluginError::MissingManifest);
    }

    let text = fs::read_to_string(&path)?;
    let manifest: PluginManifest = toml::from_str(&text)?;
    if manifest.commands.is_empty() {
        return Err(PluginError::NoCommands);
    }

    Ok(manifest)
}

/// Build a registry spec for one declared command.
fn spec_for(def: CommandDef) -> Rc<CommandSpec> {
    let name = def.name.to_lowercase();
    match def.kind {
        CommandKind::Power { exponent } => {
            let command_name = name.clone();
            CommandSpec::new(
                &name,
                &format!("{} <number>", name),
                &def.help,
                Category::Plugin,
                Box::new(move |_ctx| {
                    Box::new(PowerCommand::new(command_name.clone(), exponent))
                }),
            )
        }
        CommandKind::Greeting { template } => {
            let command_name = name.clone();
            CommandSpec::new(
                &name,
                &format!("{} [name]", name),
                &def.help,
                Category::Plugin,
                Box::new(move |_ctx| {
                    Box::new(GreetingCommand::new(
                        command_name.clone(),
                        template.clone(),
                    ))
                }),
            )
        }
    }
}
