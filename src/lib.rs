//! tally - an interactive calculator REPL
//!
//! A command-line calculator with pluggable commands, a tabular
//! calculation history, and CSV import/export. Commands are resolved
//! through a [`registry::CommandRegistry`] assembled at startup from a
//! static built-in table plus manifest-declared plugins, all bound to a
//! shared [`command::SessionContext`].
//!
//! # Example
//!
//! ```no_run
//! use tally::{build_session, config::UserConfig, repl::Repl, Result};
//!
//! fn main() -> Result<()> {
//!     let config = UserConfig::default();
//!     let (context, registry) = build_session(&config);
//!     Repl::new(registry, context)?.run()
//! }
//! ```

#![warn(rust_2018_idioms)]

pub mod calc;
pub mod command;
pub mod config;
pub mod history;
pub mod logger;
pub mod plugin;
pub mod registry;
pub mod repl;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

use tracing::{info, warn};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "tally";

/// Assemble a ready-to-run session from configuration: a history log
/// (pre-populated and auto-saving when a persistence path is set), the
/// shared context, and a finalized command registry with built-ins and
/// discovered plugins merged.
pub fn build_session(
    config: &config::UserConfig,
) -> (command::SessionContext, registry::CommandRegistry) {
    let mut log = history::HistoryLog::new();

    if let Some(path) = &config.history.file {
        if path.exists() {
            match log.load_from(path) {
                Ok(count) => info!("loaded {} history records from {}", count, path.display()),
                Err(err) => warn!("failed to load history from {}: {}", path.display(), err),
            }
        }
        log.set_autosave_path(Some(path.clone()));
    }

    let context = command::SessionContext::new(log);

    let mut registry = registry::CommandRegistry::new();
    registry.install_builtins();
    let report = plugin::discover(&config.plugins.dir);
    if !report.loaded.is_empty() {
        info!(
            "loaded {} plugins: {}",
            report.loaded.len(),
            report.loaded.join(", ")
        );
    }
    registry.merge_plugins(report.commands);
    registry.finalize();

    (context, registry)
}
