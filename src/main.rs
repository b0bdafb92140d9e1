//! tally - CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tally::logger::{self, LogLevel};
use tally::repl::{Repl, ReplConfig};
use tally::{build_session, config, VERSION};

/// Interactive calculator REPL with pluggable commands and CSV-backed history
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(version = VERSION)]
#[command(about = "Interactive calculator REPL", long_about = None)]
struct Args {
    /// Enable verbose (debug-level) logging
    #[arg(short, long)]
    verbose: bool,

    /// History persistence file (overrides config and environment)
    #[arg(long, value_name = "FILE")]
    history_file: Option<PathBuf>,

    /// Plugin root directory (overrides config and environment)
    #[arg(long, value_name = "DIR")]
    plugin_dir: Option<PathBuf>,

    /// Use Vi editing mode
    #[arg(long)]
    vi_mode: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logger::init_with_level(if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    let mut config = config::load_user_config().context("Failed to load configuration")?;
    config::apply_env_overrides(&mut config);

    if let Some(file) = args.history_file {
        config.history.file = Some(file);
    }
    if let Some(dir) = args.plugin_dir {
        config.plugins.dir = dir;
    }
    if args.vi_mode {
        config.repl.vi_mode = true;
    }

    let (context, registry) = build_session(&config);
    let repl_config = ReplConfig {
        prompt: config.repl.prompt.clone(),
        vi_mode: config.repl.vi_mode,
    };

    let mut repl = Repl::with_config(registry, context, repl_config)
        .context("Failed to initialize the REPL")?;
    repl.run()
}
