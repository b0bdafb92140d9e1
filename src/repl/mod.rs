//! Dispatch loop
//!
//! Line-based REPL with rustyline for editing and history. One line of
//! input is fully read, parsed, dispatched, and printed before the next
//! read begins. The loop terminates on an exit command, end of input, or
//! an interrupt, all of which print the farewell and stop cleanly.

use rustyline::config::Config;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{CompletionType, EditMode, Editor};
use tracing::{debug, info};

use crate::command::{Outcome, SessionContext};
use crate::registry::CommandRegistry;
use crate::{Result, NAME, VERSION};

mod completer;
pub use completer::CommandCompleter;

/// REPL configuration.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt to display
    pub prompt: String,
    /// Enable Vi editing mode
    pub vi_mode: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".into(),
            vi_mode: false,
        }
    }
}

/// Split a line into a case-folded command name and positional
/// arguments. Returns None for blank input.
pub fn parse_input(line: &str) -> Option<(String, Vec<String>)> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?.to_lowercase();
    let args = parts.map(str::to_string).collect();
    Some((name, args))
}

/// Read-eval-print loop bound to a ready registry and session context.
pub struct Repl {
    config: ReplConfig,
    editor: Editor<CommandCompleter, FileHistory>,
    registry: CommandRegistry,
    context: SessionContext,
}

impl Repl {
    /// Create a REPL with default configuration.
    pub fn new(
        registry: CommandRegistry,
        context: SessionContext,
    ) -> Result<Self> {
        Self::with_config(registry, context, ReplConfig::default())
    }

    /// Create a REPL with custom configuration.
    pub fn with_config(
        registry: CommandRegistry,
        context: SessionContext,
        config: ReplConfig,
    ) -> Result<Self> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(if config.vi_mode {
                EditMode::Vi
            } else {
                EditMode::Emacs
            })
            .build();

        let mut editor = Editor::with_config(rl_config)?;
        editor.set_helper(Some(CommandCompleter::new(registry.list_names())));

        Ok(Self {
            config,
            editor,
            registry,
            context,
        })
    }

    /// Run the loop until an exit signal.
    pub fn run(&mut self) -> Result<()> {
        println!("{} {}", NAME, VERSION);
        println!("Type 'help' for a list of commands, 'exit' to quit");

        loop {
            match self.editor.readline(&self.config.prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(&line);

                    let Some((name, args)) = parse_input(&line) else {
                        continue;
                    };

                    if !self.dispatch(&name, &args) {
                        break;
                    }
                }
                Err(ReadlineError::Eof) => {
                    // End of input is an ordinary exit.
                    break;
                }
                Err(ReadlineError::Interrupted) => {
                    debug!("interrupt received");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Resolve and execute one command. Returns false when the loop
    /// should terminate.
    fn dispatch(
        &mut self,
        name: &str,
        args: &[String],
    ) -> bool {
        let Some(command) = self.registry.resolve(name, &self.context) else {
            println!("Unknown command: {}", name);
            println!("Type 'help' for a list of commands");
            return true;
        };

        info!("executing command: {} with {} args", name, args.len());
        match command.execute(args) {
            Ok(Outcome::Text(text)) => {
                println!("{}", text);
                true
            }
            Ok(Outcome::Exit) => false,
            Err(err) => {
                println!("Error: {}", err);
                true
            }
        }
    }
}
