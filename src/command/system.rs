//! System commands
//!
//! `exit`/`quit` and `help` carry no business logic: exit signals the
//! dispatch loop to terminate, help renders the registry's help index.

use std::cell::RefCell;
use std::rc::Rc;

use crate::registry::{Category, HelpEntry};

use super::{Command, CommandError, Outcome};

/// `exit` / `quit` - terminate the dispatch loop.
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(
        &self,
        _args: &[String],
    ) -> Result<Outcome, CommandError> {
        Ok(Outcome::Exit)
    }
}

/// `help [command]` - render help for all commands grouped by category,
/// or the usage line for one command.
pub struct HelpCommand {
    entries: Rc<RefCell<Vec<HelpEntry>>>,
}

impl HelpCommand {
    pub fn new(entries: Rc<RefCell<Vec<HelpEntry>>>) -> Self {
        Self { entries }
    }

    fn render_all(&self) -> String {
        let entries = self.entries.borrow();
        let mut out = String::from("Available commands:");

        for category in Category::ALL {
            let group: Vec<&HelpEntry> = entries
                .iter()
                .filter(|entry| entry.category == category)
                .collect();
            if group.is_empty() {
                continue;
            }

            out.push_str(&format!("\n\n{}:", category.label()));
            for entry in group {
                out.push_str(&format!("\n  {}", render_entry(entry)));
            }
        }

        out
    }

    fn render_one(
        &self,
        name: &str,
    ) -> Result<String, CommandError> {
        let name = name.to_lowercase();
        let entries = self.entries.borrow();

        entries
            .iter()
            .find(|entry| entry.names.iter().any(|n| *n == name))
            .map(render_entry)
            .ok_or_else(|| CommandError::InvalidArgument(format!("unknown command: {}", name)))
    }
}

fn render_entry(entry: &HelpEntry) -> String {
    let mut line = format!("{} - {}", entry.usage, entry.help);
    if entry.names.len() > 1 {
        line.push_str(&format!(" (aliases: {})", entry.names[1..].join(", ")));
    }
    line
}

impl Command for HelpCommand {
    fn execute(
        &self,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        match args {
            [] => Ok(Outcome::Text(self.render_all())),
            [name] => Ok(Outcome::Text(self.render_one(name)?)),
            _ => Err(CommandError::InvalidArgument(
                "help takes at most 1 argument".to_string(),
            )),
        }
    }
}
