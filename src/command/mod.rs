//! Command abstraction
//!
//! Every REPL command implements [`Command`] and is constructed with a
//! clone of the shared [`SessionContext`]. Commands validate their own
//! arguments and report user-input mistakes as [`CommandError`] values,
//! never panics.

pub mod arithmetic;
pub mod csv;
pub mod history;
pub mod system;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::calc::{CalcError, Calculator};
use crate::history::HistoryLog;

/// What a command asks the dispatch loop to do next.
#[derive(Debug)]
pub enum Outcome {
    /// Print this text and keep looping.
    Text(String),
    /// Terminate the loop.
    Exit,
}

/// Command-level failures, rendered as `Error: <message>` by the loop.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Wrong arity or argument type.
    #[error("{0}")]
    InvalidArgument(String),

    /// The command ran but could not complete.
    #[error("{0}")]
    Failed(String),
}

impl From<CalcError> for CommandError {
    fn from(err: CalcError) -> Self {
        CommandError::InvalidArgument(err.to_string())
    }
}

/// A named, executable unit invoked by the dispatch loop.
pub trait Command {
    /// Execute with positional string arguments.
    fn execute(
        &self,
        args: &[String],
    ) -> Result<Outcome, CommandError>;
}

/// Shared calculator/history handle passed to every command at
/// construction time. Owned by the dispatch loop for the lifetime of
/// one session; cloning shares the underlying state.
#[derive(Clone)]
pub struct SessionContext {
    calculator: Rc<Calculator>,
    history: Rc<RefCell<HistoryLog>>,
}

impl SessionContext {
    /// Wrap a history log into a fresh session context.
    pub fn new(history: HistoryLog) -> Self {
        let history = Rc::new(RefCell::new(history));
        let calculator = Rc::new(Calculator::new(Rc::clone(&history)));
        Self {
            calculator,
            history,
        }
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn history(&self) -> &Rc<RefCell<HistoryLog>> {
        &self.history
    }
}
