//! History commands
//!
//! Read or mutate the shared history log and render human-readable
//! summaries or one-line confirmations.

use super::{Command, CommandError, Outcome, SessionContext};

/// `history` - list all recorded calculations.
pub struct HistoryCommand {
    ctx: SessionContext,
}

impl HistoryCommand {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }
}

impl Command for HistoryCommand {
    fn execute(
        &self,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        if !args.is_empty() {
            return Err(CommandError::InvalidArgument(
                "history takes no arguments".to_string(),
            ));
        }

        let records = self.ctx.history().borrow().list();
        if records.is_empty() {
            return Ok(Outcome::Text("History is empty".to_string()));
        }

        let lines: Vec<String> = records
            .iter()
            .enumerate()
            .map(|(index, record)| format!("{}: {} = {}", index, record.expression, record.result))
            .collect();
        Ok(Outcome::Text(lines.join("\n")))
    }
}

/// `clear` - empty the history log.
pub struct ClearHistoryCommand {
    ctx: SessionContext,
}

impl ClearHistoryCommand {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }
}

impl Command for ClearHistoryCommand {
    fn execute(
        &self,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        if !args.is_empty() {
            return Err(CommandError::InvalidArgument(
                "clear takes no arguments".to_string(),
            ));
        }

        self.ctx.history().borrow_mut().clear();
        Ok(Outcome::Text("History cleared".to_string()))
    }
}

/// `delete <index>` - remove one history entry.
pub struct DeleteCommand {
    ctx: SessionContext,
}

impl DeleteCommand {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }
}

impl Command for DeleteCommand {
    fn execute(
        &self,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        if args.len() != 1 {
            return Err(CommandError::InvalidArgument(
                "delete expects exactly 1 argument: a history index".to_string(),
            ));
        }

        let index: usize = args[0].parse().map_err(|_| {
            CommandError::InvalidArgument(format!("invalid history index: {:?}", args[0]))
        })?;

        if self.ctx.history().borrow_mut().delete_at(index) {
            Ok(Outcome::Text(format!("Deleted history entry at index {}", index)))
        } else {
            Err(CommandError::InvalidArgument(format!(
                "no history entry at index {}",
                index
            )))
        }
    }
}
