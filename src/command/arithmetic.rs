//! Arithmetic commands
//!
//! One command type covers all four operations; the registry binds it to
//! each operation name. Numeric work and history recording live in the
//! calculator.

use crate::calc::format_number;

use super::{Command, CommandError, Outcome, SessionContext};

/// Binary arithmetic command bound to a named operation.
pub struct ArithmeticCommand {
    operation: &'static str,
    ctx: SessionContext,
}

impl ArithmeticCommand {
    pub fn new(
        operation: &'static str,
        ctx: SessionContext,
    ) -> Self {
        Self { operation, ctx }
    }
}

impl Command for ArithmeticCommand {
    fn execute(
        &self,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        let value = self.ctx.calculator().calculate(self.operation, args)?;
        Ok(Outcome::Text(format_number(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryLog;

    fn execute(
        operation: &'static str,
        args: &[&str],
    ) -> (Result<Outcome, CommandError>, SessionContext) {
        let ctx = SessionContext::new(HistoryLog::new());
        let command = ArithmeticCommand::new(operation, ctx.clone());
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        (command.execute(&args), ctx)
    }

    #[test]
    fn test_add_prints_minimal_result() {
        let (result, ctx) = execute("add", &["5", "3"]);
        match result.unwrap() {
            Outcome::Text(text) => assert_eq!(text, "8"),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(ctx.history().borrow().len(), 1);
    }

    #[test]
    fn test_divide_by_zero_is_invalid_argument() {
        let (result, ctx) = execute("divide", &["6", "0"]);
        match result.unwrap_err() {
            CommandError::InvalidArgument(msg) => assert!(msg.contains("division by zero")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(ctx.history().borrow().is_empty());
    }

    #[test]
    fn test_arity_error_mentions_expected_shape() {
        let (result, _ctx) = execute("subtract", &["1", "2", "3"]);
        match result.unwrap_err() {
            CommandError::InvalidArgument(msg) => assert!(msg.contains("exactly 2")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
