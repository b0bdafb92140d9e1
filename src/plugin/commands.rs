//! Adapter commands for manifest-declared plugin kinds.

use crate::calc::format_number;
use crate::command::{Command, CommandError, Outcome};

/// Unary power command: raises its argument to a fixed exponent.
pub struct PowerCommand {
    name: String,
    exponent: f64,
}

impl PowerCommand {
    pub fn new(
        name: String,
        exponent: f64,
    ) -> Self {
        Self { name, exponent }
    }
}

impl Command for PowerCommand {
    fn execute(
        &self,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        if args.len() != 1 {
            return Err(CommandError::InvalidArgument(format!(
                "{} expects exactly 1 numeric argument",
                self.name
            )));
        }

        let base: f64 = args[0].parse().map_err(|_| {
            CommandError::InvalidArgument(format!(
                "invalid operand {:?} for {}: not a number",
                args[0], self.name
            ))
        })?;

        let result = base.powf(self.exponent);
        Ok(Outcome::Text(format!(
            "{} ^ {} = {}",
            format_number(base),
            format_number(self.exponent),
            format_number(result)
        )))
    }
}

/// Text template command: substitutes `{name}` with the first argument.
pub struct GreetingCommand {
    name: String,
    template: String,
}

impl GreetingCommand {
    pub fn new(
        name: String,
        template: String,
    ) -> Self {
        Self { name, template }
    }
}

impl Command for GreetingCommand {
    fn execute(
        &self,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        if args.len() > 1 {
            return Err(CommandError::InvalidArgument(format!(
                "{} takes at most 1 argument",
                self.name
            )));
        }

        let who = args.first().map(String::as_str).unwrap_or("there");
        Ok(Outcome::Text(self.template.replace("{name}", who)))
    }
}
