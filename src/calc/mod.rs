//! Calculator core
//!
//! The [`Calculator`] validates operands, delegates numeric work to the
//! operation table, and records successful calculations in the history log.

pub mod ops;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info};

use crate::history::HistoryLog;

/// Errors from argument validation or arithmetic.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("{operation} expects exactly 2 numeric arguments, got {got}")]
    InvalidArity { operation: String, got: usize },

    #[error("invalid operand {value:?} for {operation}: not a number")]
    InvalidOperand { operation: String, value: String },
}

/// Render a float with minimal digits: `8` rather than `8.0`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Calculator bound to a shared history log.
///
/// Each successful calculation appends a record formatted as
/// `"<a> <symbol> <b>"` with the minimally rendered result.
pub struct Calculator {
    history: Rc<RefCell<HistoryLog>>,
}

impl Calculator {
    /// Create a calculator that records into the given history log.
    pub fn new(history: Rc<RefCell<HistoryLog>>) -> Self {
        Self { history }
    }

    /// Perform a named binary operation on string operands.
    ///
    /// Validates arity and operand types before touching the operation
    /// table; appends a history record only on success.
    pub fn calculate(
        &self,
        operation: &str,
        args: &[String],
    ) -> Result<f64, CalcError> {
        let symbol = ops::symbol(operation)
            .ok_or_else(|| CalcError::UnknownOperation(operation.to_string()))?;

        if args.len() != 2 {
            return Err(CalcError::InvalidArity {
                operation: operation.to_string(),
                got: args.len(),
            });
        }

        let a = parse_operand(operation, &args[0])?;
        let b = parse_operand(operation, &args[1])?;

        let result = ops::apply(operation, a, b)?;

        let expression = format!("{} {} {}", format_number(a), symbol, format_number(b));
        self.history
            .borrow_mut()
            .append(operation, &expression, &format_number(result));

        info!("calculated: {} = {}", expression, format_number(result));
        Ok(result)
    }
}

fn parse_operand(
    operation: &str,
    value: &str,
) -> Result<f64, CalcError> {
    value.parse::<f64>().map_err(|_| {
        debug!("failed to parse operand {:?} for {}", value, operation);
        CalcError::InvalidOperand {
            operation: operation.to_string(),
            value: value.to_string(),
        }
    })
}
