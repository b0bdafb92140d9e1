//! Operation table
//!
//! Maps operation names to binary numeric functions. Pure lookups, no state.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::CalcError;

/// A registered binary operation.
pub struct Operation {
    /// Display symbol used when formatting expressions
    pub symbol: char,
    apply: fn(f64, f64) -> f64,
}

static OPERATIONS: Lazy<IndexMap<&'static str, Operation>> = Lazy::new(|| {
    let mut ops = IndexMap::new();
    ops.insert(
        "add",
        Operation {
            symbol: '+',
            apply: |a, b| a + b,
        },
    );
    ops.insert(
        "subtract",
        Operation {
            symbol: '-',
            apply: |a, b| a - b,
        },
    );
    ops.insert(
        "multiply",
        Operation {
            symbol: '*',
            apply: |a, b| a * b,
        },
    );
    ops.insert(
        "divide",
        Operation {
            symbol: '/',
            apply: |a, b| a / b,
        },
    );
    ops
});

/// Apply a named operation to two operands.
///
/// Fails with [`CalcError::UnknownOperation`] for absent names and
/// [`CalcError::DivisionByZero`] when dividing by zero.
pub fn apply(
    name: &str,
    a: f64,
    b: f64,
) -> Result<f64, CalcError> {
    let op = OPERATIONS
        .get(name)
        .ok_or_else(|| CalcError::UnknownOperation(name.to_string()))?;

    if name == "divide" && b == 0.0 {
        return Err(CalcError::DivisionByZero);
    }

    Ok((op.apply)(a, b))
}

/// Get the display symbol for a named operation.
pub fn symbol(name: &str) -> Option<char> {
    OPERATIONS.get(name).map(|op| op.symbol)
}

/// Names of all registered operations, in registration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    OPERATIONS.keys().copied()
}
