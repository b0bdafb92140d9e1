//! CSV codec for the history log
//!
//! Hand-rolled comma-delimited reader/writer with double-quote escaping.
//! The on-disk format is a header row (`operation,expression,result`)
//! followed by one row per record. Columns may appear in any order; extra
//! columns are ignored on read.

use super::{HistoryError, HistoryRecord};

/// Required column names, in write order.
pub const COLUMNS: [&str; 3] = ["operation", "expression", "result"];

/// Encode records as CSV text, header row included.
pub fn encode(records: &[HistoryRecord]) -> String {
    let mut out = String::new();
    out.push_str(&COLUMNS.join(","));
    out.push('\n');

    for record in records {
        out.push_str(&escape(&record.operation));
        out.push(',');
        out.push_str(&escape(&record.expression));
        out.push(',');
        out.push_str(&escape(&record.result));
        out.push('\n');
    }

    out
}

/// Decode CSV text into records.
///
/// Fails with [`HistoryError::MissingColumns`] when the header lacks any
/// required column, and [`HistoryError::Malformed`] for rows missing a
/// required field.
pub fn decode(text: &str) -> Result<Vec<HistoryRecord>, HistoryError> {
    let mut rows = parse_rows(text).into_iter();

    let header = rows.next().unwrap_or_default();
    let missing: Vec<&str> = COLUMNS
        .iter()
        .filter(|col| !header.iter().any(|h| h == *col))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(HistoryError::MissingColumns(missing.join(", ")));
    }

    // Header is validated above, so the positions always exist.
    let positions: Vec<usize> = COLUMNS
        .iter()
        .map(|col| header.iter().position(|h| h == col).unwrap_or(0))
        .collect();

    let mut records = Vec::new();
    for (line, row) in rows.enumerate() {
        if row.len() == 1 && row[0].is_empty() {
            continue;
        }

        let mut fields = Vec::with_capacity(COLUMNS.len());
        for (&pos, col) in positions.iter().zip(COLUMNS.iter()) {
            let field = row.get(pos).ok_or_else(|| HistoryError::Malformed {
                line: line + 2,
                message: format!("missing field for column {:?}", col),
            })?;
            fields.push(field.clone());
        }

        records.push(HistoryRecord {
            operation: fields[0].clone(),
            expression: fields[1].clone(),
            result: fields[2].clone(),
        });
    }

    Ok(records)
}

/// Quote a field when it contains a delimiter, quote, or line break;
/// embedded quotes are doubled.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split CSV text into rows of fields, honoring quoted sections
/// (including embedded delimiters and line breaks).
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            '\r' if !in_quotes => {
                // Swallow; the matching '\n' terminates the row.
            }
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
