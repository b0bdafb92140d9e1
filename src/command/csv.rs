//! CSV import/export commands
//!
//! Move the history log to and from comma-delimited files. Import
//! validates the schema before touching in-memory state.

use std::path::{Path, PathBuf};

use crate::history::csv as history_csv;

use super::{Command, CommandError, Outcome, SessionContext};

/// Append a `.csv` extension when the name has none.
fn normalize_csv_path(name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("csv")
    }
}

/// `export_csv <file>` - write the history log to a CSV file.
pub struct ExportCsvCommand {
    ctx: SessionContext,
}

impl ExportCsvCommand {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }
}

impl Command for ExportCsvCommand {
    fn execute(
        &self,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        if args.len() != 1 {
            return Err(CommandError::InvalidArgument(
                "export_csv expects exactly 1 argument: a file name".to_string(),
            ));
        }

        let path = normalize_csv_path(&args[0]);
        let history = self.ctx.history().borrow();
        if history.is_empty() {
            return Ok(Outcome::Text("No history to export".to_string()));
        }

        history
            .save_to(&path)
            .map_err(|err| CommandError::Failed(format!("failed to export CSV: {}", err)))?;
        Ok(Outcome::Text(format!("History exported to {}", path.display())))
    }
}

/// `import_csv <file>` - replace the history log from a CSV file.
pub struct ImportCsvCommand {
    ctx: SessionContext,
}

impl ImportCsvCommand {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }
}

impl Command for ImportCsvCommand {
    fn execute(
        &self,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        if args.len() != 1 {
            return Err(CommandError::InvalidArgument(
                "import_csv expects exactly 1 argument: a file name".to_string(),
            ));
        }

        let path = normalize_csv_path(&args[0]);
        if !path.exists() {
            return Err(CommandError::Failed(format!(
                "file {} does not exist",
                path.display()
            )));
        }

        let text = std::fs::read_to_string(&path)
            .map_err(|err| CommandError::Failed(format!("failed to read {}: {}", path.display(), err)))?;

        // Decode fully before replacing, so a schema error leaves the
        // current history untouched.
        let records = history_csv::decode(&text)
            .map_err(|err| CommandError::Failed(format!("failed to import CSV: {}", err)))?;

        let count = records.len();
        self.ctx.history().borrow_mut().replace_all(records);
        Ok(Outcome::Text(format!(
            "History imported from {} ({} records)",
            path.display(),
            count
        )))
    }
}
