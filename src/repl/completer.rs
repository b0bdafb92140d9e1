//! Command-name completion for rustyline
//!
//! Completes only the first token of a line from the registry's name
//! list; arguments are free text.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;

/// rustyline helper offering registered command names.
pub struct CommandCompleter {
    names: Vec<String>,
}

impl CommandCompleter {
    /// Create a completer over a sorted list of command names.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();
        let word = &prefix[start..];

        // Only the command position is completable.
        if word.is_empty() || word.contains(char::is_whitespace) {
            return Ok((start, Vec::new()));
        }

        let candidates = self
            .names
            .iter()
            .filter(|name| name.starts_with(word))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();

        Ok((start, candidates))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
