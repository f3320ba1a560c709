//! Positioned, printable diagnostics.
//!
//! A `Diagnostic` is an `Error` resolved against the source it came from:
//! it keeps the file name, line, column and the offending line of text so it
//! can be rendered long after the source string is gone.
//!
//! ```text
//! main.lang:3:10: unexpected token: ";"
//!     a := 2 +;
//!            ^
//! ```

use std::{fmt::Display, slice::Iter};

use crate::get_line;

use super::errors::{Error, ErrorTip, Stage};

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub filename: String,
    /// 1-based line number, 0 when the error has no place in the source
    pub line: usize,
    /// 0-based column of the first highlighted character
    pub column: usize,
    /// Number of highlighted characters, at least one for located errors
    pub length: usize,
    pub snippet: String,
    pub message: String,
    pub stage: Stage,
}

impl Diagnostic {
    pub fn from_error(error: &Error, filename: &str, source: &str) -> Self {
        let span = error.get_span();
        let message = match error.get_tip() {
            ErrorTip::None => error.to_string(),
            ErrorTip::Suggestion(tip) => format!("{} ({})", error, tip),
        };

        if span.is_null() {
            return Diagnostic {
                filename: filename.to_string(),
                line: 0,
                column: 0,
                length: 0,
                snippet: String::new(),
                message,
                stage: error.get_stage(),
            };
        }

        let snippet = get_line(source, span.start.line).unwrap_or("").to_string();

        // The highlight never runs past the end of the first line.
        let remaining = snippet.chars().count().saturating_sub(span.start.column);
        let length = if span.end.line == span.start.line {
            span.end.column.saturating_sub(span.start.column)
        } else {
            remaining
        };
        let length = length.min(remaining).max(1);

        Diagnostic {
            filename: filename.to_string(),
            line: span.start.line,
            column: span.start.column,
            length,
            snippet,
            message,
            stage: error.get_stage(),
        }
    }

    /// Whether the diagnostic points at a place in the source. Errors such as
    /// a missing entry function do not.
    pub fn is_located(&self) -> bool {
        self.line != 0
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_located() {
            return write!(f, "{}: {}", self.filename, self.message);
        }

        writeln!(
            f,
            "{}:{}:{}: {}",
            self.filename,
            self.line,
            self.column + 1,
            self.message
        )?;
        writeln!(f, "    {}", self.snippet)?;

        // Tabs are kept so the caret lines up with the snippet above.
        let padding: String = self
            .snippet
            .chars()
            .take(self.column)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        write!(f, "    {}^{}", padding, "~".repeat(self.length - 1))
    }
}

/// Append-only, ordered list of diagnostics collected over a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Errors {
    diagnostics: Vec<Diagnostic>,
}

impl Errors {
    pub fn new() -> Self {
        Errors {
            diagnostics: vec![],
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Resolves an error against its source and records it.
    pub fn report(&mut self, error: &Error, filename: &str, source: &str) {
        self.push(Diagnostic::from_error(error, filename, source));
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Diagnostic> {
        self.diagnostics.get(index)
    }

    /// Whether any recorded problem happened while the program was running.
    pub fn has_runtime_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diagnostic| diagnostic.stage == Stage::Runtime)
    }
}

impl Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, diagnostic) in self.diagnostics.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a Diagnostic;
    type IntoIter = Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
