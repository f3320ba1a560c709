#![allow(clippy::module_inception)]

use std::time::Instant;

use tracing::debug;

use crate::{
    errors::diagnostics::Errors,
    interpreter::{
        interpreter::{Interpreter, OutputSink},
        value::Value,
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::{type_check, CheckedProgram},
};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A location in the source text.
///
/// `line` is 1-based, `column` is 0-based and counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn null() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }

    /// Whether this is the placeholder span of an error that belongs to no
    /// place in the source.
    pub fn is_null(&self) -> bool {
        *self == Span::null()
    }

    /// Joins two spans into one covering both.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }

    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns the text of the given 1-based line, without its line terminator.
pub fn get_line(source: &str, line: usize) -> Option<&str> {
    source
        .split('\n')
        .nth(line.checked_sub(1)?)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

/// Runs lexer, parser and type checker over a source string.
///
/// Every error found along the way is collected into one `Errors` list, so a
/// host can render all of them at once.
pub fn compile_source(source: &str, file: &str) -> Result<CheckedProgram, Errors> {
    let mut errors = Errors::new();

    let start = Instant::now();
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(lex_errors) => {
            for error in lex_errors.iter() {
                errors.report(error, file, source);
            }
            return Err(errors);
        }
    };
    debug!(file, tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    let parse_start = Instant::now();
    let program = match parse(tokens) {
        Ok(program) => program,
        Err(error) => {
            errors.report(&error, file, source);
            return Err(errors);
        }
    };
    debug!(
        file,
        functions = program.functions.len(),
        globals = program.globals.len(),
        elapsed = ?parse_start.elapsed(),
        "parsed"
    );

    let check_start = Instant::now();
    let checked = match type_check(program) {
        Ok(checked) => checked,
        Err(type_errors) => {
            for error in type_errors.iter() {
                errors.report(error, file, source);
            }
            return Err(errors);
        }
    };
    debug!(file, elapsed = ?check_start.elapsed(), "type checked");

    Ok(checked)
}

/// Compiles a source string and runs one of its functions.
///
/// Compile-time problems and runtime faults are both returned as rendered
/// diagnostics; anything printed before a runtime fault stays printed.
pub fn run_source(
    source: &str,
    file: &str,
    entry: &str,
    arguments: Vec<Value>,
    output: &mut dyn OutputSink,
) -> Result<Value, Errors> {
    let program = compile_source(source, file)?;

    let run_start = Instant::now();
    let mut interpreter = Interpreter::new(&program, output);
    let result = interpreter.run(entry, arguments);
    debug!(file, entry, elapsed = ?run_start.elapsed(), "executed");

    result.map_err(|error| {
        let mut errors = Errors::new();
        errors.report(error.error(), file, source);
        errors
    })
}
