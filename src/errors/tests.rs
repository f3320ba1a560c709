//! Unit tests for error handling.
//!
//! This module contains tests for error types and diagnostic rendering.

use crate::errors::{
    diagnostics::{Diagnostic, Errors},
    errors::{Error, ErrorImpl, ErrorTip, Stage},
};
use crate::{Position, Span};

fn span_at(line: usize, column: usize, length: usize) -> Span {
    Span {
        start: Position {
            offset: column,
            line,
            column,
        },
        end: Position {
            offset: column + length,
            line,
            column: column + length,
        },
    }
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(1, 10, 1),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_span().start.column, 10);
}

#[test]
fn test_function_not_defined_message() {
    let error = Error::new(
        ErrorImpl::FunctionNotDefined {
            function: "main".to_string(),
        },
        Span::null(),
    );

    assert_eq!(error.to_string(), "Function 'main' is not defined");
    assert_eq!(error.get_stage(), Stage::Compile);
}

#[test]
fn test_error_stages() {
    assert_eq!(
        Error::new(ErrorImpl::DivisionByZero, Span::null()).get_stage(),
        Stage::Runtime
    );
    assert_eq!(
        Error::new(
            ErrorImpl::MissingReturn {
                function: "f".to_string()
            },
            Span::null()
        )
        .get_stage(),
        Stage::Runtime
    );
    assert_eq!(
        Error::new(
            ErrorImpl::AssignmentToImmutable {
                variable: "x".to_string()
            },
            Span::null()
        )
        .get_stage(),
        Stage::Compile
    );
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        Span::null(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("`}`")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_diagnostic_from_error() {
    let source = "main: () -> Int32 = {\n    x := 1 + @;\n}\n";
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(2, 13, 1),
    );

    let diagnostic = Diagnostic::from_error(&error, "test.lang", source);
    assert_eq!(diagnostic.filename, "test.lang");
    assert_eq!(diagnostic.line, 2);
    assert_eq!(diagnostic.column, 13);
    assert_eq!(diagnostic.length, 1);
    assert_eq!(diagnostic.snippet, "    x := 1 + @;");
    assert_eq!(diagnostic.stage, Stage::Compile);
}

#[test]
fn test_diagnostic_render_caret_and_tildes() {
    let source = "x := undefined_name;";
    let error = Error::new(
        ErrorImpl::UnknownIdentifier {
            identifier: "undefined_name".to_string(),
        },
        span_at(1, 5, 14),
    );

    let rendered = Diagnostic::from_error(&error, "test.lang", source).to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "test.lang:1:6: unknown identifier \"undefined_name\"");
    assert_eq!(lines[1], "    x := undefined_name;");
    assert_eq!(lines[2], format!("         ^{}", "~".repeat(13)));
}

#[test]
fn test_diagnostic_highlight_is_clipped_to_line() {
    let source = "ab";
    let error = Error::new(ErrorImpl::UnterminatedComment, span_at(1, 1, 40));

    let diagnostic = Diagnostic::from_error(&error, "test.lang", source);
    assert_eq!(diagnostic.length, 1);
}

#[test]
fn test_errors_is_append_only_and_ordered() {
    let source = "a\nb\n";
    let mut errors = Errors::new();
    assert!(errors.is_empty());

    errors.report(
        &Error::new(
            ErrorImpl::UnrecognisedToken {
                token: "a".to_string(),
            },
            span_at(1, 0, 1),
        ),
        "test.lang",
        source,
    );
    errors.report(
        &Error::new(ErrorImpl::DivisionByZero, span_at(2, 0, 1)),
        "test.lang",
        source,
    );

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(0).unwrap().line, 1);
    assert_eq!(errors.get(1).unwrap().line, 2);
    assert!(errors.has_runtime_errors());
    assert_eq!(errors.iter().count(), 2);
}

#[test]
fn test_diagnostic_without_location_has_no_snippet() {
    let source = "f";
    let error = Error::new(
        ErrorImpl::FunctionNotDefined {
            function: "main".to_string(),
        },
        Span::null(),
    );

    let diagnostic = Diagnostic::from_error(&error, "test.lang", source);

    assert!(!diagnostic.is_located());
    assert_eq!(diagnostic.snippet, "");
    assert_eq!(
        diagnostic.to_string(),
        "test.lang: Function 'main' is not defined"
    );
}

#[test]
fn test_diagnostic_at_start_of_file_is_located() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        span_at(1, 0, 1),
    );

    let diagnostic = Diagnostic::from_error(&error, "test.lang", "@");

    assert!(diagnostic.is_located());
    assert_eq!(diagnostic.to_string(), "test.lang:1:1: unrecognised token: \"@\"\n    @\n    ^");
}
