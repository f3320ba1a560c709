use std::fmt::Display;

use thiserror::Error;

use crate::Span;

/// Whether an error can be detected without running the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Compile,
    Runtime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_stage(&self) -> Stage {
        match &self.internal_error {
            ErrorImpl::DivisionByZero
            | ErrorImpl::MissingReturn { .. }
            | ErrorImpl::UnboundVariable { .. }
            | ErrorImpl::InternalConsistency { .. } => Stage::Runtime,
            _ => Stage::Compile,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::UnknownIdentifier { .. } => "UnknownIdentifier",
            ErrorImpl::FunctionNotDefined { .. } => "FunctionNotDefined",
            ErrorImpl::FunctionUsedAsValue { .. } => "FunctionUsedAsValue",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::InvalidOperand { .. } => "InvalidOperand",
            ErrorImpl::InvalidVariableType { .. } => "InvalidVariableType",
            ErrorImpl::ExpectedExplicitValue { .. } => "ExpectedExplicitValue",
            ErrorImpl::AssignmentToImmutable { .. } => "AssignmentToImmutable",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::UnboundVariable { .. } => "UnboundVariable",
            ErrorImpl::InternalConsistency { .. } => "InternalConsistency",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "String literals must be closed with `\"` on the same line",
            )),
            ErrorImpl::UnterminatedComment => ErrorTip::Suggestion(String::from(
                "Every `/*` needs a matching `*/`",
            )),
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` already declared in this scope",
                variable
            )),
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::UnknownIdentifier { .. } => ErrorTip::None,
            ErrorImpl::FunctionNotDefined { .. } => ErrorTip::None,
            ErrorImpl::FunctionUsedAsValue { function } => ErrorTip::Suggestion(format!(
                "Functions can only be called, try `{}(...)`",
                function
            )),
            ErrorImpl::NotCallable { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedArguments { expected, received }
            | ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::InvalidOperand { .. } => ErrorTip::None,
            ErrorImpl::InvalidVariableType { .. } => ErrorTip::None,
            ErrorImpl::ExpectedExplicitValue { .. } => ErrorTip::Suggestion(String::from(
                "Expected explicit value when no type is given",
            )),
            ErrorImpl::AssignmentToImmutable { variable } => ErrorTip::Suggestion(format!(
                "Declare `{}` as `mutable` to allow assignment",
                variable
            )),
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::MissingReturn { .. } => ErrorTip::Suggestion(String::from(
                "Every path through a non-void function must reach a `return`",
            )),
            ErrorImpl::UnboundVariable { .. } => ErrorTip::None,
            ErrorImpl::InternalConsistency { .. } => ErrorTip::Suggestion(String::from(
                "This is a bug in the type checker, please report it",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexing
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,

    // Parsing
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Semantic analysis
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("function {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("unknown identifier {identifier:?}")]
    UnknownIdentifier { identifier: String },
    #[error("Function '{function}' is not defined")]
    FunctionNotDefined { function: String },
    #[error("function {function:?} used as a value")]
    FunctionUsedAsValue { function: String },
    #[error("{callee:?} of type {type_} is not callable")]
    NotCallable { callee: String, type_: String },
    #[error("unexpected arguments: expected {expected}, received {received}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected}, received {received}")]
    MissingArguments { expected: usize, received: usize },
    #[error("argument types do not match: expected {expected}, received {received}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("operator `{operator}` cannot be applied to {operand}")]
    InvalidOperand { operator: String, operand: String },
    #[error("variable {variable:?} cannot have type {type_}")]
    InvalidVariableType { variable: String, type_: String },
    #[error("variable {variable:?} needs an initializer to deduce its type")]
    ExpectedExplicitValue { variable: String },
    #[error("cannot assign to immutable variable {variable:?}")]
    AssignmentToImmutable { variable: String },

    // Execution
    #[error("division by zero")]
    DivisionByZero,
    #[error("function {function:?} finished without returning a value")]
    MissingReturn { function: String },
    #[error("variable {variable:?} is not bound")]
    UnboundVariable { variable: String },
    #[error("internal consistency fault: {message}")]
    InternalConsistency { message: String },
}
