//! Main interpreter module.
//!
//! This module contains the `Interpreter` structure and the entry point that
//! runs one function of a `CheckedProgram`. Statements and expressions are
//! evaluated by the sibling `stmt` and `expr` modules.

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{statements::FnDeclStmt, types::Type},
    errors::errors::{Error, ErrorImpl, Stage},
    type_checker::type_checker::CheckedProgram,
    Span,
};

use super::{
    expr::eval_expression,
    frames::{FrameId, FrameStack},
    stmt::{exec_statements, Flow},
    value::Value,
};

/// Where `print` sends its output.
pub trait OutputSink {
    fn print(&mut self, value: &Value);
}

/// Writes every printed value on its own line of standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn print(&mut self, value: &Value) {
        println!("{}", value);
    }
}

impl OutputSink for Vec<String> {
    fn print(&mut self, value: &Value) {
        self.push(value.to_string());
    }
}

/// Why a run failed: before anything executed, or while executing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunError {
    #[error("{0}")]
    CompileError(Error),
    #[error("{0}")]
    RuntimeError(Error),
}

impl RunError {
    pub fn error(&self) -> &Error {
        match self {
            RunError::CompileError(error) | RunError::RuntimeError(error) => error,
        }
    }

    pub fn is_compile_error(&self) -> bool {
        matches!(self, RunError::CompileError(_))
    }
}

impl From<Error> for RunError {
    fn from(error: Error) -> Self {
        match error.get_stage() {
            Stage::Compile => RunError::CompileError(error),
            Stage::Runtime => RunError::RuntimeError(error),
        }
    }
}

/// A tree-walking interpreter over a checked program.
///
/// # Type Parameters
///
/// * `'p` - Lifetime of the borrowed program
/// * `'o` - Lifetime of the output sink
pub struct Interpreter<'p, 'o> {
    /// The program being run; never modified
    pub(super) program: &'p CheckedProgram,
    /// Receives the output of `print`
    pub(super) output: &'o mut dyn OutputSink,
    /// Runtime frames, rebuilt by every `run`
    pub(super) frames: FrameStack,
}

impl<'p, 'o> Interpreter<'p, 'o> {
    pub fn new(program: &'p CheckedProgram, output: &'o mut dyn OutputSink) -> Self {
        Interpreter {
            program,
            output,
            frames: FrameStack::new(),
        }
    }

    /// Runs the function `name` with `arguments` and returns its result.
    ///
    /// The function and the arguments are validated before anything runs;
    /// those failures are `RunError::CompileError`. Globals are then
    /// initialised in source order and the function is called. Faults found
    /// while executing are `RunError::RuntimeError`.
    pub fn run(&mut self, name: &str, arguments: Vec<Value>) -> Result<Value, RunError> {
        let function = self.find_entry(name, &arguments)?;

        self.frames.reset();
        self.init_globals()?;

        debug!(function = name, arguments = arguments.len(), "running");
        let result = call_function(self, function, arguments)?;
        debug!(function = name, result = %result, "finished");

        Ok(result)
    }

    fn find_entry(&self, name: &str, arguments: &[Value]) -> Result<&'p FnDeclStmt, RunError> {
        let program = self.program;
        let function = match program.find_function(name) {
            Some(function) => function,
            None => {
                return Err(RunError::CompileError(Error::new(
                    ErrorImpl::FunctionNotDefined {
                        function: name.to_string(),
                    },
                    Span::null(),
                )))
            }
        };

        let expected = function.parameters.len();
        let received = arguments.len();
        if received > expected {
            return Err(RunError::CompileError(Error::new(
                ErrorImpl::UnexpectedArguments { expected, received },
                function.span,
            )));
        } else if received < expected {
            return Err(RunError::CompileError(Error::new(
                ErrorImpl::MissingArguments { expected, received },
                function.span,
            )));
        }

        for (parameter, argument) in function.parameters.iter().zip(arguments.iter()) {
            if argument.get_type() != parameter.param_type.ty {
                return Err(RunError::CompileError(Error::new(
                    ErrorImpl::ArgumentTypeMatchError {
                        expected: parameter.param_type.ty.to_string(),
                        received: argument.get_type().to_string(),
                    },
                    parameter.span,
                )));
            }
        }

        Ok(function)
    }

    fn init_globals(&mut self) -> Result<(), RunError> {
        let program = self.program;

        for global in program.program().globals.iter() {
            let value = match &global.assigned_value {
                Some(value) => eval_expression(self, value)?,
                None => zero_value(&global.var_type.ty, &global.span)?,
            };
            self.frames.bind(&global.identifier, value);
        }

        Ok(())
    }
}

/// The starting value of a variable defined without an initializer.
pub(super) fn zero_value(ty: &Type, span: &Span) -> Result<Value, Error> {
    Value::zero(ty).ok_or_else(|| {
        Error::new(
            ErrorImpl::InternalConsistency {
                message: format!("values of type {} cannot be created at runtime", ty),
            },
            *span,
        )
    })
}

/// Calls a user function with already evaluated arguments.
///
/// The new frame's parent is the global frame, so the callee never sees the
/// caller's locals. The frame is popped however the body finishes.
pub(super) fn call_function(
    interpreter: &mut Interpreter<'_, '_>,
    function: &FnDeclStmt,
    arguments: Vec<Value>,
) -> Result<Value, Error> {
    trace!(
        function = %function.identifier,
        depth = interpreter.frames.depth(),
        "call"
    );

    interpreter.frames.push(FrameId::GLOBAL);
    for (parameter, value) in function.parameters.iter().zip(arguments) {
        interpreter.frames.bind(&parameter.name, value);
    }

    let flow = exec_statements(interpreter, &function.body.body);
    interpreter.frames.pop();

    match flow? {
        Flow::Return(value) => Ok(value),
        Flow::Continue if function.return_type == Type::Void => Ok(Value::Void),
        Flow::Continue => Err(Error::new(
            ErrorImpl::MissingReturn {
                function: function.identifier.clone(),
            },
            function.span,
        )),
    }
}
