//! Builtin functions, dispatched by callee name before the function table.

use crate::{
    errors::errors::{Error, ErrorImpl},
    type_checker::type_checker::PRINT,
    Span,
};

use super::{interpreter::Interpreter, value::Value};

pub fn is_builtin(name: &str) -> bool {
    name == PRINT
}

pub fn call_builtin(
    interpreter: &mut Interpreter<'_, '_>,
    name: &str,
    arguments: &[Value],
    span: &Span,
) -> Result<Value, Error> {
    match name {
        PRINT => {
            // One line per argument.
            for argument in arguments {
                interpreter.output.print(argument);
            }
            Ok(Value::Void)
        }
        _ => Err(Error::new(
            ErrorImpl::InternalConsistency {
                message: format!("{:?} is not a builtin", name),
            },
            *span,
        )),
    }
}
