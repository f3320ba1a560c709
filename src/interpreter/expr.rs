use crate::{
    ast::{
        ast::Expr,
        expressions::{BinaryExpr, BinaryOperator, CallExpr, NumberLiteral, PrefixExpr, PrefixOperator},
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::{
    builtins::{call_builtin, is_builtin},
    interpreter::{call_function, Interpreter},
    value::Value,
};

/// A fault the type checker should have ruled out.
fn inconsistency(message: String, span: &Span) -> Error {
    Error::new(ErrorImpl::InternalConsistency { message }, *span)
}

pub fn eval_expression(interpreter: &mut Interpreter<'_, '_>, expression: &Expr) -> Result<Value, Error> {
    match expression {
        Expr::Number(number) => Ok(match number.value {
            NumberLiteral::Int32(value) => Value::Int32(value),
            NumberLiteral::Float32(value) => Value::Float32(value),
        }),
        Expr::String(string) => Ok(Value::Str(string.value.clone())),
        Expr::Bool(boolean) => Ok(Value::Bool(boolean.value)),
        Expr::Symbol(symbol) => match interpreter.frames.get(&symbol.value) {
            Some(value) => Ok(value.clone()),
            None => Err(Error::new(
                ErrorImpl::UnboundVariable {
                    variable: symbol.value.clone(),
                },
                symbol.span,
            )),
        },
        Expr::Prefix(prefix) => eval_prefix(interpreter, prefix),
        Expr::Binary(binary) => eval_binary(interpreter, binary),
        Expr::Call(call) => eval_call(interpreter, call),
    }
}

fn eval_prefix(interpreter: &mut Interpreter<'_, '_>, prefix: &PrefixExpr) -> Result<Value, Error> {
    let operand = eval_expression(interpreter, &prefix.right_expr)?;

    match (prefix.operator, operand) {
        (PrefixOperator::Not, Value::Bool(value)) => Ok(Value::Bool(!value)),
        (PrefixOperator::Minus, Value::Int32(value)) => Ok(Value::Int32(value.wrapping_neg())),
        (PrefixOperator::Minus, Value::Float32(value)) => Ok(Value::Float32(-value)),
        (PrefixOperator::Plus, value @ (Value::Int32(_) | Value::Float32(_))) => Ok(value),
        (operator, value) => Err(inconsistency(
            format!("prefix `{}` applied to {}", operator, value.get_type()),
            &prefix.span,
        )),
    }
}

fn eval_binary(interpreter: &mut Interpreter<'_, '_>, binary: &BinaryExpr) -> Result<Value, Error> {
    let left = eval_expression(interpreter, &binary.left)?;
    let right = eval_expression(interpreter, &binary.right)?;

    match (left, right) {
        (Value::Int32(left), Value::Int32(right)) => eval_int(binary, left, right),
        (Value::Float32(left), Value::Float32(right)) => Ok(eval_float(binary.operator, left, right)),
        (Value::Bool(left), Value::Bool(right)) if binary.operator.is_equality() => {
            Ok(Value::Bool((left == right) == (binary.operator == BinaryOperator::Eq)))
        }
        (left, right) => Err(inconsistency(
            format!(
                "`{}` applied to {} and {}",
                binary.operator,
                left.get_type(),
                right.get_type()
            ),
            &binary.span,
        )),
    }
}

/// Integer arithmetic wraps on overflow.
fn eval_int(binary: &BinaryExpr, left: i32, right: i32) -> Result<Value, Error> {
    Ok(match binary.operator {
        BinaryOperator::Add => Value::Int32(left.wrapping_add(right)),
        BinaryOperator::Sub => Value::Int32(left.wrapping_sub(right)),
        BinaryOperator::Mul => Value::Int32(left.wrapping_mul(right)),
        BinaryOperator::Div => {
            if right == 0 {
                return Err(Error::new(ErrorImpl::DivisionByZero, binary.span));
            }
            Value::Int32(left.wrapping_div(right))
        }
        BinaryOperator::Eq => Value::Bool(left == right),
        BinaryOperator::Ne => Value::Bool(left != right),
        BinaryOperator::Lt => Value::Bool(left < right),
        BinaryOperator::Le => Value::Bool(left <= right),
        BinaryOperator::Gt => Value::Bool(left > right),
        BinaryOperator::Ge => Value::Bool(left >= right),
    })
}

/// Float arithmetic follows IEEE 754, so dividing by zero gives an infinity.
fn eval_float(operator: BinaryOperator, left: f32, right: f32) -> Value {
    match operator {
        BinaryOperator::Add => Value::Float32(left + right),
        BinaryOperator::Sub => Value::Float32(left - right),
        BinaryOperator::Mul => Value::Float32(left * right),
        BinaryOperator::Div => Value::Float32(left / right),
        BinaryOperator::Eq => Value::Bool(left == right),
        BinaryOperator::Ne => Value::Bool(left != right),
        BinaryOperator::Lt => Value::Bool(left < right),
        BinaryOperator::Le => Value::Bool(left <= right),
        BinaryOperator::Gt => Value::Bool(left > right),
        BinaryOperator::Ge => Value::Bool(left >= right),
    }
}

/// Evaluates the arguments in the caller's frame, then dispatches to the
/// builtin or to the user function of that name.
pub fn eval_call(interpreter: &mut Interpreter<'_, '_>, call: &CallExpr) -> Result<Value, Error> {
    let name = match call.callee_name() {
        Some(name) => name,
        None => {
            return Err(inconsistency(
                String::from("call of something that is not a function name"),
                &call.span,
            ))
        }
    };

    let mut arguments = Vec::with_capacity(call.arguments.len());
    for argument in call.arguments.iter() {
        arguments.push(eval_expression(interpreter, argument)?);
    }

    if is_builtin(name) {
        return call_builtin(interpreter, name, &arguments, &call.span);
    }

    let program = interpreter.program;
    match program.find_function(name) {
        Some(function) => call_function(interpreter, function, arguments),
        None => Err(inconsistency(
            format!("call of unknown function {:?}", name),
            &call.span,
        )),
    }
}
