use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{BlockStmt, VarDeclStmt},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    expr::{eval_call, eval_expression},
    interpreter::{zero_value, Interpreter},
    value::Value,
};

/// What a statement tells the statement list around it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Continue,
    Return(Value),
}

/// Runs statements in the active frame until one of them returns.
pub fn exec_statements(
    interpreter: &mut Interpreter<'_, '_>,
    statements: &[Stmt],
) -> Result<Flow, Error> {
    for statement in statements {
        if let Flow::Return(value) = exec_statement(interpreter, statement)? {
            return Ok(Flow::Return(value));
        }
    }

    Ok(Flow::Continue)
}

/// Runs a nested block in a new frame parented to the active one.
pub fn exec_block(interpreter: &mut Interpreter<'_, '_>, block: &BlockStmt) -> Result<Flow, Error> {
    if block.is_empty() {
        return Ok(Flow::Continue);
    }

    let parent = interpreter.frames.active();
    interpreter.frames.push(parent);
    let flow = exec_statements(interpreter, &block.body);
    interpreter.frames.pop();

    flow
}

pub fn exec_statement(
    interpreter: &mut Interpreter<'_, '_>,
    statement: &Stmt,
) -> Result<Flow, Error> {
    match statement {
        Stmt::Expression(stmt) => {
            eval_call(interpreter, &stmt.expression)?;
        }
        Stmt::VarDecl(stmt) => exec_var_decl(interpreter, stmt)?,
        Stmt::Assignment(stmt) => {
            let value = eval_expression(interpreter, &stmt.value)?;
            if !interpreter.frames.set(&stmt.identifier, value) {
                return Err(Error::new(
                    ErrorImpl::UnboundVariable {
                        variable: stmt.identifier.clone(),
                    },
                    stmt.span,
                ));
            }
        }
        Stmt::Return(stmt) => {
            let value = match &stmt.value {
                Some(value) => eval_expression(interpreter, value)?,
                None => Value::Void,
            };
            return Ok(Flow::Return(value));
        }
        Stmt::If(stmt) => {
            return if eval_condition(interpreter, &stmt.condition)? {
                exec_block(interpreter, &stmt.then_body)
            } else {
                exec_block(interpreter, &stmt.else_body)
            };
        }
        Stmt::While(stmt) => {
            // Every iteration gets a fresh frame, so the body may define the
            // same names again.
            while eval_condition(interpreter, &stmt.condition)? {
                if let Flow::Return(value) = exec_block(interpreter, &stmt.body)? {
                    return Ok(Flow::Return(value));
                }
            }
        }
    }

    Ok(Flow::Continue)
}

fn exec_var_decl(interpreter: &mut Interpreter<'_, '_>, stmt: &VarDeclStmt) -> Result<(), Error> {
    let value = match &stmt.assigned_value {
        Some(value) => eval_expression(interpreter, value)?,
        None => zero_value(&stmt.var_type.ty, &stmt.span)?,
    };
    interpreter.frames.bind(&stmt.identifier, value);

    Ok(())
}

fn eval_condition(interpreter: &mut Interpreter<'_, '_>, condition: &Expr) -> Result<bool, Error> {
    match eval_expression(interpreter, condition)? {
        Value::Bool(value) => Ok(value),
        other => Err(Error::new(
            ErrorImpl::InternalConsistency {
                message: format!("condition evaluated to {} instead of Bool", other.get_type()),
            },
            *condition.get_span(),
        )),
    }
}
