use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{BinaryExpr, CallExpr, NumberLiteral, PrefixExpr, PrefixOperator},
        statements::{AssignmentStmt, BlockStmt, FnDeclStmt, ReturnStmt, VarDeclStmt},
        types::{FunctionType, Qualifier, Type},
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::scope::{ScopeId, ScopeTree};

/// Name of the only builtin function.
pub const PRINT: &str = "print";

/// The synthetic signature of `print`; calls to it skip arity and type checks.
pub fn print_type() -> FunctionType {
    FunctionType {
        parameters: vec![Type::Unspecified],
        return_type: Box::new(Type::Void),
    }
}

/// A program that passed semantic analysis, together with its scope tree.
///
/// Every `Deduced` type in the program has been replaced by a concrete one
/// and every non-empty block carries its scope id.
#[derive(Debug)]
pub struct CheckedProgram {
    program: Program,
    scopes: ScopeTree,
}

impl CheckedProgram {
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn find_function(&self, name: &str) -> Option<&FnDeclStmt> {
        self.program.find_function(name)
    }
}

/// What an identifier refers to.
enum Resolved<'a> {
    Variable(&'a Type),
    Function(&'a FunctionType),
    Builtin,
}

#[derive(Debug)]
pub struct TypeChecker {
    pub scopes: ScopeTree,
    /// Signatures of every function in the program, so bodies may call
    /// functions defined further down.
    pub functions: HashMap<String, FunctionType>,
    pub current_scope: ScopeId,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            scopes: ScopeTree::new(),
            functions: HashMap::new(),
            current_scope: ScopeId::GLOBAL,
        }
    }

    /// Variables first, through the scope chain, then functions, then `print`.
    fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if let Some(binding) = self.scopes.lookup(self.current_scope, name) {
            Some(Resolved::Variable(&binding.ty))
        } else if let Some(function) = self.functions.get(name) {
            Some(Resolved::Function(function))
        } else if name == PRINT {
            Some(Resolved::Builtin)
        } else {
            None
        }
    }

    fn declare(&mut self, name: &str, ty: Type, qualifier: Qualifier, span: Span) -> Result<(), Error> {
        self.scopes
            .declare(self.current_scope, name, ty, qualifier, span)
    }
}

fn type_mismatch(expected: &Type, received: &Type, span: &Span) -> Error {
    Error::new(
        ErrorImpl::TypeMatchError {
            expected: expected.to_string(),
            received: received.to_string(),
        },
        *span,
    )
}

pub fn type_check_expr(type_checker: &TypeChecker, ast: &Expr) -> Result<Type, Error> {
    match ast {
        Expr::Number(number) => Ok(match number.value {
            NumberLiteral::Int32(_) => Type::Int32,
            NumberLiteral::Float32(_) => Type::Float32,
        }),
        Expr::String(_) => Ok(Type::string()),
        Expr::Bool(_) => Ok(Type::Bool),
        Expr::Symbol(symbol) => match type_checker.resolve(&symbol.value) {
            Some(Resolved::Variable(ty)) => Ok(ty.clone()),
            Some(Resolved::Function(_)) | Some(Resolved::Builtin) => Err(Error::new(
                ErrorImpl::FunctionUsedAsValue {
                    function: symbol.value.clone(),
                },
                symbol.span,
            )),
            None => Err(Error::new(
                ErrorImpl::UnknownIdentifier {
                    identifier: symbol.value.clone(),
                },
                symbol.span,
            )),
        },
        Expr::Prefix(prefix) => type_check_prefix(type_checker, prefix),
        Expr::Binary(binary) => type_check_binary(type_checker, binary),
        Expr::Call(call) => type_check_call(type_checker, call),
    }
}

fn type_check_prefix(type_checker: &TypeChecker, prefix: &PrefixExpr) -> Result<Type, Error> {
    let operand = type_check_expr(type_checker, &prefix.right_expr)?;

    let valid = match prefix.operator {
        PrefixOperator::Not => operand == Type::Bool,
        PrefixOperator::Plus | PrefixOperator::Minus => operand.is_numeric(),
    };

    if !valid {
        return Err(Error::new(
            ErrorImpl::InvalidOperand {
                operator: prefix.operator.to_string(),
                operand: operand.to_string(),
            },
            prefix.span,
        ));
    }

    Ok(operand)
}

fn type_check_binary(type_checker: &TypeChecker, binary: &BinaryExpr) -> Result<Type, Error> {
    let left = type_check_expr(type_checker, &binary.left)?;
    let right = type_check_expr(type_checker, &binary.right)?;

    if left != right {
        return Err(type_mismatch(&left, &right, binary.right.get_span()));
    }

    let valid = if binary.operator.is_equality() {
        matches!(left, Type::Int32 | Type::Float32 | Type::Bool)
    } else {
        left.is_numeric()
    };

    if !valid {
        return Err(Error::new(
            ErrorImpl::InvalidOperand {
                operator: binary.operator.to_string(),
                operand: left.to_string(),
            },
            binary.span,
        ));
    }

    if binary.operator.is_arithmetic() {
        Ok(left)
    } else {
        Ok(Type::Bool)
    }
}

pub fn type_check_call(type_checker: &TypeChecker, call: &CallExpr) -> Result<Type, Error> {
    let function = match call.callee.as_ref() {
        Expr::Symbol(symbol) => match type_checker.resolve(&symbol.value) {
            Some(Resolved::Function(function)) => function,
            Some(Resolved::Builtin) => {
                for argument in call.arguments.iter() {
                    type_check_expr(type_checker, argument)?;
                }
                return Ok(print_type().return_type.as_ref().clone());
            }
            Some(Resolved::Variable(ty)) => {
                return Err(Error::new(
                    ErrorImpl::NotCallable {
                        callee: symbol.value.clone(),
                        type_: ty.to_string(),
                    },
                    symbol.span,
                ))
            }
            None => {
                return Err(Error::new(
                    ErrorImpl::UnknownIdentifier {
                        identifier: symbol.value.clone(),
                    },
                    symbol.span,
                ))
            }
        },
        callee => {
            let ty = type_check_expr(type_checker, callee)?;
            return Err(Error::new(
                ErrorImpl::NotCallable {
                    callee: String::from("expression"),
                    type_: ty.to_string(),
                },
                *callee.get_span(),
            ));
        }
    };

    let expected = function.parameters.len();
    let received = call.arguments.len();
    if received > expected {
        return Err(Error::new(
            ErrorImpl::UnexpectedArguments { expected, received },
            *call.arguments[expected].get_span(),
        ));
    } else if received < expected {
        return Err(Error::new(
            ErrorImpl::MissingArguments { expected, received },
            call.span,
        ));
    }

    for (argument, parameter) in call.arguments.iter().zip(function.parameters.iter()) {
        let argument_type = type_check_expr(type_checker, argument)?;
        if argument_type != *parameter {
            return Err(Error::new(
                ErrorImpl::ArgumentTypeMatchError {
                    expected: parameter.to_string(),
                    received: argument_type.to_string(),
                },
                *argument.get_span(),
            ));
        }
    }

    Ok(function.return_type.as_ref().clone())
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, ast: &mut Stmt) -> Result<(), Error> {
    match ast {
        Stmt::Expression(stmt) => {
            type_check_call(type_checker, &stmt.expression)?;
            Ok(())
        }
        Stmt::VarDecl(stmt) => type_check_var_decl(type_checker, stmt),
        Stmt::Assignment(stmt) => type_check_assignment(type_checker, stmt),
        Stmt::Return(stmt) => type_check_return(type_checker, stmt),
        Stmt::If(stmt) => {
            type_check_condition(type_checker, &stmt.condition)?;
            type_check_block(type_checker, &mut stmt.then_body)?;
            type_check_block(type_checker, &mut stmt.else_body)
        }
        Stmt::While(stmt) => {
            type_check_condition(type_checker, &stmt.condition)?;
            type_check_block(type_checker, &mut stmt.body)
        }
    }
}

/// Resolves the variable's type, writing a deduced type back into `ast`,
/// and then binds it in the current scope.
pub fn type_check_var_decl(
    type_checker: &mut TypeChecker,
    ast: &mut VarDeclStmt,
) -> Result<(), Error> {
    // The initializer is checked before the name is bound, so `x := x + 1`
    // reads an outer `x`.
    let value_type = match &ast.assigned_value {
        Some(value) => Some(type_check_expr(type_checker, value)?),
        None => None,
    };

    if ast.var_type.ty == Type::Deduced {
        match value_type {
            Some(value_type) => ast.var_type.ty = value_type,
            None => {
                return Err(Error::new(
                    ErrorImpl::ExpectedExplicitValue {
                        variable: ast.identifier.clone(),
                    },
                    ast.span,
                ))
            }
        }
    } else if let Some(value_type) = value_type {
        if ast.var_type.ty != value_type {
            let span = ast
                .assigned_value
                .as_ref()
                .map(|value| *value.get_span())
                .unwrap_or(ast.span);
            return Err(type_mismatch(&ast.var_type.ty, &value_type, &span));
        }
    }

    if !ast.var_type.ty.has_runtime_value() {
        return Err(Error::new(
            ErrorImpl::InvalidVariableType {
                variable: ast.identifier.clone(),
                type_: ast.var_type.ty.to_string(),
            },
            ast.span,
        ));
    }

    type_checker.declare(
        &ast.identifier,
        ast.var_type.ty.clone(),
        ast.var_type.qualifier,
        ast.span,
    )
}

fn type_check_assignment(type_checker: &mut TypeChecker, ast: &AssignmentStmt) -> Result<(), Error> {
    let binding = match type_checker.scopes.lookup(type_checker.current_scope, &ast.identifier) {
        Some(binding) => binding.clone(),
        None if type_checker.resolve(&ast.identifier).is_some() => {
            return Err(Error::new(
                ErrorImpl::FunctionUsedAsValue {
                    function: ast.identifier.clone(),
                },
                ast.span,
            ))
        }
        None => {
            return Err(Error::new(
                ErrorImpl::UnknownIdentifier {
                    identifier: ast.identifier.clone(),
                },
                ast.span,
            ))
        }
    };

    if !binding.is_mutable() {
        return Err(Error::new(
            ErrorImpl::AssignmentToImmutable {
                variable: ast.identifier.clone(),
            },
            ast.span,
        ));
    }

    let value_type = type_check_expr(type_checker, &ast.value)?;
    if value_type != binding.ty {
        return Err(type_mismatch(&binding.ty, &value_type, ast.value.get_span()));
    }

    Ok(())
}

fn type_check_return(type_checker: &mut TypeChecker, ast: &ReturnStmt) -> Result<(), Error> {
    let required = match type_checker.scopes.return_type(type_checker.current_scope) {
        Some(required) => required.clone(),
        None => {
            return Err(Error::new(
                ErrorImpl::InternalConsistency {
                    message: String::from("return statement outside of a function"),
                },
                ast.span,
            ))
        }
    };

    match &ast.value {
        Some(value) => {
            let value_type = type_check_expr(type_checker, value)?;
            if value_type != required {
                return Err(type_mismatch(&required, &value_type, value.get_span()));
            }
        }
        None => {
            if required != Type::Void {
                return Err(type_mismatch(&required, &Type::Void, &ast.span));
            }
        }
    }

    Ok(())
}

fn type_check_condition(type_checker: &TypeChecker, condition: &Expr) -> Result<(), Error> {
    let ty = type_check_expr(type_checker, condition)?;
    if ty != Type::Bool {
        return Err(type_mismatch(&Type::Bool, &ty, condition.get_span()));
    }
    Ok(())
}

/// Checks a nested block in a fresh child scope. Empty blocks get no scope.
pub fn type_check_block(type_checker: &mut TypeChecker, ast: &mut BlockStmt) -> Result<(), Error> {
    if ast.is_empty() {
        return Ok(());
    }

    let scope = type_checker.scopes.add_scope(type_checker.current_scope, None);
    ast.scope = scope;

    type_check_body(type_checker, ast, scope)
}

fn type_check_body(
    type_checker: &mut TypeChecker,
    ast: &mut BlockStmt,
    scope: ScopeId,
) -> Result<(), Error> {
    let previous = std::mem::replace(&mut type_checker.current_scope, scope);
    let result = ast
        .body
        .iter_mut()
        .try_for_each(|stmt| type_check_stmt(type_checker, stmt));
    type_checker.current_scope = previous;

    result
}

/// Checks one function. Its body always gets a scope, holding the parameters
/// and the required return type.
pub fn type_check_function(
    type_checker: &mut TypeChecker,
    ast: &mut FnDeclStmt,
) -> Result<(), Error> {
    let scope = type_checker
        .scopes
        .add_scope(ScopeId::GLOBAL, Some(ast.return_type.clone()));
    ast.body.scope = scope;

    let previous = std::mem::replace(&mut type_checker.current_scope, scope);
    let parameters = ast.parameters.iter().try_for_each(|parameter| {
        if !parameter.param_type.ty.has_runtime_value() {
            return Err(Error::new(
                ErrorImpl::InvalidVariableType {
                    variable: parameter.name.clone(),
                    type_: parameter.param_type.ty.to_string(),
                },
                parameter.span,
            ));
        }
        type_checker.declare(
            &parameter.name,
            parameter.param_type.ty.clone(),
            parameter.param_type.qualifier,
            parameter.span,
        )
    });
    type_checker.current_scope = previous;
    parameters?;

    type_check_body(type_checker, &mut ast.body, scope)
}

/// Runs semantic analysis over a whole program.
///
/// Globals are checked first, in source order, then every function. A
/// function stops at its first error and the next function is checked
/// anyway, so the result holds at most one error per function.
pub fn type_check(mut program: Program) -> Result<CheckedProgram, Vec<Error>> {
    let mut type_checker = TypeChecker::new();
    let mut errors = vec![];

    for function in program.functions.iter() {
        if function.identifier == PRINT || type_checker.functions.contains_key(&function.identifier)
        {
            errors.push(Error::new(
                ErrorImpl::FunctionAlreadyDeclared {
                    function: function.identifier.clone(),
                },
                function.span,
            ));
            continue;
        }
        type_checker
            .functions
            .insert(function.identifier.clone(), function.get_function_type());
    }

    for global in program.globals.iter_mut() {
        type_checker.current_scope = ScopeId::GLOBAL;
        if let Err(error) = type_check_var_decl(&mut type_checker, global) {
            errors.push(error);
        }
    }

    for function in program.functions.iter_mut() {
        type_checker.current_scope = ScopeId::GLOBAL;
        match type_check_function(&mut type_checker, function) {
            Ok(()) => trace!(function = %function.identifier, "function checked"),
            Err(error) => {
                trace!(function = %function.identifier, error = %error, "function rejected");
                errors.push(error);
            }
        }
    }

    if errors.is_empty() {
        Ok(CheckedProgram {
            program,
            scopes: type_checker.scopes,
        })
    } else {
        Err(errors)
    }
}
