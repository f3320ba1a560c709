use std::slice::Iter;

use crate::{type_checker::scope::ScopeId, Span};

use super::{
    ast::{Expr, Stmt},
    expressions::CallExpr,
    types::{FunctionType, QualifiedType, Type},
};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    /// Lexical scope of the block, `ScopeId::NONE` until the type checker
    /// resolves it. Empty nested blocks keep `ScopeId::NONE`.
    pub scope: ScopeId,
    pub span: Span,
}

impl BlockStmt {
    pub fn new(body: Vec<Stmt>, span: Span) -> Self {
        BlockStmt {
            body,
            scope: ScopeId::NONE,
            span,
        }
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// A call evaluated for its side effects: `print(x);`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: CallExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: String,
    /// Rewritten in place by the type checker when the type is deduced.
    pub var_type: QualifiedType,
    pub assigned_value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub identifier: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    /// Empty when the source has no `else`.
    pub else_body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub param_type: QualifiedType,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Type,
    pub body: BlockStmt,
    pub span: Span,
}

impl FnDeclStmt {
    pub fn get_function_type(&self) -> FunctionType {
        FunctionType {
            parameters: self
                .parameters
                .iter()
                .map(|parameter| parameter.param_type.ty.clone())
                .collect(),
            return_type: Box::new(self.return_type.clone()),
        }
    }
}
