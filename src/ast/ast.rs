use crate::Span;

use super::{
    expressions::{BinaryExpr, BoolExpr, CallExpr, NumberExpr, PrefixExpr, StringExpr, SymbolExpr},
    statements::{
        AssignmentStmt, ExpressionStmt, FnDeclStmt, IfStmt, ReturnStmt, VarDeclStmt, WhileStmt,
    },
};

/// Statements that can appear inside a function body.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    Return(ReturnStmt),
    If(IfStmt),
    While(WhileStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberExpr),
    String(StringExpr),
    Bool(BoolExpr),
    Symbol(SymbolExpr),
    Prefix(PrefixExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Number(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Bool(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }
}

/// A whole source file: global variables and functions, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub globals: Vec<VarDeclStmt>,
    pub functions: Vec<FnDeclStmt>,
}

impl Program {
    /// Finds a function by name.
    ///
    /// This is a linear scan; programs are small enough that a map has not
    /// been worth it.
    pub fn find_function(&self, name: &str) -> Option<&FnDeclStmt> {
        self.functions
            .iter()
            .find(|function| function.identifier == name)
    }
}
