//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a `Program`. It uses a Pratt parser for expressions with
//! operator precedence and handles:
//!
//! - Top-level function and global variable definitions
//! - Statement parsing (variable definitions, assignments, control flow)
//! - Expression parsing (binary ops, prefix ops, calls, literals)
//! - Type parsing for type annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling. It
//! stops at the first unexpected token.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
